/// Initialize a leaderboard.
pub mod initialize;

/// Record trades.
pub mod trade;

/// Update the ranking.
pub mod ranking;

/// Distribute rewards.
pub mod rewards;

/// Staking and fee discount.
pub mod staking;

/// Snapshots.
pub mod snapshot;

/// Admin controls.
pub mod admin;

pub use admin::*;
pub use initialize::*;
pub use ranking::*;
pub use rewards::*;
pub use snapshot::*;
pub use staking::*;
pub use trade::*;
