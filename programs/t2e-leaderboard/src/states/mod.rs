/// Leaderboard.
pub mod leaderboard;

/// Trader statistics.
pub mod trader_stats;

/// Snapshot.
pub mod snapshot;

pub use leaderboard::{ConfigKey, Leaderboard, LeaderboardConfig, LeaderboardSigner, RankedEntry};
pub use snapshot::LeaderboardSnapshot;
pub use trader_stats::TraderStats;
