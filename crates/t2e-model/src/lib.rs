#![deny(missing_docs)]
#![deny(unreachable_pub)]
#![warn(clippy::arithmetic_side_effects)]

//! Pure ranking engine for the trade-to-earn leaderboard.
//!
//! Nothing in this crate knows about accounts, signers or token programs. Trader identities are
//! generic (`K: Ord + Clone`), so the same rules can be replayed off-chain for audits.

/// Trader statistics accumulation.
pub mod stats;

/// Anti-abuse heuristics.
pub mod abuse;

/// Ranking engine.
pub mod ranking;

/// Reward distribution.
pub mod reward;

/// Fee discount tiers.
pub mod discount;

/// Error type.
pub mod error;

pub use abuse::{AntiAbuseFilter, AntiAbuseParams, ProposedTrade, RejectReason, TradeHistory, Verdict};
pub use discount::{fee_discount, MAX_FEE_DISCOUNT};
pub use error::Error;
pub use ranking::{Candidate, RankedTrader, RankingEngine, ScoreWeights};
pub use reward::{Payout, RewardDistributor, RewardSplit};
pub use stats::RunningAverage;

/// Alias for result.
pub type Result<T> = std::result::Result<T, Error>;
