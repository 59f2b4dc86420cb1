use anchor_lang::prelude::*;

/// Seed of the [`Leaderboard`](crate::states::Leaderboard) account.
#[constant]
pub const LEADERBOARD_SEED: &[u8] = b"leaderboard";

/// Seed of the [`TraderStats`](crate::states::TraderStats) account.
#[constant]
pub const TRADER_STATS_SEED: &[u8] = b"trader_stats";

/// Seed of the [`LeaderboardSnapshot`](crate::states::LeaderboardSnapshot) account.
#[constant]
pub const SNAPSHOT_SEED: &[u8] = b"snapshot";

/// Seed of the reward vault.
#[constant]
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";

/// Seed of the staking vault.
#[constant]
pub const STAKING_VAULT_SEED: &[u8] = b"staking_vault";

/// The maximum number of ranked traders kept on chain.
#[constant]
pub const MAX_RANKED_LEN: u8 = 100;

pub(crate) const DEFAULT_MIN_TRADE_INTERVAL: i64 = 10;
pub(crate) const DEFAULT_MIN_UPDATE_INTERVAL: i64 = 600;
pub(crate) const DEFAULT_BASE_VOLUME_CEILING: u64 = 1_000_000_000;
pub(crate) const DEFAULT_VOLUME_CEILING_MULTIPLIER: u64 = 20;
pub(crate) const DEFAULT_ROUND_TRIP_PNL_EPSILON: u64 = 0;
pub(crate) const DEFAULT_ROUND_TRIP_MIN_VOLUME: u64 = 100_000;
pub(crate) const DEFAULT_MAX_ROUND_TRIP_STREAK: u8 = 3;
pub(crate) const DEFAULT_MIN_TRADES_FOR_RANKING: u64 = 3;
pub(crate) const DEFAULT_WEIGHT_VOLUME: u32 = 4_000;
pub(crate) const DEFAULT_WEIGHT_SPEED: u32 = 2_000;
pub(crate) const DEFAULT_WEIGHT_PNL: u32 = 3_000;
pub(crate) const DEFAULT_WEIGHT_STAKE: u32 = 1_000;
pub(crate) const DEFAULT_FEE_DISCOUNT_DIVISOR: u64 = 200;
/// 180 days.
pub(crate) const DEFAULT_HALVING_PERIOD: i64 = 180 * 24 * 3600;
