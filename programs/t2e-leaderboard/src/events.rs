use anchor_lang::prelude::*;

/// A trade has been accepted and applied to the trader statistics.
#[event]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct TradeRecorded {
    /// Event time.
    pub ts: i64,
    /// Leaderboard.
    pub leaderboard: Pubkey,
    /// Trader.
    pub trader: Pubkey,
    /// Traded volume.
    pub volume: u64,
    /// Execution time of the trade.
    pub execution_time: u64,
    /// Realized P&L of the trade.
    pub pnl_delta: i64,
    /// Trade count after the trade.
    pub trade_count: u64,
    /// Average execution time after the trade.
    pub average_execution_time: u64,
}

/// A new ranking has been committed.
#[event]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct LeaderboardUpdated {
    /// Event time.
    pub ts: i64,
    /// Leaderboard.
    pub leaderboard: Pubkey,
    /// The new epoch.
    pub epoch: u64,
    /// Number of submitted candidates.
    pub candidates: u16,
    /// Number of ranked traders.
    pub ranked: u16,
}

/// Distribution record of an epoch.
#[event]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct RewardsDistributed {
    /// Event time.
    pub ts: i64,
    /// Leaderboard.
    pub leaderboard: Pubkey,
    /// The epoch the rewards were distributed for.
    pub epoch: u64,
    /// Number of recipients.
    pub top_n: u64,
    /// Requested reward amount.
    pub reward_amount: u64,
    /// Reward amount after halvings.
    pub effective_amount: u64,
    /// Total amount paid.
    pub total_paid: u64,
    /// Recipients, in rank order.
    pub recipients: Vec<Pubkey>,
    /// Amount paid to each recipient.
    pub amounts: Vec<u64>,
}

/// Staked amount of a trader changed.
#[event]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct StakeChanged {
    /// Event time.
    pub ts: i64,
    /// Leaderboard.
    pub leaderboard: Pubkey,
    /// Trader.
    pub trader: Pubkey,
    /// Whether the change is a withdrawal.
    pub is_unstake: bool,
    /// Amount moved.
    pub amount: u64,
    /// Staked amount after the change.
    pub staked_amount: u64,
    /// Fee discount after the change.
    pub fee_discount: u8,
}

/// A snapshot has been archived.
#[event]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct SnapshotTaken {
    /// Event time.
    pub ts: i64,
    /// Leaderboard.
    pub leaderboard: Pubkey,
    /// Snapshot account.
    pub snapshot: Pubkey,
    /// Snapshot epoch.
    pub epoch: u64,
    /// Creator.
    pub created_by: Pubkey,
}

/// The emergency pause flag changed.
#[event]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct PauseToggled {
    /// Event time.
    pub ts: i64,
    /// Leaderboard.
    pub leaderboard: Pubkey,
    /// New value.
    pub paused: bool,
}

/// A config value changed.
#[event]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct ConfigUpdated {
    /// Event time.
    pub ts: i64,
    /// Leaderboard.
    pub leaderboard: Pubkey,
    /// Config key.
    pub key: String,
    /// Previous value.
    pub previous: u64,
    /// New value.
    pub value: u64,
}

/// A role holder changed.
#[event]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct RoleUpdated {
    /// Event time.
    pub ts: i64,
    /// Leaderboard.
    pub leaderboard: Pubkey,
    /// Role name.
    pub role: String,
    /// Previous holder.
    pub previous: Pubkey,
    /// New holder.
    pub current: Pubkey,
}
