//! # The trade-to-earn leaderboard program
//!
//! Traders (or a designated reporter) record trades, which are screened by an anti-abuse filter
//! and folded into per-trader statistics. An updater periodically ranks the submitted
//! statistics into a new epoch of the leaderboard, and the top traders of an epoch can be paid
//! from the reward pool at most once. Staking the reward token grants a fee discount and
//! boosts the ranking score.
//!
//! ## Accounts
//! - [`Leaderboard`](states::Leaderboard): ranking, roles, config and the reward token vaults.
//! - [`TraderStats`](states::TraderStats): per-trader statistics and staked amount.
//! - [`LeaderboardSnapshot`](states::LeaderboardSnapshot): write-once copy of a ranking.

/// Constants.
pub mod constants;

/// States.
pub mod states;

/// Instructions.
pub mod instructions;

/// Events.
pub mod events;

/// Error type.
pub mod error;

pub(crate) mod utils;

use anchor_lang::prelude::*;
use instructions::*;
use utils::Authenticate;

pub use error::LeaderboardError;

declare_id!("FpfKfzV7dyzUSRyk61UegQvEPskgGn1Gz5PEXRgmp53S");

#[program]
pub mod t2e_leaderboard {
    use super::*;

    /// Create a [`Leaderboard`](crate::states::Leaderboard) for the given reward token, with
    /// the signer as its admin, updater and reporter.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize(ctx)
    }

    /// Record a trade of `trader`.
    ///
    /// # Accounts
    /// *[See the documentation for the accounts.](RecordTrade)*
    ///
    /// # Arguments
    /// - `volume`: traded volume, must be positive.
    /// - `execution_time`: execution time of the trade, must be positive.
    /// - `pnl_delta`: realized profit and loss of the trade.
    ///
    /// # Errors
    /// - The signer must be the trader or the reporter.
    /// - The trade must pass the anti-abuse filter.
    pub fn record_trade(
        ctx: Context<RecordTrade>,
        volume: u64,
        execution_time: u64,
        pnl_delta: i64,
    ) -> Result<()> {
        instructions::record_trade(ctx, volume, execution_time, pnl_delta)
    }

    /// Rank the [`TraderStats`](crate::states::TraderStats) accounts passed as remaining
    /// accounts and commit the result as a new epoch.
    ///
    /// # Errors
    /// - `expected_epoch` must be the current epoch.
    /// - The minimum update interval must have elapsed since the last update.
    /// - At least one candidate must be eligible.
    #[access_control(Authenticate::only_updater(&ctx))]
    pub fn update_leaderboard(ctx: Context<UpdateLeaderboard>, expected_epoch: u64) -> Result<()> {
        instructions::unchecked_update_leaderboard(ctx, expected_epoch)
    }

    /// Distribute `reward_amount` (after halvings) from the reward pool to the top `top_n`
    /// traders of the current epoch. Returns the total amount paid.
    ///
    /// # Errors
    /// - Distribution must not be paused.
    /// - Rewards must not have been distributed in the current epoch.
    /// - `top_n` must be in `1..=ranked`.
    /// - The reward pool must hold the total payout.
    #[access_control(Authenticate::only_updater(&ctx))]
    pub fn distribute_rewards<'info>(
        ctx: Context<'_, '_, 'info, 'info, DistributeRewards<'info>>,
        top_n: u64,
        reward_amount: u64,
    ) -> Result<u64> {
        instructions::unchecked_distribute_rewards(ctx, top_n, reward_amount)
    }

    /// Top up the reward pool.
    pub fn fund_reward_pool(ctx: Context<FundRewardPool>, amount: u64) -> Result<()> {
        instructions::fund_reward_pool(ctx, amount)
    }

    /// Stake reward tokens.
    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        instructions::stake(ctx, amount)
    }

    /// Withdraw staked tokens.
    pub fn unstake(ctx: Context<Unstake>, amount: u64) -> Result<()> {
        instructions::unstake(ctx, amount)
    }

    /// Returns the fee discount of a trader, in percent.
    pub fn calculate_fee_discount(ctx: Context<CalculateFeeDiscount>) -> Result<u8> {
        instructions::calculate_fee_discount(ctx)
    }

    /// Archive the current ranking. Returns the epoch of the snapshot.
    #[access_control(Authenticate::only_admin(&ctx))]
    pub fn snapshot_leaderboard(ctx: Context<SnapshotLeaderboard>) -> Result<u64> {
        instructions::unchecked_snapshot_leaderboard(ctx)
    }

    /// Pause or resume reward distribution.
    #[access_control(Authenticate::only_admin(&ctx))]
    pub fn set_pause(ctx: Context<ConfigureLeaderboard>, paused: bool) -> Result<()> {
        instructions::unchecked_set_pause(ctx, paused)
    }

    /// Update a config value.
    ///
    /// # Arguments
    /// - `key`: the config key in snake case, see [`ConfigKey`](crate::states::ConfigKey).
    /// - `value`: the new value.
    #[access_control(Authenticate::only_admin(&ctx))]
    pub fn update_config(ctx: Context<ConfigureLeaderboard>, key: String, value: u64) -> Result<()> {
        instructions::unchecked_update_config(ctx, &key, value)
    }

    /// Set the updater.
    #[access_control(Authenticate::only_admin(&ctx))]
    pub fn set_updater(ctx: Context<ConfigureLeaderboard>, updater: Pubkey) -> Result<()> {
        instructions::unchecked_set_updater(ctx, updater)
    }

    /// Set the reporter.
    #[access_control(Authenticate::only_admin(&ctx))]
    pub fn set_reporter(ctx: Context<ConfigureLeaderboard>, reporter: Pubkey) -> Result<()> {
        instructions::unchecked_set_reporter(ctx, reporter)
    }

    /// Start transferring the admin role to `next_authority`.
    #[access_control(Authenticate::only_admin(&ctx))]
    pub fn transfer_authority(
        ctx: Context<ConfigureLeaderboard>,
        next_authority: Pubkey,
    ) -> Result<()> {
        instructions::unchecked_transfer_authority(ctx, next_authority)
    }

    /// Accept a pending authority transfer.
    pub fn accept_authority(ctx: Context<AcceptAuthority>) -> Result<()> {
        instructions::accept_authority(ctx)
    }
}
