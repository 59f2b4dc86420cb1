use std::num::NonZeroU64;

use anchor_lang::prelude::*;
use t2e_model::{
    fee_discount, AntiAbuseFilter, Candidate, ProposedTrade, RunningAverage, TradeHistory,
    Verdict,
};

use crate::error::{LeaderboardError, ModelError};

/// The per-trader statistics.
#[account]
#[derive(InitSpace, Default)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct TraderStats {
    /// Bump seed.
    pub bump: u8,
    /// The leaderboard this entry belongs to.
    pub leaderboard: Pubkey,
    /// The trader address.
    pub trader: Pubkey,
    /// Accumulated volume.
    pub total_volume: u64,
    /// Running average of execution time, rounded down.
    pub average_execution_time: u64,
    /// Remainder of the running average division.
    pub average_execution_time_remainder: u64,
    /// Accumulated P&L.
    pub pnl: i64,
    /// Staked amount.
    pub staked_amount: u64,
    /// Number of accepted trades.
    pub trade_count: u64,
    /// Time of the last accepted trade.
    pub last_trade_timestamp: i64,
    /// Consecutive accepted round-trip suspects.
    pub round_trip_streak: u8,
    /// Counterparty of the last accepted trade.
    pub last_counterparty: Option<Pubkey>,
}

impl TraderStats {
    /// Initialize the account if it has not been initialized yet.
    pub(crate) fn init_if_needed(&mut self, bump: u8, leaderboard: Pubkey, trader: Pubkey) {
        if self.leaderboard == Pubkey::default() {
            self.bump = bump;
            self.leaderboard = leaderboard;
            self.trader = trader;
        }
    }

    /// The fee discount granted by the staked amount.
    pub fn fee_discount(&self, divisor: NonZeroU64) -> u8 {
        fee_discount(self.staked_amount, divisor)
    }

    /// Returns the ranking candidate of this trader.
    pub fn candidate(&self) -> Candidate<Pubkey> {
        Candidate {
            trader: self.trader,
            total_volume: self.total_volume,
            average_execution_time: self.average_execution_time,
            pnl: self.pnl,
            staked_amount: self.staked_amount,
            trade_count: self.trade_count,
        }
    }

    /// Evaluate the trade and apply it if accepted.
    ///
    /// Nothing is written unless every check and computation succeeds.
    pub(crate) fn apply_trade(
        &mut self,
        filter: &AntiAbuseFilter,
        trade: &ProposedTrade<Pubkey>,
    ) -> Result<()> {
        trade.validate().map_err(ModelError::from)?;

        if let Verdict::Reject(reason) = filter.evaluate(&self.trader, trade, &*self) {
            msg!("[Trade] rejected trade of {}: {}", self.trader, reason);
            return err!(LeaderboardError::RejectedByAntiAbuse);
        }

        let total_volume = self
            .total_volume
            .checked_add(trade.volume)
            .ok_or(LeaderboardError::ArithmeticOverflow)?;
        let average = RunningAverage {
            average: self.average_execution_time,
            remainder: self.average_execution_time_remainder,
        }
        .push(self.trade_count, trade.execution_time)
        .map_err(ModelError::from)?;
        let pnl = self
            .pnl
            .checked_add(trade.pnl_delta)
            .ok_or(LeaderboardError::ArithmeticOverflow)?;
        let trade_count = self
            .trade_count
            .checked_add(1)
            .ok_or(LeaderboardError::ArithmeticOverflow)?;
        let round_trip_streak = filter.round_trip_streak_after(trade, &*self);

        self.total_volume = total_volume;
        self.average_execution_time = average.average;
        self.average_execution_time_remainder = average.remainder;
        self.pnl = pnl;
        self.trade_count = trade_count;
        self.last_trade_timestamp = trade.timestamp;
        self.round_trip_streak = round_trip_streak;
        self.last_counterparty = trade.counterparty;
        Ok(())
    }

    pub(crate) fn stake(&mut self, amount: u64) -> Result<()> {
        require!(amount != 0, LeaderboardError::InvalidInput);
        self.staked_amount = self
            .staked_amount
            .checked_add(amount)
            .ok_or(LeaderboardError::ArithmeticOverflow)?;
        Ok(())
    }

    pub(crate) fn unstake(&mut self, amount: u64) -> Result<()> {
        require!(amount != 0, LeaderboardError::InvalidInput);
        self.staked_amount = self
            .staked_amount
            .checked_sub(amount)
            .ok_or(LeaderboardError::InsufficientBalance)?;
        Ok(())
    }
}

impl TradeHistory<Pubkey> for TraderStats {
    fn trade_count(&self) -> u64 {
        self.trade_count
    }

    fn total_volume(&self) -> u64 {
        self.total_volume
    }

    fn last_trade_timestamp(&self) -> i64 {
        self.last_trade_timestamp
    }

    fn round_trip_streak(&self) -> u8 {
        self.round_trip_streak
    }

    fn last_counterparty(&self) -> Option<&Pubkey> {
        self.last_counterparty.as_ref()
    }
}
