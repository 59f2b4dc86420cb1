use anchor_lang::prelude::*;
use t2e_model::{AntiAbuseFilter, ProposedTrade};

use crate::{
    constants::TRADER_STATS_SEED,
    events::TradeRecorded,
    states::{Leaderboard, TraderStats},
};

/// The accounts definition for [`record_trade`](crate::t2e_leaderboard::record_trade).
#[derive(Accounts)]
pub struct RecordTrade<'info> {
    /// The trader itself or the reporter of the leaderboard.
    #[account(mut)]
    pub payer: Signer<'info>,
    /// Leaderboard.
    pub leaderboard: Box<Account<'info, Leaderboard>>,
    /// The trader.
    /// CHECK: only the address is used.
    pub trader: UncheckedAccount<'info>,
    /// Trader statistics, created on the first accepted trade.
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + TraderStats::INIT_SPACE,
        seeds = [TRADER_STATS_SEED, leaderboard.key().as_ref(), trader.key().as_ref()],
        bump,
    )]
    pub trader_stats: Box<Account<'info, TraderStats>>,
    /// Counterparty of the trade, if known.
    /// CHECK: only the address is used.
    pub counterparty: Option<UncheckedAccount<'info>>,
    /// The system program.
    pub system_program: Program<'info, System>,
}

impl RecordTrade<'_> {
    fn validate_reporter(&self) -> Result<()> {
        self.leaderboard.validate_reporter(self.payer.key, self.trader.key)
    }
}

pub(crate) fn record_trade(
    ctx: Context<RecordTrade>,
    volume: u64,
    execution_time: u64,
    pnl_delta: i64,
) -> Result<()> {
    ctx.accounts.validate_reporter()?;

    let now = Clock::get()?.unix_timestamp;
    let accounts = ctx.accounts;
    let trader = accounts.trader.key();
    let filter = AntiAbuseFilter::new(accounts.leaderboard.config.anti_abuse_params());
    let trade = ProposedTrade {
        volume,
        execution_time,
        pnl_delta,
        counterparty: accounts.counterparty.as_ref().map(|account| account.key()),
        timestamp: now,
    };

    let stats = &mut accounts.trader_stats;
    stats.init_if_needed(ctx.bumps.trader_stats, accounts.leaderboard.key(), trader);
    stats.apply_trade(&filter, &trade)?;

    emit!(TradeRecorded {
        ts: now,
        leaderboard: accounts.leaderboard.key(),
        trader,
        volume,
        execution_time,
        pnl_delta,
        trade_count: stats.trade_count,
        average_execution_time: stats.average_execution_time,
    });
    msg!(
        "[Trade] trader={} volume={} execution_time={} pnl_delta={} trade_count={}",
        trader,
        volume,
        execution_time,
        pnl_delta,
        stats.trade_count
    );
    Ok(())
}
