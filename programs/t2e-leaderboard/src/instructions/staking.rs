use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::{
    constants::TRADER_STATS_SEED,
    events::StakeChanged,
    states::{Leaderboard, TraderStats},
    utils::TransferUtils,
    LeaderboardError,
};

/// The accounts definition for [`stake`](crate::t2e_leaderboard::stake).
#[derive(Accounts)]
pub struct Stake<'info> {
    /// The trader.
    #[account(mut)]
    pub trader: Signer<'info>,
    /// Leaderboard.
    #[account(mut, has_one = reward_mint, has_one = staking_vault)]
    pub leaderboard: Box<Account<'info, Leaderboard>>,
    /// Trader statistics.
    #[account(
        init_if_needed,
        payer = trader,
        space = 8 + TraderStats::INIT_SPACE,
        seeds = [TRADER_STATS_SEED, leaderboard.key().as_ref(), trader.key().as_ref()],
        bump,
    )]
    pub trader_stats: Box<Account<'info, TraderStats>>,
    /// Reward token.
    pub reward_mint: Box<InterfaceAccount<'info, Mint>>,
    /// The token account to stake from.
    #[account(
        mut,
        token::mint = reward_mint,
        token::authority = trader,
        token::token_program = token_program,
    )]
    pub source: Box<InterfaceAccount<'info, TokenAccount>>,
    /// Staking vault.
    #[account(mut)]
    pub staking_vault: Box<InterfaceAccount<'info, TokenAccount>>,
    /// The token program.
    pub token_program: Interface<'info, TokenInterface>,
    /// The system program.
    pub system_program: Program<'info, System>,
}

pub(crate) fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
    require!(amount != 0, LeaderboardError::InvalidInput);
    require_gte!(
        ctx.accounts.source.amount,
        amount,
        LeaderboardError::InsufficientBalance
    );

    let now = Clock::get()?.unix_timestamp;
    let accounts = ctx.accounts;
    let trader = accounts.trader.key();

    TransferUtils::new(
        accounts.token_program.to_account_info(),
        &accounts.leaderboard,
        &accounts.reward_mint,
    )
    .transfer_in(
        accounts.source.to_account_info(),
        accounts.trader.to_account_info(),
        accounts.staking_vault.to_account_info(),
        amount,
    )?;

    let leaderboard = accounts.leaderboard.key();
    let stats = &mut accounts.trader_stats;
    stats.init_if_needed(ctx.bumps.trader_stats, leaderboard, trader);
    stats.stake(amount)?;
    accounts.leaderboard.record_stake(amount)?;

    let fee_discount = stats.fee_discount(accounts.leaderboard.config.fee_discount_divisor()?);
    emit!(StakeChanged {
        ts: now,
        leaderboard,
        trader,
        is_unstake: false,
        amount,
        staked_amount: stats.staked_amount,
        fee_discount,
    });
    msg!(
        "[Staking] {} staked {}, staked amount: {}, fee discount: {}%",
        trader,
        amount,
        stats.staked_amount,
        fee_discount
    );
    Ok(())
}

/// The accounts definition for [`unstake`](crate::t2e_leaderboard::unstake).
#[derive(Accounts)]
pub struct Unstake<'info> {
    /// The trader.
    pub trader: Signer<'info>,
    /// Leaderboard.
    #[account(mut, has_one = reward_mint, has_one = staking_vault)]
    pub leaderboard: Box<Account<'info, Leaderboard>>,
    /// Trader statistics.
    #[account(
        mut,
        has_one = leaderboard,
        has_one = trader,
        seeds = [TRADER_STATS_SEED, leaderboard.key().as_ref(), trader.key().as_ref()],
        bump = trader_stats.bump,
    )]
    pub trader_stats: Box<Account<'info, TraderStats>>,
    /// Reward token.
    pub reward_mint: Box<InterfaceAccount<'info, Mint>>,
    /// The token account to return the stake to.
    #[account(
        mut,
        token::mint = reward_mint,
        token::authority = trader,
        token::token_program = token_program,
    )]
    pub destination: Box<InterfaceAccount<'info, TokenAccount>>,
    /// Staking vault.
    #[account(mut)]
    pub staking_vault: Box<InterfaceAccount<'info, TokenAccount>>,
    /// The token program.
    pub token_program: Interface<'info, TokenInterface>,
}

pub(crate) fn unstake(ctx: Context<Unstake>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = ctx.accounts;
    let trader = accounts.trader.key();

    accounts.trader_stats.unstake(amount)?;
    accounts.leaderboard.record_unstake(amount)?;

    TransferUtils::new(
        accounts.token_program.to_account_info(),
        &accounts.leaderboard,
        &accounts.reward_mint,
    )
    .transfer_out(
        accounts.staking_vault.to_account_info(),
        accounts.destination.to_account_info(),
        amount,
    )?;

    let stats = &accounts.trader_stats;
    let fee_discount = stats.fee_discount(accounts.leaderboard.config.fee_discount_divisor()?);
    emit!(StakeChanged {
        ts: now,
        leaderboard: accounts.leaderboard.key(),
        trader,
        is_unstake: true,
        amount,
        staked_amount: stats.staked_amount,
        fee_discount,
    });
    msg!(
        "[Staking] {} unstaked {}, staked amount: {}, fee discount: {}%",
        trader,
        amount,
        stats.staked_amount,
        fee_discount
    );
    Ok(())
}

/// The accounts definition for [`fund_reward_pool`](crate::t2e_leaderboard::fund_reward_pool).
#[derive(Accounts)]
pub struct FundRewardPool<'info> {
    /// Funder.
    pub funder: Signer<'info>,
    /// Leaderboard.
    #[account(has_one = reward_mint, has_one = reward_vault)]
    pub leaderboard: Box<Account<'info, Leaderboard>>,
    /// Reward token.
    pub reward_mint: Box<InterfaceAccount<'info, Mint>>,
    /// The token account to fund from.
    #[account(
        mut,
        token::mint = reward_mint,
        token::authority = funder,
        token::token_program = token_program,
    )]
    pub source: Box<InterfaceAccount<'info, TokenAccount>>,
    /// Reward pool.
    #[account(mut)]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,
    /// The token program.
    pub token_program: Interface<'info, TokenInterface>,
}

pub(crate) fn fund_reward_pool(ctx: Context<FundRewardPool>, amount: u64) -> Result<()> {
    require!(amount != 0, LeaderboardError::InvalidInput);
    require_gte!(
        ctx.accounts.source.amount,
        amount,
        LeaderboardError::InsufficientBalance
    );
    let accounts = ctx.accounts;
    TransferUtils::new(
        accounts.token_program.to_account_info(),
        &accounts.leaderboard,
        &accounts.reward_mint,
    )
    .transfer_in(
        accounts.source.to_account_info(),
        accounts.funder.to_account_info(),
        accounts.reward_vault.to_account_info(),
        amount,
    )?;
    msg!(
        "[Rewards] {} funded the reward pool with {}",
        accounts.funder.key(),
        amount
    );
    Ok(())
}

/// The accounts definition for
/// [`calculate_fee_discount`](crate::t2e_leaderboard::calculate_fee_discount).
#[derive(Accounts)]
pub struct CalculateFeeDiscount<'info> {
    /// Leaderboard.
    pub leaderboard: Box<Account<'info, Leaderboard>>,
    /// Trader statistics.
    #[account(has_one = leaderboard)]
    pub trader_stats: Box<Account<'info, TraderStats>>,
}

pub(crate) fn calculate_fee_discount(ctx: Context<CalculateFeeDiscount>) -> Result<u8> {
    let divisor = ctx.accounts.leaderboard.config.fee_discount_divisor()?;
    let stats = &ctx.accounts.trader_stats;
    let fee_discount = stats.fee_discount(divisor);
    msg!(
        "[Staking] fee discount of {}: {}%",
        stats.trader,
        fee_discount
    );
    Ok(fee_discount)
}
