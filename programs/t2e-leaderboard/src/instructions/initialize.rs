use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::{
    constants::{LEADERBOARD_SEED, REWARD_VAULT_SEED, STAKING_VAULT_SEED},
    states::Leaderboard,
};

/// The accounts definition for [`initialize`](crate::t2e_leaderboard::initialize).
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Payer and the admin of the leaderboard.
    #[account(mut)]
    pub authority: Signer<'info>,
    /// Reward token.
    pub reward_mint: InterfaceAccount<'info, Mint>,
    /// The leaderboard to create.
    #[account(
        init,
        payer = authority,
        space = 8 + Leaderboard::INIT_SPACE,
        seeds = [LEADERBOARD_SEED, reward_mint.key().as_ref()],
        bump,
    )]
    pub leaderboard: Box<Account<'info, Leaderboard>>,
    /// Reward pool.
    #[account(
        init,
        payer = authority,
        seeds = [REWARD_VAULT_SEED, leaderboard.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = leaderboard,
        token::token_program = token_program,
    )]
    pub reward_vault: InterfaceAccount<'info, TokenAccount>,
    /// Staking vault.
    #[account(
        init,
        payer = authority,
        seeds = [STAKING_VAULT_SEED, leaderboard.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = leaderboard,
        token::token_program = token_program,
    )]
    pub staking_vault: InterfaceAccount<'info, TokenAccount>,
    /// The token program.
    pub token_program: Interface<'info, TokenInterface>,
    /// The system program.
    pub system_program: Program<'info, System>,
}

pub(crate) fn initialize(ctx: Context<Initialize>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = ctx.accounts;
    accounts.leaderboard.init(
        ctx.bumps.leaderboard,
        accounts.authority.key(),
        accounts.reward_mint.key(),
        accounts.reward_vault.key(),
        accounts.staking_vault.key(),
        now,
    );
    msg!(
        "[Leaderboard] initialized leaderboard {} for reward token {}",
        accounts.leaderboard.key(),
        accounts.reward_mint.key()
    );
    Ok(())
}
