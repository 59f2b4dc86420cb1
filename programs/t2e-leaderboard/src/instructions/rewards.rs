use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use t2e_model::Payout;

use crate::{
    events::RewardsDistributed,
    states::Leaderboard,
    utils::{Authentication, TransferUtils},
    LeaderboardError,
};

/// The accounts definition for
/// [`distribute_rewards`](crate::t2e_leaderboard::distribute_rewards).
///
/// Remaining accounts expected by this instruction:
///
///   - 0..N. `[writable]` Reward token accounts of the top `N` traders, in rank order.
#[derive(Accounts)]
pub struct DistributeRewards<'info> {
    /// The updater or the admin.
    pub authority: Signer<'info>,
    /// Leaderboard.
    #[account(mut, has_one = reward_mint, has_one = reward_vault)]
    pub leaderboard: Box<Account<'info, Leaderboard>>,
    /// Reward token.
    pub reward_mint: Box<InterfaceAccount<'info, Mint>>,
    /// Reward pool.
    #[account(mut)]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,
    /// The token program.
    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> Authentication<'info> for DistributeRewards<'info> {
    fn authority(&self) -> &Signer<'info> {
        &self.authority
    }

    fn leaderboard(&self) -> &Account<'info, Leaderboard> {
        &self.leaderboard
    }
}

/// Pay out `reward_amount` to the top `top_n` traders of the current epoch.
/// # CHECK
/// Only the updater or the admin can use.
pub(crate) fn unchecked_distribute_rewards<'info>(
    ctx: Context<'_, '_, 'info, 'info, DistributeRewards<'info>>,
    top_n: u64,
    reward_amount: u64,
) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = ctx.accounts;

    let payouts = accounts
        .leaderboard
        .plan_distribution(top_n, reward_amount, now)?;
    let total_paid = check_payouts(
        &payouts,
        accounts.reward_vault.amount,
        ctx.remaining_accounts.len(),
    )?;

    {
        let transfer = TransferUtils::new(
            accounts.token_program.to_account_info(),
            &accounts.leaderboard,
            &accounts.reward_mint,
        );
        for (payout, recipient) in payouts.iter().zip(ctx.remaining_accounts) {
            validate_recipient(
                recipient,
                &payout.trader,
                &accounts.reward_mint.key(),
                &accounts.token_program.key(),
            )?;
            transfer.transfer_out(
                accounts.reward_vault.to_account_info(),
                recipient.clone(),
                payout.amount,
            )?;
        }
    }

    let epoch = accounts.leaderboard.record_distribution(total_paid)?;
    let split = accounts.leaderboard.config.reward_split()?;
    let effective_amount = accounts
        .leaderboard
        .reward_distributor()?
        .effective_amount(reward_amount, now);

    emit!(RewardsDistributed {
        ts: now,
        leaderboard: accounts.leaderboard.key(),
        epoch,
        top_n,
        reward_amount,
        effective_amount,
        total_paid,
        recipients: payouts.iter().map(|payout| payout.trader).collect(),
        amounts: payouts.iter().map(|payout| payout.amount).collect(),
    });
    msg!(
        "[Rewards] epoch {}: distributed {} of {} to {} traders, split: {}",
        epoch,
        total_paid,
        effective_amount,
        payouts.len(),
        split
    );
    Ok(total_paid)
}

/// Sum the payouts, which must be covered by the pool and have a recipient account each.
fn check_payouts(
    payouts: &[Payout<Pubkey>],
    pool_balance: u64,
    recipients: usize,
) -> Result<u64> {
    let total_paid = payouts
        .iter()
        .try_fold(0u64, |total, payout| total.checked_add(payout.amount))
        .ok_or(LeaderboardError::ArithmeticOverflow)?;
    require_gte!(
        pool_balance,
        total_paid,
        LeaderboardError::InsufficientPoolBalance
    );
    require_gte!(
        recipients,
        payouts.len(),
        LeaderboardError::RecipientAccountNotProvided
    );
    Ok(total_paid)
}

fn validate_recipient(
    recipient: &AccountInfo<'_>,
    trader: &Pubkey,
    mint: &Pubkey,
    token_program: &Pubkey,
) -> Result<()> {
    require_keys_eq!(
        *recipient.owner,
        *token_program,
        LeaderboardError::TokenAccountMismatched
    );
    let account = {
        let data = recipient.try_borrow_data()?;
        TokenAccount::try_deserialize(&mut &data[..])?
    };
    check_recipient_account(&account, trader, mint)
}

fn check_recipient_account(account: &TokenAccount, trader: &Pubkey, mint: &Pubkey) -> Result<()> {
    require_keys_eq!(account.mint, *mint, LeaderboardError::TokenAccountMismatched);
    require_keys_eq!(account.owner, *trader, LeaderboardError::TokenAccountMismatched);
    Ok(())
}
