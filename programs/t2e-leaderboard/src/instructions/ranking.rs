use anchor_lang::prelude::*;
use t2e_model::Candidate;

use crate::{
    error::ModelError,
    events::LeaderboardUpdated,
    states::{Leaderboard, TraderStats},
    utils::Authentication,
    LeaderboardError,
};

/// The accounts definition for
/// [`update_leaderboard`](crate::t2e_leaderboard::update_leaderboard).
///
/// Remaining accounts expected by this instruction:
///
///   - 0..N. `[]` The [`TraderStats`] accounts of the candidates.
#[derive(Accounts)]
pub struct UpdateLeaderboard<'info> {
    /// The updater or the admin.
    pub authority: Signer<'info>,
    /// Leaderboard to update.
    #[account(mut)]
    pub leaderboard: Box<Account<'info, Leaderboard>>,
}

impl<'info> Authentication<'info> for UpdateLeaderboard<'info> {
    fn authority(&self) -> &Signer<'info> {
        &self.authority
    }

    fn leaderboard(&self) -> &Account<'info, Leaderboard> {
        &self.leaderboard
    }
}

/// Rank the submitted candidates and commit the ranking as a new epoch.
/// # CHECK
/// Only the updater or the admin can use.
pub(crate) fn unchecked_update_leaderboard(
    ctx: Context<UpdateLeaderboard>,
    expected_epoch: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let leaderboard_key = ctx.accounts.leaderboard.key();
    let leaderboard = &mut ctx.accounts.leaderboard;
    leaderboard.check_update(expected_epoch, now)?;

    let candidates = load_candidates(&leaderboard_key, ctx.remaining_accounts)?;
    let ranked = leaderboard
        .config
        .ranking_engine()
        .rank(&candidates)
        .map_err(ModelError::from)?;
    let epoch = leaderboard.commit_ranking(&ranked, now)?;

    emit!(LeaderboardUpdated {
        ts: now,
        leaderboard: leaderboard_key,
        epoch,
        candidates: candidates.len().try_into().unwrap_or(u16::MAX),
        ranked: ranked.len().try_into().unwrap_or(u16::MAX),
    });
    msg!(
        "[Leaderboard] epoch {}: ranked {} of {} candidates",
        epoch,
        ranked.len(),
        candidates.len()
    );
    Ok(())
}

fn load_candidates(
    leaderboard: &Pubkey,
    accounts: &[AccountInfo<'_>],
) -> Result<Vec<Candidate<Pubkey>>> {
    accounts
        .iter()
        .map(|info| {
            require_keys_eq!(*info.owner, crate::ID, LeaderboardError::InvalidInput);
            let stats = {
                let data = info.try_borrow_data()?;
                TraderStats::try_deserialize(&mut &data[..])?
            };
            require_keys_eq!(stats.leaderboard, *leaderboard, LeaderboardError::InvalidInput);
            Ok(stats.candidate())
        })
        .collect()
}
