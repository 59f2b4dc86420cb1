use anchor_lang::prelude::*;

use crate::{
    constants::SNAPSHOT_SEED,
    events::SnapshotTaken,
    states::{Leaderboard, LeaderboardSnapshot},
    utils::Authentication,
};

/// The accounts definition for
/// [`snapshot_leaderboard`](crate::t2e_leaderboard::snapshot_leaderboard).
#[derive(Accounts)]
pub struct SnapshotLeaderboard<'info> {
    /// The admin.
    #[account(mut)]
    pub authority: Signer<'info>,
    /// Leaderboard.
    pub leaderboard: Box<Account<'info, Leaderboard>>,
    /// The snapshot to create, one per epoch.
    #[account(
        init,
        payer = authority,
        space = 8 + LeaderboardSnapshot::INIT_SPACE,
        seeds = [
            SNAPSHOT_SEED,
            leaderboard.key().as_ref(),
            &leaderboard.epoch.to_le_bytes(),
        ],
        bump,
    )]
    pub snapshot: Box<Account<'info, LeaderboardSnapshot>>,
    /// The system program.
    pub system_program: Program<'info, System>,
}

impl<'info> Authentication<'info> for SnapshotLeaderboard<'info> {
    fn authority(&self) -> &Signer<'info> {
        &self.authority
    }

    fn leaderboard(&self) -> &Account<'info, Leaderboard> {
        &self.leaderboard
    }
}

/// Archive the current ranking.
/// # CHECK
/// Only the admin can use.
pub(crate) fn unchecked_snapshot_leaderboard(ctx: Context<SnapshotLeaderboard>) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = ctx.accounts;
    let leaderboard = accounts.leaderboard.key();
    let created_by = accounts.authority.key();
    let epoch = accounts.snapshot.init(
        ctx.bumps.snapshot,
        leaderboard,
        &accounts.leaderboard,
        created_by,
        now,
    )?;

    emit!(SnapshotTaken {
        ts: now,
        leaderboard,
        snapshot: accounts.snapshot.key(),
        epoch,
        created_by,
    });
    msg!(
        "[Snapshot] archived epoch {} of {} with {} ranked traders",
        epoch,
        leaderboard,
        accounts.snapshot.ranked.len()
    );
    Ok(epoch)
}
