use anchor_lang::prelude::*;

use crate::{
    events::{ConfigUpdated, PauseToggled, RoleUpdated},
    states::{ConfigKey, Leaderboard},
    utils::Authentication,
    LeaderboardError,
};

/// The accounts definition for the admin instructions.
#[derive(Accounts)]
pub struct ConfigureLeaderboard<'info> {
    /// The admin.
    pub authority: Signer<'info>,
    /// Leaderboard to configure.
    #[account(mut)]
    pub leaderboard: Box<Account<'info, Leaderboard>>,
}

impl<'info> Authentication<'info> for ConfigureLeaderboard<'info> {
    fn authority(&self) -> &Signer<'info> {
        &self.authority
    }

    fn leaderboard(&self) -> &Account<'info, Leaderboard> {
        &self.leaderboard
    }
}

/// Set the emergency pause flag.
/// # CHECK
/// Only the admin can use.
pub(crate) fn unchecked_set_pause(ctx: Context<ConfigureLeaderboard>, paused: bool) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let leaderboard = &mut ctx.accounts.leaderboard;
    let previous = leaderboard.set_pause(paused);
    emit!(PauseToggled {
        ts: now,
        leaderboard: leaderboard.key(),
        paused,
    });
    msg!("[Admin] emergency pause: {} -> {}", previous, paused);
    Ok(())
}

/// Update a config value.
/// # CHECK
/// Only the admin can use.
pub(crate) fn unchecked_update_config(
    ctx: Context<ConfigureLeaderboard>,
    key: &str,
    value: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let config_key = key
        .parse::<ConfigKey>()
        .map_err(|_| error!(LeaderboardError::InvalidConfig))?;
    let leaderboard = &mut ctx.accounts.leaderboard;
    let previous = leaderboard.config.set(config_key, value)?;
    emit!(ConfigUpdated {
        ts: now,
        leaderboard: leaderboard.key(),
        key: config_key.to_string(),
        previous,
        value,
    });
    msg!(
        "[Admin] config `{}` has been updated from {} to {}",
        config_key,
        previous,
        value
    );
    Ok(())
}

/// Set the updater.
/// # CHECK
/// Only the admin can use.
pub(crate) fn unchecked_set_updater(
    ctx: Context<ConfigureLeaderboard>,
    updater: Pubkey,
) -> Result<()> {
    let previous = ctx.accounts.leaderboard.set_updater(updater)?;
    emit_role_updated(&ctx.accounts.leaderboard, "updater", previous, updater)
}

/// Set the reporter.
/// # CHECK
/// Only the admin can use.
pub(crate) fn unchecked_set_reporter(
    ctx: Context<ConfigureLeaderboard>,
    reporter: Pubkey,
) -> Result<()> {
    let previous = ctx.accounts.leaderboard.set_reporter(reporter)?;
    emit_role_updated(&ctx.accounts.leaderboard, "reporter", previous, reporter)
}

/// Start an authority transfer.
/// # CHECK
/// Only the admin can use.
pub(crate) fn unchecked_transfer_authority(
    ctx: Context<ConfigureLeaderboard>,
    next_authority: Pubkey,
) -> Result<()> {
    ctx.accounts.leaderboard.transfer_authority(next_authority)?;
    msg!(
        "[Admin] authority transfer to {} is pending acceptance",
        next_authority
    );
    Ok(())
}

/// The accounts definition for [`accept_authority`](crate::t2e_leaderboard::accept_authority).
#[derive(Accounts)]
pub struct AcceptAuthority<'info> {
    /// The pending authority.
    pub pending_authority: Signer<'info>,
    /// Leaderboard.
    #[account(mut)]
    pub leaderboard: Box<Account<'info, Leaderboard>>,
}

pub(crate) fn accept_authority(ctx: Context<AcceptAuthority>) -> Result<()> {
    let next = ctx.accounts.pending_authority.key();
    let previous = ctx.accounts.leaderboard.accept_authority(&next)?;
    emit_role_updated(&ctx.accounts.leaderboard, "authority", previous, next)
}

fn emit_role_updated(
    leaderboard: &Account<'_, Leaderboard>,
    role: &str,
    previous: Pubkey,
    current: Pubkey,
) -> Result<()> {
    emit!(RoleUpdated {
        ts: Clock::get()?.unix_timestamp,
        leaderboard: leaderboard.key(),
        role: role.to_string(),
        previous,
        current,
    });
    msg!("[Admin] {} has been updated from {} to {}", role, previous, current);
    Ok(())
}
