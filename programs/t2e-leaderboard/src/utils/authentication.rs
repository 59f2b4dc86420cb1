use anchor_lang::{prelude::*, Bumps};

use crate::{states::Leaderboard, LeaderboardError};

/// Accounts that can be used for authentication.
pub(crate) trait Authentication<'info> {
    /// Get the authority to check.
    fn authority(&self) -> &Signer<'info>;

    /// Get the leaderboard account.
    fn leaderboard(&self) -> &Account<'info, Leaderboard>;

    /// Check that the `authority` is the admin.
    fn only_admin(&self) -> Result<()> {
        require!(
            self.leaderboard().is_authority(self.authority().key),
            LeaderboardError::Unauthorized
        );
        Ok(())
    }

    /// Check that the `authority` is the updater or the admin.
    fn only_updater(&self) -> Result<()> {
        require!(
            self.leaderboard().is_updater(self.authority().key),
            LeaderboardError::Unauthorized
        );
        Ok(())
    }
}

/// Provides access control utils for [`Authentication`]s.
pub(crate) trait Authenticate<'info>: Authentication<'info> + Bumps + Sized {
    /// Check that the `authority` is the admin.
    fn only_admin(ctx: &Context<Self>) -> Result<()> {
        ctx.accounts.only_admin()
    }

    /// Check that the `authority` is the updater or the admin.
    fn only_updater(ctx: &Context<Self>) -> Result<()> {
        ctx.accounts.only_updater()
    }
}

impl<'info, T> Authenticate<'info> for T where T: Authentication<'info> + Bumps + Sized {}
