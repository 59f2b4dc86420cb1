use anchor_lang::prelude::*;

use crate::{constants::MAX_RANKED_LEN, error::LeaderboardError};

use super::{Leaderboard, RankedEntry};

/// Write-once copy of a ranking.
#[account]
#[derive(InitSpace, Default)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct LeaderboardSnapshot {
    /// Bump seed.
    pub bump: u8,
    /// The leaderboard the snapshot was taken from.
    pub leaderboard: Pubkey,
    /// The epoch of the ranking.
    pub epoch: u64,
    /// Time the snapshot was taken.
    pub timestamp: i64,
    /// The admin that took the snapshot.
    pub created_by: Pubkey,
    /// Ranked traders with their scores, highest rank first.
    #[max_len(MAX_RANKED_LEN)]
    pub ranked: Vec<RankedEntry>,
}

impl LeaderboardSnapshot {
    /// Copy the current ranking of `source`, returning the snapshot epoch.
    pub(crate) fn init(
        &mut self,
        bump: u8,
        leaderboard: Pubkey,
        source: &Leaderboard,
        created_by: Pubkey,
        now: i64,
    ) -> Result<u64> {
        require!(source.has_ranking(), LeaderboardError::NoLeaderboardYet);
        self.bump = bump;
        self.leaderboard = leaderboard;
        self.epoch = source.epoch;
        self.timestamp = now;
        self.created_by = created_by;
        self.ranked = source.ranked.clone();
        Ok(self.epoch)
    }
}

#[cfg(test)]
mod tests {
    use t2e_model::RankedTrader;

    use super::*;

    #[test]
    fn copy_the_current_ranking() -> Result<()> {
        let mut leaderboard = Leaderboard::default();
        let admin = Pubkey::new_unique();
        leaderboard.init(
            255,
            admin,
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            0,
        );

        let mut snapshot = LeaderboardSnapshot::default();
        let err = snapshot
            .init(1, Pubkey::new_unique(), &leaderboard, admin, 10)
            .expect_err("no ranking yet");
        assert_eq!(err, Error::from(LeaderboardError::NoLeaderboardYet));

        let trader = Pubkey::new_unique();
        leaderboard.commit_ranking(
            &[RankedTrader {
                trader,
                score: 7,
                average_execution_time: 1,
            }],
            10,
        )?;
        assert_eq!(
            snapshot.init(1, Pubkey::new_unique(), &leaderboard, admin, 10)?,
            1
        );
        assert!(snapshot.ranked == vec![RankedEntry { trader, score: 7 }]);
        assert_eq!(snapshot.created_by, admin);
        Ok(())
    }
}
