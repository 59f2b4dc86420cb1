use typed_builder::TypedBuilder;

use crate::Error;

/// Halvings are capped here, which already shifts any `u64` amount down to zero.
const MAX_HALVINGS: i64 = 64;

/// How a reward amount is split among the top traders.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    num_enum::TryFromPrimitive,
    num_enum::IntoPrimitive,
)]
#[cfg_attr(feature = "strum", derive(strum::EnumString, strum::Display))]
#[cfg_attr(feature = "strum", strum(serialize_all = "snake_case"))]
#[repr(u8)]
#[non_exhaustive]
pub enum RewardSplit {
    /// Every recipient gets `amount / top_n`.
    #[default]
    Equal,
    /// Each recipient gets `amount * score / total_score`.
    ScoreWeighted,
}

/// A single payout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payout<K> {
    /// Recipient trader.
    pub trader: K,
    /// Amount to transfer.
    pub amount: u64,
}

/// Computes payouts from a ranking.
///
/// Integer division leaves a remainder in the pool, so the sum of the payouts never exceeds
/// the effective reward amount.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RewardDistributor {
    /// Split policy.
    #[builder(default)]
    split: RewardSplit,
    /// Halving period in seconds, `0` disables halving.
    #[builder(default = 0)]
    halving_period: i64,
    /// Time the reward schedule started.
    #[builder(default = 0)]
    genesis: i64,
}

impl RewardDistributor {
    /// Number of halvings elapsed at `now`.
    pub fn halvings(&self, now: i64) -> u32 {
        if self.halving_period <= 0 {
            return 0;
        }
        let elapsed = now.saturating_sub(self.genesis).max(0);
        let halvings = elapsed
            .checked_div(self.halving_period)
            .unwrap_or(0)
            .min(MAX_HALVINGS);
        // Bounded by `MAX_HALVINGS`.
        u32::try_from(halvings).unwrap_or(0)
    }

    /// The reward amount after halvings.
    pub fn effective_amount(&self, reward_amount: u64, now: i64) -> u64 {
        reward_amount
            .checked_shr(self.halvings(now))
            .unwrap_or(0)
    }

    /// Compute the payouts of `reward_amount` for the first `top_n` entries of `ranked`, given
    /// as `(trader, score)` pairs in rank order.
    ///
    /// # Errors
    /// - [`Error::InvalidTopN`] if `top_n` is zero or larger than the ranking.
    /// - [`Error::InvalidArgument`] if the effective amount cannot pay anything.
    /// - [`Error::NoValidScores`] for a score-weighted split over zero scores.
    pub fn plan<K: Clone>(
        &self,
        ranked: &[(K, u128)],
        top_n: u64,
        reward_amount: u64,
        now: i64,
    ) -> crate::Result<Vec<Payout<K>>> {
        let n = usize::try_from(top_n)
            .ok()
            .filter(|n| *n != 0 && *n <= ranked.len())
            .ok_or(Error::InvalidTopN {
                requested: top_n,
                ranked: ranked.len(),
            })?;
        if reward_amount == 0 {
            return Err(Error::invalid_argument("reward amount must be positive"));
        }
        let amount = self.effective_amount(reward_amount, now);
        let recipients = &ranked[..n];

        let payouts = match self.split {
            RewardSplit::Equal => {
                let share = amount
                    .checked_div(top_n)
                    .ok_or(Error::Overflow("equal share"))?;
                recipients
                    .iter()
                    .map(|(trader, _)| Payout {
                        trader: trader.clone(),
                        amount: share,
                    })
                    .collect::<Vec<_>>()
            }
            RewardSplit::ScoreWeighted => {
                let total_score = recipients
                    .iter()
                    .try_fold(0u128, |acc, (_, score)| acc.checked_add(*score))
                    .ok_or(Error::Overflow("total score"))?;
                if total_score == 0 {
                    return Err(Error::NoValidScores);
                }
                recipients
                    .iter()
                    .map(|(trader, score)| {
                        let share = weighted_share(amount, *score, total_score)?;
                        Ok(Payout {
                            trader: trader.clone(),
                            amount: share,
                        })
                    })
                    .collect::<crate::Result<Vec<_>>>()?
            }
        };

        if payouts.iter().all(|p| p.amount == 0) {
            return Err(Error::invalid_argument(
                "reward amount is too small to be distributed",
            ));
        }
        Ok(payouts)
    }
}

/// `amount * score / total_score`, rounded down.
fn weighted_share(amount: u64, score: u128, total_score: u128) -> crate::Result<u64> {
    // Scale both sides down until the product fits, keeping the ratio.
    let mut score = score;
    let mut total = total_score;
    loop {
        if let Some(product) = u128::from(amount).checked_mul(score) {
            let share = product
                .checked_div(total)
                .ok_or(Error::Overflow("weighted share"))?;
            return u64::try_from(share).map_err(|_| Error::Overflow("weighted share"));
        }
        score = score.checked_shr(1).unwrap_or(0);
        total = total.checked_shr(1).unwrap_or(0);
        if total == 0 {
            return Err(Error::Overflow("weighted share"));
        }
    }
}
