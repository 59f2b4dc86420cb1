use std::{cmp::Ordering, collections::BTreeSet};

use typed_builder::TypedBuilder;

use crate::Error;

/// Fixed-point unit of a normalized value, `1.0 == NORM_UNIT`.
pub const NORM_UNIT: u128 = 1_000_000_000;

/// Numerator used to turn execution time into speed.
pub const SPEED_SCALE: u128 = 1_000_000_000_000_000_000;

/// Score weights, in basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct ScoreWeights {
    /// Weight of normalized volume.
    #[builder(default = 4_000)]
    pub volume: u32,
    /// Weight of normalized speed (inverse execution time).
    #[builder(default = 2_000)]
    pub speed: u32,
    /// Weight of normalized P&L.
    #[builder(default = 3_000)]
    pub pnl: u32,
    /// Weight of normalized staked amount.
    #[builder(default = 1_000)]
    pub stake: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ScoreWeights {
    /// Sum of all weights.
    pub fn total(&self) -> u64 {
        [self.volume, self.speed, self.pnl, self.stake]
            .iter()
            .map(|w| u64::from(*w))
            .sum()
    }
}

/// A snapshot of trader statistics submitted for ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<K> {
    /// Trader identity.
    pub trader: K,
    /// Accumulated volume.
    pub total_volume: u64,
    /// Running average of execution time.
    pub average_execution_time: u64,
    /// Accumulated P&L.
    pub pnl: i64,
    /// Staked amount.
    pub staked_amount: u64,
    /// Number of accepted trades.
    pub trade_count: u64,
}

/// A ranked trader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedTrader<K> {
    /// Trader identity.
    pub trader: K,
    /// Composite score.
    pub score: u128,
    /// Average execution time, first tie-breaker.
    pub average_execution_time: u64,
}

/// Composite-score ranking over a candidate set.
///
/// `score = w_volume * norm(volume) + w_speed * norm(1 / exec_time) + w_pnl * norm(pnl)
/// + w_stake * norm(staked)`, each `norm` being a min-max normalization over the eligible
/// candidates of the call into `[0, NORM_UNIT]`. A dimension in which every candidate has the
/// same value normalizes to `NORM_UNIT` for all of them.
///
/// Ties are broken by lower average execution time, then by lower trader id, so the output
/// does not depend on the order of the input.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RankingEngine {
    /// Score weights.
    #[builder(default)]
    weights: ScoreWeights,
    /// New-account dampening threshold.
    #[builder(default = 3)]
    min_trades: u64,
    /// Maximum length of the output.
    #[builder(default = 100)]
    cap: usize,
}

impl RankingEngine {
    /// Rank the candidates.
    ///
    /// # Errors
    /// - [`Error::EmptyCandidateSet`] if nothing is left to rank after the eligibility filter.
    /// - [`Error::DuplicateCandidate`] if a trader appears twice.
    /// - [`Error::InvalidArgument`] if all weights are zero or the cap is zero.
    pub fn rank<K: Ord + Clone>(
        &self,
        candidates: &[Candidate<K>],
    ) -> crate::Result<Vec<RankedTrader<K>>> {
        if self.weights.total() == 0 {
            return Err(Error::invalid_argument("all score weights are zero"));
        }
        if self.cap == 0 {
            return Err(Error::invalid_argument("ranking cap is zero"));
        }
        if candidates.is_empty() {
            return Err(Error::EmptyCandidateSet);
        }

        let mut seen = BTreeSet::new();
        if !candidates.iter().all(|c| seen.insert(&c.trader)) {
            return Err(Error::DuplicateCandidate);
        }

        let eligible = candidates
            .iter()
            .filter(|c| c.trade_count >= self.min_trades && c.average_execution_time > 0)
            .collect::<Vec<_>>();
        if eligible.is_empty() {
            return Err(Error::EmptyCandidateSet);
        }

        let volume = min_max_normalize(eligible.iter().map(|c| i128::from(c.total_volume)));
        let speed = min_max_normalize(eligible.iter().map(|c| speed(c.average_execution_time)));
        let pnl = min_max_normalize(eligible.iter().map(|c| i128::from(c.pnl)));
        let stake = min_max_normalize(eligible.iter().map(|c| i128::from(c.staked_amount)));

        let mut ranked = eligible
            .iter()
            .enumerate()
            .map(|(idx, c)| {
                let score = [
                    (self.weights.volume, volume[idx]),
                    (self.weights.speed, speed[idx]),
                    (self.weights.pnl, pnl[idx]),
                    (self.weights.stake, stake[idx]),
                ]
                .iter()
                .try_fold(0u128, |acc, (weight, norm)| {
                    u128::from(*weight)
                        .checked_mul(*norm)
                        .and_then(|term| acc.checked_add(term))
                })
                .ok_or(Error::Overflow("score"))?;
                Ok(RankedTrader {
                    trader: c.trader.clone(),
                    score,
                    average_execution_time: c.average_execution_time,
                })
            })
            .collect::<crate::Result<Vec<_>>>()?;

        ranked.sort_by(compare_ranked);
        ranked.truncate(self.cap);
        Ok(ranked)
    }
}

fn compare_ranked<K: Ord>(a: &RankedTrader<K>, b: &RankedTrader<K>) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.average_execution_time.cmp(&b.average_execution_time))
        .then_with(|| a.trader.cmp(&b.trader))
}

fn speed(average_execution_time: u64) -> i128 {
    let speed = SPEED_SCALE
        .checked_div(u128::from(average_execution_time))
        .unwrap_or(SPEED_SCALE);
    // `SPEED_SCALE` is far below `i128::MAX`.
    i128::try_from(speed).unwrap_or(i128::MAX)
}

/// Min-max normalize into `[0, NORM_UNIT]`.
fn min_max_normalize(values: impl Iterator<Item = i128> + Clone) -> Vec<u128> {
    let (min, max) = values
        .clone()
        .fold((i128::MAX, i128::MIN), |(min, max), v| (min.min(v), max.max(v)));
    let range = max.abs_diff(min);
    values
        .map(|v| {
            if range == 0 {
                return NORM_UNIT;
            }
            // Inputs come from `u64`/`i64`, so `offset * NORM_UNIT` fits in `u128`.
            v.abs_diff(min)
                .saturating_mul(NORM_UNIT)
                .checked_div(range)
                .unwrap_or(NORM_UNIT)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(trader: u32, volume: u64, exec: u64, pnl: i64) -> Candidate<u32> {
        Candidate {
            trader,
            total_volume: volume,
            average_execution_time: exec,
            pnl,
            staked_amount: 0,
            trade_count: 10,
        }
    }

    #[test]
    fn single_candidate_takes_the_full_score() -> crate::Result<()> {
        let engine = RankingEngine::builder().build();
        let ranked = engine.rank(&[candidate(1, 5_000, 250, 200)])?;
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].trader, 1);
        assert_eq!(
            ranked[0].score,
            u128::from(ScoreWeights::default().total()) * NORM_UNIT
        );
        Ok(())
    }

    #[test]
    fn normalizes_with_min_max() {
        let norms = min_max_normalize([10i128, 20, 30].into_iter());
        assert_eq!(norms, vec![0, NORM_UNIT / 2, NORM_UNIT]);
        let negative = min_max_normalize([-100i128, 0, 100].into_iter());
        assert_eq!(negative, vec![0, NORM_UNIT / 2, NORM_UNIT]);
    }

    #[test]
    fn ranks_by_weighted_score() -> crate::Result<()> {
        let engine = RankingEngine::builder()
            .weights(ScoreWeights::builder().volume(1).speed(0).pnl(0).stake(0).build())
            .build();
        let ranked = engine.rank(&[
            candidate(1, 100, 10, 0),
            candidate(2, 300, 10, 0),
            candidate(3, 200, 10, 0),
        ])?;
        let order = ranked.iter().map(|r| r.trader).collect::<Vec<_>>();
        assert_eq!(order, vec![2, 3, 1]);
        Ok(())
    }

    #[test]
    fn faster_execution_scores_higher() -> crate::Result<()> {
        let engine = RankingEngine::builder()
            .weights(ScoreWeights::builder().volume(0).speed(1).pnl(0).stake(0).build())
            .build();
        let ranked = engine.rank(&[candidate(1, 100, 500, 0), candidate(2, 100, 50, 0)])?;
        assert_eq!(ranked[0].trader, 2);
        assert_eq!(ranked[1].score, 0);
        Ok(())
    }

    #[test]
    fn breaks_ties_by_execution_time_then_id() -> crate::Result<()> {
        let engine = RankingEngine::builder()
            .weights(ScoreWeights::builder().volume(1).speed(0).pnl(0).stake(0).build())
            .build();
        let ranked = engine.rank(&[
            candidate(5, 100, 20, 0),
            candidate(4, 100, 20, 0),
            candidate(3, 100, 10, 0),
        ])?;
        let order = ranked.iter().map(|r| r.trader).collect::<Vec<_>>();
        assert_eq!(order, vec![3, 4, 5]);
        Ok(())
    }

    #[test]
    fn excludes_new_accounts() -> crate::Result<()> {
        let engine = RankingEngine::builder().min_trades(3).build();
        let mut sybil = candidate(1, 1_000_000, 1, 1_000_000);
        sybil.trade_count = 2;
        let ranked = engine.rank(&[sybil.clone(), candidate(2, 10, 100, 0)])?;
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].trader, 2);
        assert_eq!(engine.rank(&[sybil]), Err(Error::EmptyCandidateSet));
        Ok(())
    }

    #[test]
    fn rejects_empty_and_duplicates() {
        let engine = RankingEngine::builder().build();
        assert_eq!(engine.rank::<u32>(&[]), Err(Error::EmptyCandidateSet));
        assert_eq!(
            engine.rank(&[candidate(1, 1, 1, 1), candidate(1, 2, 2, 2)]),
            Err(Error::DuplicateCandidate)
        );
    }

    #[test]
    fn truncates_to_cap() -> crate::Result<()> {
        let engine = RankingEngine::builder().cap(2).build();
        let candidates = (0..5)
            .map(|i| candidate(i, 100 * u64::from(i + 1), 10, 0))
            .collect::<Vec<_>>();
        let ranked = engine.rank(&candidates)?;
        assert_eq!(
            ranked.iter().map(|r| r.trader).collect::<Vec<_>>(),
            vec![4, 3]
        );
        Ok(())
    }

    #[test]
    fn rejects_zero_weights() {
        let engine = RankingEngine::builder()
            .weights(ScoreWeights::builder().volume(0).speed(0).pnl(0).stake(0).build())
            .build();
        assert!(matches!(
            engine.rank(&[candidate(1, 1, 1, 1)]),
            Err(Error::InvalidArgument(_))
        ));
    }
}
