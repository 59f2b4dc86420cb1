use typed_builder::TypedBuilder;

use crate::{stats::average_volume, Error};

/// A trade reported for a trader, before it is applied to the trader's statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedTrade<K> {
    /// Traded volume, must be positive.
    pub volume: u64,
    /// Execution time, must be positive. Lower is better.
    pub execution_time: u64,
    /// Realized profit and loss of the trade.
    pub pnl_delta: i64,
    /// The counter-identity of the trade, if the reporter knows it.
    pub counterparty: Option<K>,
    /// The time the trade is being recorded at.
    pub timestamp: i64,
}

impl<K> ProposedTrade<K> {
    /// Check the basic input ranges.
    pub fn validate(&self) -> crate::Result<()> {
        if self.volume == 0 {
            return Err(Error::invalid_argument("volume must be positive"));
        }
        if self.execution_time == 0 {
            return Err(Error::invalid_argument("execution time must be positive"));
        }
        Ok(())
    }
}

/// Read access to the history of a trader that the filter needs.
pub trait TradeHistory<K> {
    /// Number of accepted trades.
    fn trade_count(&self) -> u64;

    /// Accumulated volume.
    fn total_volume(&self) -> u64;

    /// Timestamp of the last accepted trade.
    fn last_trade_timestamp(&self) -> i64;

    /// Number of consecutive accepted round-trip suspects.
    fn round_trip_streak(&self) -> u8;

    /// Counterparty of the last accepted trade, if it was reported.
    fn last_counterparty(&self) -> Option<&K>;
}

/// Parameters of the [`AntiAbuseFilter`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct AntiAbuseParams {
    /// Minimum seconds between two trades of the same trader.
    #[builder(default = 10)]
    pub min_trade_interval: i64,
    /// Volume ceiling for a trader without history, and the upper bound of any ceiling.
    #[builder(default = 1_000_000_000)]
    pub base_volume_ceiling: u64,
    /// With history, the ceiling is `average volume * multiplier`.
    #[builder(default = 20)]
    pub volume_ceiling_multiplier: u64,
    /// A trade with `|pnl_delta| <= epsilon` is considered flat.
    #[builder(default = 0)]
    pub round_trip_pnl_epsilon: u64,
    /// Flat trades at or above this volume are round-trip suspects.
    #[builder(default = 100_000)]
    pub round_trip_min_volume: u64,
    /// Number of consecutive suspects tolerated.
    #[builder(default = 3)]
    pub max_round_trip_streak: u8,
    /// Minimum number of trades before a trader may be ranked.
    #[builder(default = 3)]
    pub min_trades_for_ranking: u64,
}

impl Default for AntiAbuseParams {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// The reason of a rejection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    /// Traded again before the minimum interval elapsed.
    #[error("rate limited: {elapsed}s since last trade, {required}s required")]
    RateLimited {
        /// Seconds since the last trade.
        elapsed: i64,
        /// Required seconds.
        required: i64,
    },
    /// Volume is disproportionate to the trader's history.
    #[error("volume {volume} is above the ceiling {ceiling}")]
    VolumeAboveCeiling {
        /// Proposed volume.
        volume: u64,
        /// Allowed ceiling.
        ceiling: u64,
    },
    /// The trader reported itself as the counterparty.
    #[error("self trade")]
    SelfTrade,
    /// Flat, large trade repeated against the same counterparty.
    #[error("repeated round trip with the same counterparty")]
    RoundTripWithSameCounterparty,
    /// Too many flat, large trades in a row.
    #[error("too many consecutive round trips: {streak}")]
    RepeatedRoundTrips {
        /// The streak the trade would have reached.
        streak: u8,
    },
}

/// The decision of the [`AntiAbuseFilter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The trade may be applied.
    Accept,
    /// The trade must not be applied.
    Reject(RejectReason),
}

impl Verdict {
    /// Returns whether the trade is accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accept)
    }
}

/// Deterministic wash-trade and sybil heuristics.
///
/// The filter only reads; applying an accepted trade is the caller's business. Round-trip
/// detection is best-effort: it catches the cheap patterns, not every form of abuse.
#[derive(Debug, Clone, Default)]
pub struct AntiAbuseFilter {
    params: AntiAbuseParams,
}

impl AntiAbuseFilter {
    /// Create a filter with the given params.
    pub fn new(params: AntiAbuseParams) -> Self {
        Self { params }
    }

    /// Get the params.
    pub fn params(&self) -> &AntiAbuseParams {
        &self.params
    }

    /// Evaluate a proposed trade of `trader` against its history.
    pub fn evaluate<K: PartialEq>(
        &self,
        trader: &K,
        trade: &ProposedTrade<K>,
        history: &impl TradeHistory<K>,
    ) -> Verdict {
        if history.trade_count() > 0 {
            let elapsed = trade
                .timestamp
                .saturating_sub(history.last_trade_timestamp());
            if elapsed < self.params.min_trade_interval {
                return Verdict::Reject(RejectReason::RateLimited {
                    elapsed,
                    required: self.params.min_trade_interval,
                });
            }
        }

        let ceiling = self.volume_ceiling(history);
        if trade.volume > ceiling {
            return Verdict::Reject(RejectReason::VolumeAboveCeiling {
                volume: trade.volume,
                ceiling,
            });
        }

        if trade.counterparty.as_ref() == Some(trader) {
            return Verdict::Reject(RejectReason::SelfTrade);
        }

        if self.is_round_trip_suspect(trade) {
            let repeated_counterparty = trade.counterparty.is_some()
                && trade.counterparty.as_ref() == history.last_counterparty();
            if repeated_counterparty && history.round_trip_streak() > 0 {
                return Verdict::Reject(RejectReason::RoundTripWithSameCounterparty);
            }
            let streak = history.round_trip_streak().saturating_add(1);
            if streak > self.params.max_round_trip_streak {
                return Verdict::Reject(RejectReason::RepeatedRoundTrips { streak });
            }
        }

        Verdict::Accept
    }

    /// The per-trade volume ceiling for the given history.
    ///
    /// A trader without history gets the base ceiling. Otherwise the ceiling follows the
    /// trader's own average volume, bounded by the base ceiling.
    pub fn volume_ceiling<K>(&self, history: &impl TradeHistory<K>) -> u64 {
        if history.trade_count() == 0 {
            return self.params.base_volume_ceiling;
        }
        let average = average_volume(history.total_volume(), history.trade_count());
        average
            .saturating_mul(self.params.volume_ceiling_multiplier)
            .min(self.params.base_volume_ceiling)
    }

    /// Returns whether the trade is flat and large.
    pub fn is_round_trip_suspect<K>(&self, trade: &ProposedTrade<K>) -> bool {
        trade.pnl_delta.unsigned_abs() <= self.params.round_trip_pnl_epsilon
            && trade.volume >= self.params.round_trip_min_volume
    }

    /// The round-trip streak after the trade has been accepted.
    pub fn round_trip_streak_after<K>(
        &self,
        trade: &ProposedTrade<K>,
        history: &impl TradeHistory<K>,
    ) -> u8 {
        if self.is_round_trip_suspect(trade) {
            history.round_trip_streak().saturating_add(1)
        } else {
            0
        }
    }

    /// New-account dampening: whether a trader has enough trades to be ranked.
    pub fn is_eligible_for_ranking(&self, trade_count: u64) -> bool {
        trade_count >= self.params.min_trades_for_ranking
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct History {
        trade_count: u64,
        total_volume: u64,
        last_trade_timestamp: i64,
        round_trip_streak: u8,
        last_counterparty: Option<u32>,
    }

    impl TradeHistory<u32> for History {
        fn trade_count(&self) -> u64 {
            self.trade_count
        }

        fn total_volume(&self) -> u64 {
            self.total_volume
        }

        fn last_trade_timestamp(&self) -> i64 {
            self.last_trade_timestamp
        }

        fn round_trip_streak(&self) -> u8 {
            self.round_trip_streak
        }

        fn last_counterparty(&self) -> Option<&u32> {
            self.last_counterparty.as_ref()
        }
    }

    fn trade(
        volume: u64,
        pnl_delta: i64,
        counterparty: Option<u32>,
        timestamp: i64,
    ) -> ProposedTrade<u32> {
        ProposedTrade {
            volume,
            execution_time: 100,
            pnl_delta,
            counterparty,
            timestamp,
        }
    }

    #[test]
    fn accepts_first_trade() {
        let filter = AntiAbuseFilter::default();
        let verdict = filter.evaluate(&1, &trade(5_000, 200, None, 1_000), &History::default());
        assert_eq!(verdict, Verdict::Accept);
    }

    #[test]
    fn rate_limits_rapid_trades() {
        let filter = AntiAbuseFilter::default();
        let history = History {
            trade_count: 1,
            total_volume: 5_000,
            last_trade_timestamp: 1_000,
            ..Default::default()
        };
        assert_eq!(
            filter.evaluate(&1, &trade(5_000, 1, None, 1_009), &history),
            Verdict::Reject(RejectReason::RateLimited {
                elapsed: 9,
                required: 10
            })
        );
        assert!(filter
            .evaluate(&1, &trade(5_000, 1, None, 1_010), &history)
            .is_accepted());
    }

    #[test]
    fn volume_ceiling_follows_history() {
        let filter = AntiAbuseFilter::new(
            AntiAbuseParams::builder()
                .base_volume_ceiling(100_000)
                .volume_ceiling_multiplier(5)
                .build(),
        );
        let fresh = History::default();
        assert_eq!(filter.volume_ceiling(&fresh), 100_000);
        assert!(!filter
            .evaluate(&1, &trade(100_001, 1, None, 0), &fresh)
            .is_accepted());

        let seasoned = History {
            trade_count: 4,
            total_volume: 40_000,
            ..Default::default()
        };
        assert_eq!(filter.volume_ceiling(&seasoned), 50_000);
        assert!(filter
            .evaluate(&1, &trade(50_000, 1, None, 100), &seasoned)
            .is_accepted());
        assert_eq!(
            filter.evaluate(&1, &trade(50_001, 1, None, 100), &seasoned),
            Verdict::Reject(RejectReason::VolumeAboveCeiling {
                volume: 50_001,
                ceiling: 50_000
            })
        );

        // The base ceiling still bounds large traders.
        let whale = History {
            trade_count: 2,
            total_volume: 80_000,
            ..Default::default()
        };
        assert_eq!(filter.volume_ceiling(&whale), 100_000);
    }

    #[test]
    fn rejects_volume_far_above_own_average() {
        let filter = AntiAbuseFilter::default();
        let history = History {
            trade_count: 5,
            total_volume: 500,
            ..Default::default()
        };
        assert_eq!(filter.volume_ceiling(&history), 2_000);
        assert_eq!(
            filter.evaluate(&1, &trade(999_999_999, 1, None, 100), &history),
            Verdict::Reject(RejectReason::VolumeAboveCeiling {
                volume: 999_999_999,
                ceiling: 2_000
            })
        );
        assert!(filter
            .evaluate(&1, &trade(2_000, 1, None, 100), &history)
            .is_accepted());
    }

    #[test]
    fn rejects_self_trade() {
        let filter = AntiAbuseFilter::default();
        assert_eq!(
            filter.evaluate(&7, &trade(10, 1, Some(7), 0), &History::default()),
            Verdict::Reject(RejectReason::SelfTrade)
        );
    }

    #[test]
    fn rejects_round_trip_with_same_counterparty() {
        let filter = AntiAbuseFilter::default();
        let history = History {
            trade_count: 1,
            total_volume: 200_000,
            round_trip_streak: 1,
            last_counterparty: Some(9),
            ..Default::default()
        };
        let flat = trade(200_000, 0, Some(9), 100);
        assert_eq!(
            filter.evaluate(&1, &flat, &history),
            Verdict::Reject(RejectReason::RoundTripWithSameCounterparty)
        );
        let other = trade(200_000, 0, Some(8), 100);
        assert!(filter.evaluate(&1, &other, &history).is_accepted());
        assert_eq!(filter.round_trip_streak_after(&other, &history), 2);
    }

    #[test]
    fn rejects_long_round_trip_streaks() {
        let filter = AntiAbuseFilter::default();
        let history = History {
            trade_count: 3,
            total_volume: 600_000,
            round_trip_streak: 3,
            ..Default::default()
        };
        assert_eq!(
            filter.evaluate(&1, &trade(200_000, 0, None, 100), &history),
            Verdict::Reject(RejectReason::RepeatedRoundTrips { streak: 4 })
        );
        let profitable = trade(200_000, 50, None, 100);
        assert!(filter.evaluate(&1, &profitable, &history).is_accepted());
        assert_eq!(filter.round_trip_streak_after(&profitable, &history), 0);
    }

    #[test]
    fn small_flat_trades_are_not_suspects() {
        let filter = AntiAbuseFilter::default();
        assert!(!filter.is_round_trip_suspect(&trade(99_999, 0, None, 0)));
        assert!(filter.is_round_trip_suspect(&trade(100_000, 0, None, 0)));
    }

    #[test]
    fn dampens_new_accounts() {
        let filter = AntiAbuseFilter::default();
        assert!(!filter.is_eligible_for_ranking(2));
        assert!(filter.is_eligible_for_ranking(3));
    }

    #[test]
    fn validates_input() {
        assert!(trade(0, 0, None, 0).validate().is_err());
        let mut zero_time = trade(1, 0, None, 0);
        zero_time.execution_time = 0;
        assert!(zero_time.validate().is_err());
        assert!(trade(1, 0, None, 0).validate().is_ok());
    }
}
