use std::num::NonZeroU64;

use anchor_lang::prelude::*;
use t2e_model::{
    AntiAbuseParams, Payout, RankedTrader, RankingEngine, RewardDistributor, RewardSplit,
    ScoreWeights,
};

use crate::{
    constants::*,
    error::{LeaderboardError, ModelError},
};

/// A ranked trader.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, PartialEq, Eq, InitSpace)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct RankedEntry {
    /// The trader address.
    pub trader: Pubkey,
    /// The composite score of the trader in the ranking round.
    pub score: u128,
}

impl From<&RankedTrader<Pubkey>> for RankedEntry {
    fn from(ranked: &RankedTrader<Pubkey>) -> Self {
        Self {
            trader: ranked.trader,
            score: ranked.score,
        }
    }
}

/// Keys of [`LeaderboardConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[non_exhaustive]
pub enum ConfigKey {
    /// Leaderboard cap.
    MaxRanked,
    /// Minimum seconds between two trades of a trader.
    MinTradeInterval,
    /// Minimum seconds between two leaderboard updates.
    MinUpdateInterval,
    /// Per-trade volume ceiling without history.
    BaseVolumeCeiling,
    /// Volume ceiling multiplier of the average volume.
    VolumeCeilingMultiplier,
    /// P&L epsilon of a flat trade.
    RoundTripPnlEpsilon,
    /// Minimum volume of a round-trip suspect.
    RoundTripMinVolume,
    /// Tolerated consecutive round-trip suspects.
    MaxRoundTripStreak,
    /// New-account dampening threshold.
    MinTradesForRanking,
    /// Volume weight.
    WeightVolume,
    /// Speed weight.
    WeightSpeed,
    /// P&L weight.
    WeightPnl,
    /// Stake weight.
    WeightStake,
    /// Divisor of the fee discount.
    FeeDiscountDivisor,
    /// Reward split policy.
    RewardSplit,
    /// Reward halving period.
    HalvingPeriod,
}

/// Runtime config of a [`Leaderboard`].
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct LeaderboardConfig {
    max_ranked: u8,
    max_round_trip_streak: u8,
    reward_split: u8,
    min_trade_interval: i64,
    min_update_interval: i64,
    halving_period: i64,
    base_volume_ceiling: u64,
    volume_ceiling_multiplier: u64,
    round_trip_pnl_epsilon: u64,
    round_trip_min_volume: u64,
    min_trades_for_ranking: u64,
    fee_discount_divisor: u64,
    weight_volume: u32,
    weight_speed: u32,
    weight_pnl: u32,
    weight_stake: u32,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            max_ranked: MAX_RANKED_LEN,
            max_round_trip_streak: DEFAULT_MAX_ROUND_TRIP_STREAK,
            reward_split: RewardSplit::Equal.into(),
            min_trade_interval: DEFAULT_MIN_TRADE_INTERVAL,
            min_update_interval: DEFAULT_MIN_UPDATE_INTERVAL,
            halving_period: DEFAULT_HALVING_PERIOD,
            base_volume_ceiling: DEFAULT_BASE_VOLUME_CEILING,
            volume_ceiling_multiplier: DEFAULT_VOLUME_CEILING_MULTIPLIER,
            round_trip_pnl_epsilon: DEFAULT_ROUND_TRIP_PNL_EPSILON,
            round_trip_min_volume: DEFAULT_ROUND_TRIP_MIN_VOLUME,
            min_trades_for_ranking: DEFAULT_MIN_TRADES_FOR_RANKING,
            fee_discount_divisor: DEFAULT_FEE_DISCOUNT_DIVISOR,
            weight_volume: DEFAULT_WEIGHT_VOLUME,
            weight_speed: DEFAULT_WEIGHT_SPEED,
            weight_pnl: DEFAULT_WEIGHT_PNL,
            weight_stake: DEFAULT_WEIGHT_STAKE,
        }
    }
}

impl LeaderboardConfig {
    /// Get the value of the given key.
    pub fn get(&self, key: ConfigKey) -> u64 {
        match key {
            ConfigKey::MaxRanked => self.max_ranked.into(),
            ConfigKey::MinTradeInterval => self.min_trade_interval.unsigned_abs(),
            ConfigKey::MinUpdateInterval => self.min_update_interval.unsigned_abs(),
            ConfigKey::BaseVolumeCeiling => self.base_volume_ceiling,
            ConfigKey::VolumeCeilingMultiplier => self.volume_ceiling_multiplier,
            ConfigKey::RoundTripPnlEpsilon => self.round_trip_pnl_epsilon,
            ConfigKey::RoundTripMinVolume => self.round_trip_min_volume,
            ConfigKey::MaxRoundTripStreak => self.max_round_trip_streak.into(),
            ConfigKey::MinTradesForRanking => self.min_trades_for_ranking,
            ConfigKey::WeightVolume => self.weight_volume.into(),
            ConfigKey::WeightSpeed => self.weight_speed.into(),
            ConfigKey::WeightPnl => self.weight_pnl.into(),
            ConfigKey::WeightStake => self.weight_stake.into(),
            ConfigKey::FeeDiscountDivisor => self.fee_discount_divisor,
            ConfigKey::RewardSplit => self.reward_split.into(),
            ConfigKey::HalvingPeriod => self.halving_period.unsigned_abs(),
        }
    }

    /// Set the value of the given key, returning the previous value.
    pub(crate) fn set(&mut self, key: ConfigKey, value: u64) -> Result<u64> {
        require_neq!(self.get(key), value, LeaderboardError::InvalidConfig);

        let mut config = *self;
        config.assign(key, value)?;
        config.validate()?;

        std::mem::swap(self, &mut config);
        Ok(config.get(key))
    }

    fn assign(&mut self, key: ConfigKey, value: u64) -> Result<()> {
        match key {
            ConfigKey::MaxRanked => self.max_ranked = narrow(value)?,
            ConfigKey::MinTradeInterval => self.min_trade_interval = narrow(value)?,
            ConfigKey::MinUpdateInterval => self.min_update_interval = narrow(value)?,
            ConfigKey::BaseVolumeCeiling => self.base_volume_ceiling = value,
            ConfigKey::VolumeCeilingMultiplier => self.volume_ceiling_multiplier = value,
            ConfigKey::RoundTripPnlEpsilon => self.round_trip_pnl_epsilon = value,
            ConfigKey::RoundTripMinVolume => self.round_trip_min_volume = value,
            ConfigKey::MaxRoundTripStreak => self.max_round_trip_streak = narrow(value)?,
            ConfigKey::MinTradesForRanking => self.min_trades_for_ranking = value,
            ConfigKey::WeightVolume => self.weight_volume = narrow(value)?,
            ConfigKey::WeightSpeed => self.weight_speed = narrow(value)?,
            ConfigKey::WeightPnl => self.weight_pnl = narrow(value)?,
            ConfigKey::WeightStake => self.weight_stake = narrow(value)?,
            ConfigKey::FeeDiscountDivisor => self.fee_discount_divisor = value,
            ConfigKey::RewardSplit => self.reward_split = narrow(value)?,
            ConfigKey::HalvingPeriod => self.halving_period = narrow(value)?,
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        require!(
            self.max_ranked != 0 && self.max_ranked <= MAX_RANKED_LEN,
            LeaderboardError::InvalidConfig
        );
        require!(self.base_volume_ceiling != 0, LeaderboardError::InvalidConfig);
        require!(
            self.volume_ceiling_multiplier != 0,
            LeaderboardError::InvalidConfig
        );
        require!(self.weights().total() != 0, LeaderboardError::InvalidConfig);
        self.fee_discount_divisor()?;
        self.reward_split()?;
        Ok(())
    }

    /// Get the leaderboard cap.
    pub fn max_ranked(&self) -> usize {
        self.max_ranked.into()
    }

    /// Get the minimum update interval.
    pub fn min_update_interval(&self) -> i64 {
        self.min_update_interval
    }

    /// Get the reward halving period.
    pub fn halving_period(&self) -> i64 {
        self.halving_period
    }

    /// Get the score weights.
    pub fn weights(&self) -> ScoreWeights {
        ScoreWeights::builder()
            .volume(self.weight_volume)
            .speed(self.weight_speed)
            .pnl(self.weight_pnl)
            .stake(self.weight_stake)
            .build()
    }

    /// Get the fee discount divisor.
    pub fn fee_discount_divisor(&self) -> Result<NonZeroU64> {
        NonZeroU64::new(self.fee_discount_divisor)
            .ok_or_else(|| error!(LeaderboardError::InvalidConfig))
    }

    /// Get the reward split policy.
    pub fn reward_split(&self) -> Result<RewardSplit> {
        RewardSplit::try_from(self.reward_split).map_err(|_| error!(LeaderboardError::InvalidConfig))
    }

    /// Params of the anti-abuse filter.
    pub fn anti_abuse_params(&self) -> AntiAbuseParams {
        AntiAbuseParams::builder()
            .min_trade_interval(self.min_trade_interval)
            .base_volume_ceiling(self.base_volume_ceiling)
            .volume_ceiling_multiplier(self.volume_ceiling_multiplier)
            .round_trip_pnl_epsilon(self.round_trip_pnl_epsilon)
            .round_trip_min_volume(self.round_trip_min_volume)
            .max_round_trip_streak(self.max_round_trip_streak)
            .min_trades_for_ranking(self.min_trades_for_ranking)
            .build()
    }

    /// The ranking engine configured by this config.
    pub fn ranking_engine(&self) -> RankingEngine {
        RankingEngine::builder()
            .weights(self.weights())
            .min_trades(self.min_trades_for_ranking)
            .cap(self.max_ranked())
            .build()
    }
}

fn narrow<T: TryFrom<u64>>(value: u64) -> Result<T> {
    T::try_from(value).map_err(|_| error!(LeaderboardError::InvalidConfig))
}

/// The leaderboard.
#[account]
#[derive(InitSpace, Default)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct Leaderboard {
    /// Bump seed.
    pub bump: u8,
    /// The admin.
    pub authority: Pubkey,
    /// The admin-to-be, set by a pending authority transfer.
    pub pending_authority: Option<Pubkey>,
    /// The address allowed to update the ranking and distribute rewards.
    pub updater: Pubkey,
    /// The address allowed to report trades on behalf of traders.
    pub reporter: Pubkey,
    /// Mint of the reward (and staking) token.
    pub reward_mint: Pubkey,
    /// Reward pool.
    pub reward_vault: Pubkey,
    /// Staking vault.
    pub staking_vault: Pubkey,
    /// Creation time, genesis of the reward halving schedule.
    pub created_at: i64,
    /// Time of the last ranking update.
    pub last_update: i64,
    /// Ranking cycle counter.
    pub epoch: u64,
    /// Whether reward distribution is paused.
    pub emergency_pause: bool,
    /// The last epoch rewards were distributed for.
    pub last_distributed_epoch: Option<u64>,
    /// Total rewards ever distributed.
    pub total_distributed: u128,
    /// Total amount in the staking vault.
    pub total_staked: u64,
    /// Config.
    pub config: LeaderboardConfig,
    /// Ranked traders, highest rank first.
    #[max_len(MAX_RANKED_LEN)]
    pub ranked: Vec<RankedEntry>,
}

impl Leaderboard {
    pub(crate) fn init(
        &mut self,
        bump: u8,
        authority: Pubkey,
        reward_mint: Pubkey,
        reward_vault: Pubkey,
        staking_vault: Pubkey,
        now: i64,
    ) {
        self.bump = bump;
        self.authority = authority;
        self.pending_authority = None;
        self.updater = authority;
        self.reporter = authority;
        self.reward_mint = reward_mint;
        self.reward_vault = reward_vault;
        self.staking_vault = staking_vault;
        self.created_at = now;
        self.last_update = 0;
        self.epoch = 0;
        self.emergency_pause = false;
        self.last_distributed_epoch = None;
        self.total_distributed = 0;
        self.total_staked = 0;
        self.config = LeaderboardConfig::default();
        self.ranked = Vec::default();
    }

    /// Returns whether the address is the admin.
    pub fn is_authority(&self, address: &Pubkey) -> bool {
        self.authority == *address
    }

    /// Returns whether the address may update the ranking.
    pub fn is_updater(&self, address: &Pubkey) -> bool {
        self.updater == *address || self.is_authority(address)
    }

    /// Returns whether the address may report trades for others.
    pub fn is_reporter(&self, address: &Pubkey) -> bool {
        self.reporter == *address
    }

    /// Check that `payer` may record a trade of `trader`.
    pub(crate) fn validate_reporter(&self, payer: &Pubkey, trader: &Pubkey) -> Result<()> {
        require!(
            payer == trader || self.is_reporter(payer),
            LeaderboardError::Unauthorized
        );
        Ok(())
    }

    /// Returns whether a ranking has been committed.
    pub fn has_ranking(&self) -> bool {
        self.epoch != 0
    }

    /// Check that a ranking computed against `expected_epoch` may be committed at `now`.
    pub(crate) fn check_update(&self, expected_epoch: u64, now: i64) -> Result<()> {
        require_eq!(expected_epoch, self.epoch, LeaderboardError::StaleSubmission);
        if self.has_ranking() {
            let next_update = self
                .last_update
                .checked_add(self.config.min_update_interval())
                .ok_or(LeaderboardError::ArithmeticOverflow)?;
            require_gte!(now, next_update, LeaderboardError::UpdateTooSoon);
        }
        Ok(())
    }

    /// Replace the ranking and start a new epoch.
    pub(crate) fn commit_ranking(
        &mut self,
        ranked: &[RankedTrader<Pubkey>],
        now: i64,
    ) -> Result<u64> {
        require!(!ranked.is_empty(), LeaderboardError::EmptyCandidateSet);
        require_gte!(
            self.config.max_ranked(),
            ranked.len(),
            LeaderboardError::InvalidInput
        );
        let epoch = self
            .epoch
            .checked_add(1)
            .ok_or(LeaderboardError::ArithmeticOverflow)?;

        self.ranked = ranked.iter().map(RankedEntry::from).collect();
        self.epoch = epoch;
        self.last_update = now;
        Ok(epoch)
    }

    /// Check that rewards may be distributed for the current epoch.
    pub(crate) fn check_distribution(&self) -> Result<()> {
        require!(!self.emergency_pause, LeaderboardError::Paused);
        require!(self.has_ranking(), LeaderboardError::NoLeaderboardYet);
        require!(
            self.last_distributed_epoch != Some(self.epoch),
            LeaderboardError::AlreadyDistributedThisEpoch
        );
        Ok(())
    }

    /// The reward distributor of this leaderboard.
    pub fn reward_distributor(&self) -> Result<RewardDistributor> {
        Ok(RewardDistributor::builder()
            .split(self.config.reward_split()?)
            .halving_period(self.config.halving_period())
            .genesis(self.created_at)
            .build())
    }

    /// Compute the payouts of a distribution for the current epoch.
    pub(crate) fn plan_distribution(
        &self,
        top_n: u64,
        reward_amount: u64,
        now: i64,
    ) -> Result<Vec<Payout<Pubkey>>> {
        self.check_distribution()?;
        let ranked = self
            .ranked
            .iter()
            .map(|entry| (entry.trader, entry.score))
            .collect::<Vec<_>>();
        let payouts = self
            .reward_distributor()?
            .plan(&ranked, top_n, reward_amount, now)
            .map_err(ModelError::from)?;
        Ok(payouts)
    }

    /// Mark the current epoch as distributed.
    pub(crate) fn record_distribution(&mut self, total_paid: u64) -> Result<u64> {
        self.check_distribution()?;
        self.total_distributed = self
            .total_distributed
            .checked_add(total_paid.into())
            .ok_or(LeaderboardError::ArithmeticOverflow)?;
        self.last_distributed_epoch = Some(self.epoch);
        Ok(self.epoch)
    }

    /// Set the pause flag, returning the previous value.
    pub(crate) fn set_pause(&mut self, paused: bool) -> bool {
        std::mem::replace(&mut self.emergency_pause, paused)
    }

    pub(crate) fn record_stake(&mut self, amount: u64) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(LeaderboardError::ArithmeticOverflow)?;
        Ok(())
    }

    pub(crate) fn record_unstake(&mut self, amount: u64) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(LeaderboardError::InsufficientBalance)?;
        Ok(())
    }

    /// Set the updater, returning the previous one.
    pub(crate) fn set_updater(&mut self, mut updater: Pubkey) -> Result<Pubkey> {
        require_keys_neq!(self.updater, updater, LeaderboardError::InvalidInput);
        std::mem::swap(&mut self.updater, &mut updater);
        Ok(updater)
    }

    /// Set the reporter, returning the previous one.
    pub(crate) fn set_reporter(&mut self, mut reporter: Pubkey) -> Result<Pubkey> {
        require_keys_neq!(self.reporter, reporter, LeaderboardError::InvalidInput);
        std::mem::swap(&mut self.reporter, &mut reporter);
        Ok(reporter)
    }

    /// Start transferring the authority to `next`.
    pub(crate) fn transfer_authority(&mut self, next: Pubkey) -> Result<()> {
        require_keys_neq!(self.authority, next, LeaderboardError::InvalidInput);
        self.pending_authority = Some(next);
        Ok(())
    }

    /// Complete the pending authority transfer, returning the previous authority.
    pub(crate) fn accept_authority(&mut self, signer: &Pubkey) -> Result<Pubkey> {
        require!(
            self.pending_authority.as_ref() == Some(signer),
            LeaderboardError::Unauthorized
        );
        self.pending_authority = None;
        Ok(std::mem::replace(&mut self.authority, *signer))
    }

    /// Get signer.
    pub(crate) fn signer(&self) -> LeaderboardSigner {
        LeaderboardSigner {
            reward_mint: self.reward_mint,
            bump_bytes: [self.bump],
        }
    }
}

/// Leaderboard Signer.
pub struct LeaderboardSigner {
    reward_mint: Pubkey,
    bump_bytes: [u8; 1],
}

impl LeaderboardSigner {
    /// As signer seeds.
    pub fn as_seeds(&self) -> [&[u8]; 3] {
        [LEADERBOARD_SEED, self.reward_mint.as_ref(), &self.bump_bytes]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn assert_error<T: std::fmt::Debug>(result: Result<T>, expected: LeaderboardError) {
        let err = result.expect_err("expected an error");
        assert_eq!(err, Error::from(expected));
    }

    fn leaderboard() -> (Leaderboard, Pubkey) {
        let authority = Pubkey::new_unique();
        let mut leaderboard = Leaderboard::default();
        leaderboard.init(
            255,
            authority,
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            NOW,
        );
        (leaderboard, authority)
    }

    fn ranked(traders: &[Pubkey]) -> Vec<RankedTrader<Pubkey>> {
        let len = traders.len() as u128;
        traders
            .iter()
            .enumerate()
            .map(|(idx, trader)| RankedTrader {
                trader: *trader,
                score: (len - idx as u128) * 1_000,
                average_execution_time: 100,
            })
            .collect()
    }

    #[test]
    fn parse_config_keys() {
        assert_eq!("max_ranked".parse::<ConfigKey>(), Ok(ConfigKey::MaxRanked));
        assert_eq!(
            "weight_pnl".parse::<ConfigKey>(),
            Ok(ConfigKey::WeightPnl)
        );
        assert_eq!(ConfigKey::HalvingPeriod.to_string(), "halving_period");
        assert!("unknown".parse::<ConfigKey>().is_err());
    }

    #[test]
    fn set_config_returns_previous_value() -> Result<()> {
        let mut config = LeaderboardConfig::default();
        assert_eq!(config.set(ConfigKey::MinTradeInterval, 30)?, 10);
        assert_eq!(config.get(ConfigKey::MinTradeInterval), 30);
        assert_eq!(config.anti_abuse_params().min_trade_interval, 30);

        assert_eq!(config.set(ConfigKey::RewardSplit, 1)?, 0);
        assert_eq!(config.reward_split()?, RewardSplit::ScoreWeighted);
        Ok(())
    }

    #[test]
    fn reject_invalid_config() -> Result<()> {
        let mut config = LeaderboardConfig::default();
        assert_error(config.set(ConfigKey::MaxRanked, 0), LeaderboardError::InvalidConfig);
        assert_error(config.set(ConfigKey::MaxRanked, 101), LeaderboardError::InvalidConfig);
        assert_error(config.set(ConfigKey::MaxRanked, 100), LeaderboardError::InvalidConfig);
        assert_error(
            config.set(ConfigKey::MaxRoundTripStreak, 256),
            LeaderboardError::InvalidConfig,
        );
        assert_error(config.set(ConfigKey::RewardSplit, 2), LeaderboardError::InvalidConfig);
        assert_error(
            config.set(ConfigKey::FeeDiscountDivisor, 0),
            LeaderboardError::InvalidConfig,
        );
        assert_error(
            config.set(ConfigKey::HalvingPeriod, u64::MAX),
            LeaderboardError::InvalidConfig,
        );

        config.set(ConfigKey::WeightVolume, 0)?;
        config.set(ConfigKey::WeightSpeed, 0)?;
        config.set(ConfigKey::WeightPnl, 0)?;
        assert_error(config.set(ConfigKey::WeightStake, 0), LeaderboardError::InvalidConfig);
        assert_eq!(config.get(ConfigKey::WeightStake), 1_000);

        assert_eq!(config.weights().total(), 1_000);
        Ok(())
    }

    #[test]
    fn update_guards() -> Result<()> {
        let (mut leaderboard, _) = leaderboard();
        let trader = Pubkey::new_unique();

        // The interval does not apply before the first update.
        leaderboard.check_update(0, NOW)?;
        assert_error(leaderboard.check_update(1, NOW), LeaderboardError::StaleSubmission);

        assert_eq!(leaderboard.commit_ranking(&ranked(&[trader]), NOW)?, 1);
        assert_eq!(leaderboard.epoch, 1);
        assert_eq!(leaderboard.last_update, NOW);
        assert_eq!(leaderboard.ranked[0].trader, trader);

        assert_error(leaderboard.check_update(0, NOW + 600), LeaderboardError::StaleSubmission);
        assert_error(leaderboard.check_update(1, NOW + 599), LeaderboardError::UpdateTooSoon);
        leaderboard.check_update(1, NOW + 600)?;
        Ok(())
    }

    #[test]
    fn commit_respects_cap() -> Result<()> {
        let (mut leaderboard, _) = leaderboard();
        leaderboard.config.set(ConfigKey::MaxRanked, 2)?;
        let traders = [
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
        ];
        assert_error(
            leaderboard.commit_ranking(&ranked(&traders), NOW),
            LeaderboardError::InvalidInput,
        );
        assert_error(
            leaderboard.commit_ranking(&[], NOW),
            LeaderboardError::EmptyCandidateSet,
        );
        assert_eq!(leaderboard.epoch, 0);
        Ok(())
    }

    #[test]
    fn distribute_once_per_epoch() -> Result<()> {
        let (mut leaderboard, _) = leaderboard();
        let trader = Pubkey::new_unique();
        assert_error(
            leaderboard.plan_distribution(1, 100, NOW),
            LeaderboardError::NoLeaderboardYet,
        );

        leaderboard.commit_ranking(&ranked(&[trader]), NOW)?;
        let payouts = leaderboard.plan_distribution(1, 100, NOW)?;
        assert_eq!(payouts, vec![Payout { trader, amount: 100 }]);
        assert_eq!(leaderboard.record_distribution(100)?, 1);
        assert_eq!(leaderboard.total_distributed, 100);

        for (top_n, amount) in [(1, 100), (0, 0), (5, u64::MAX)] {
            assert_error(
                leaderboard.plan_distribution(top_n, amount, NOW),
                LeaderboardError::AlreadyDistributedThisEpoch,
            );
        }

        leaderboard.commit_ranking(&ranked(&[trader]), NOW + 600)?;
        leaderboard.plan_distribution(1, 100, NOW + 600)?;
        Ok(())
    }

    #[test]
    fn pause_gate() -> Result<()> {
        let (mut leaderboard, _) = leaderboard();
        let trader = Pubkey::new_unique();
        leaderboard.commit_ranking(&ranked(&[trader]), NOW)?;

        assert!(!leaderboard.set_pause(true));
        for (top_n, amount) in [(1, 100), (0, 0), (2, 1)] {
            assert_error(
                leaderboard.plan_distribution(top_n, amount, NOW),
                LeaderboardError::Paused,
            );
        }
        assert_error(leaderboard.record_distribution(100), LeaderboardError::Paused);

        assert!(leaderboard.set_pause(false));
        assert_eq!(leaderboard.plan_distribution(1, 100, NOW)?.len(), 1);
        Ok(())
    }

    #[test]
    fn distribution_validates_top_n_and_halves() -> Result<()> {
        let (mut leaderboard, _) = leaderboard();
        let traders = [Pubkey::new_unique(), Pubkey::new_unique()];
        leaderboard.commit_ranking(&ranked(&traders), NOW)?;

        assert_error(
            leaderboard.plan_distribution(3, 100, NOW),
            LeaderboardError::InvalidTopN,
        );
        assert_error(
            leaderboard.plan_distribution(0, 100, NOW),
            LeaderboardError::InvalidTopN,
        );

        let period = leaderboard.config.halving_period();
        let payouts = leaderboard.plan_distribution(2, 1_000, NOW + period)?;
        assert!(payouts.iter().all(|p| p.amount == 250));
        Ok(())
    }

    #[test]
    fn two_step_authority_transfer() -> Result<()> {
        let (mut leaderboard, authority) = leaderboard();
        let next = Pubkey::new_unique();

        assert_error(
            leaderboard.transfer_authority(authority),
            LeaderboardError::InvalidInput,
        );
        leaderboard.transfer_authority(next)?;
        assert!(leaderboard.is_authority(&authority));
        assert_error(
            leaderboard.accept_authority(&Pubkey::new_unique()),
            LeaderboardError::Unauthorized,
        );
        assert_eq!(leaderboard.accept_authority(&next)?, authority);
        assert!(leaderboard.is_authority(&next));
        assert!(leaderboard.pending_authority.is_none());
        assert!(leaderboard.is_updater(&next));
        // The designated updater is kept.
        assert_eq!(leaderboard.updater, authority);
        assert!(!leaderboard.is_authority(&authority));
        Ok(())
    }

    #[test]
    fn only_the_trader_or_the_reporter_records_trades() -> Result<()> {
        let (mut leaderboard, authority) = leaderboard();
        let trader = Pubkey::new_unique();
        let reporter = Pubkey::new_unique();

        leaderboard.validate_reporter(&trader, &trader)?;
        leaderboard.validate_reporter(&authority, &trader)?;
        assert_error(
            leaderboard.validate_reporter(&reporter, &trader),
            LeaderboardError::Unauthorized,
        );

        leaderboard.set_reporter(reporter)?;
        leaderboard.validate_reporter(&reporter, &trader)?;
        assert_error(
            leaderboard.validate_reporter(&authority, &trader),
            LeaderboardError::Unauthorized,
        );
        Ok(())
    }

    #[test]
    fn roles() -> Result<()> {
        let (mut leaderboard, authority) = leaderboard();
        let updater = Pubkey::new_unique();
        assert!(leaderboard.is_reporter(&authority));
        assert_eq!(leaderboard.set_updater(updater)?, authority);
        assert_error(leaderboard.set_updater(updater), LeaderboardError::InvalidInput);
        assert!(leaderboard.is_updater(&updater));
        assert!(leaderboard.is_updater(&authority));
        assert!(!leaderboard.is_authority(&updater));
        Ok(())
    }
}
