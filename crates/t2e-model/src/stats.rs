use crate::Error;

/// Integer running average.
///
/// Each step computes `(average * count + remainder + sample) / (count + 1)`. The raw samples
/// are never stored; carrying the division remainder keeps `average` equal to the floor of the
/// true arithmetic mean, so the rounding error stays strictly below one unit however many
/// samples are folded in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunningAverage {
    /// Current average, rounded down.
    pub average: u64,
    /// Remainder of the last division, always less than the sample count.
    pub remainder: u64,
}

impl RunningAverage {
    /// Fold `sample` into an average over `prev_count` samples.
    pub fn push(&self, prev_count: u64, sample: u64) -> crate::Result<Self> {
        let count = u128::from(prev_count);
        let total = u128::from(self.average)
            .checked_mul(count)
            .and_then(|total| total.checked_add(u128::from(self.remainder)))
            .and_then(|total| total.checked_add(u128::from(sample)))
            .ok_or(Error::Overflow("running average total"))?;
        let next_count = count
            .checked_add(1)
            .ok_or(Error::Overflow("running average count"))?;
        let average = total
            .checked_div(next_count)
            .ok_or(Error::Overflow("running average division"))?;
        let remainder = total
            .checked_rem(next_count)
            .ok_or(Error::Overflow("running average division"))?;
        Ok(Self {
            average: u64::try_from(average)
                .map_err(|_| Error::Overflow("running average result"))?,
            remainder: u64::try_from(remainder)
                .map_err(|_| Error::Overflow("running average remainder"))?,
        })
    }
}

/// Average volume per trade, zero when there is no history.
pub fn average_volume(total_volume: u64, trade_count: u64) -> u64 {
    total_volume.checked_div(trade_count).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_is_the_average() {
        assert_eq!(
            RunningAverage::default().push(0, 250),
            Ok(RunningAverage {
                average: 250,
                remainder: 0
            })
        );
    }

    #[test]
    fn tracks_the_floor_of_the_mean() -> crate::Result<()> {
        let samples = [250u64, 101, 7, 999, 3, 42, 1000, 1, 1, 65_535];
        let mut avg = RunningAverage::default();
        for (count, sample) in samples.iter().enumerate() {
            avg = avg.push(count as u64, *sample)?;
            let seen = &samples[..=count];
            let sum = seen.iter().sum::<u64>();
            assert_eq!(avg.average, sum / seen.len() as u64);
            assert_eq!(avg.remainder, sum % seen.len() as u64);
        }
        Ok(())
    }

    #[test]
    fn large_values_do_not_overflow() {
        let avg = RunningAverage {
            average: u64::MAX,
            remainder: 0,
        };
        assert_eq!(avg.push(u64::MAX - 1, u64::MAX).map(|a| a.average), Ok(u64::MAX));
    }

    #[test]
    fn average_volume_without_history() {
        assert_eq!(average_volume(0, 0), 0);
        assert_eq!(average_volume(5_000, 2), 2_500);
    }
}
