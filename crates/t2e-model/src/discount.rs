use std::num::NonZeroU64;

/// Upper bound of a fee discount, in percent.
pub const MAX_FEE_DISCOUNT: u8 = 50;

/// Fee discount in percent for a staked amount: `min(50, staked / divisor)`.
///
/// Non-decreasing in `staked_amount` and capped at [`MAX_FEE_DISCOUNT`].
pub fn fee_discount(staked_amount: u64, divisor: NonZeroU64) -> u8 {
    let tier = staked_amount / divisor;
    u8::try_from(tier)
        .unwrap_or(MAX_FEE_DISCOUNT)
        .min(MAX_FEE_DISCOUNT)
}
