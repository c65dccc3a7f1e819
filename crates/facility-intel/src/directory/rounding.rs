//! Rounding rules for published averages. Both round half up.

use std::num::NonZeroU64;

/// `round(numerator / denominator)` with ties rounded up, in integer arithmetic.
pub fn round_half_up_ratio(numerator: u64, denominator: NonZeroU64) -> u64 {
    let denominator = denominator.get();
    (numerator.saturating_mul(2).saturating_add(denominator)) / denominator.saturating_mul(2)
}

/// `numerator / denominator` rounded half up to one decimal place.
pub fn round_to_tenth(numerator: u64, denominator: NonZeroU64) -> f64 {
    let tenths = round_half_up_ratio(numerator.saturating_mul(10), denominator);
    tenths as f64 / 10.0
}

/// Round a non-negative float half up to the nearest integer.
pub fn round_half_up(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        (value + 0.5).floor() as u64
    } else {
        0
    }
}
