//! Monetary rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits kept on every monetary output.
pub const MONEY_SCALE: u32 = 2;

/// Round to 2 decimal places, half away from zero (`0.005 -> 0.01`, `-0.005 -> -0.01`).
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}
