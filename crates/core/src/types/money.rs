//! Currency display helpers.
//!
//! All amounts in the system are Singapore dollars held as
//! [`rust_decimal::Decimal`]. Arithmetic stays exact; rounding to two
//! decimal places happens here, at display time only.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount for display (e.g. `"S$16.12"`).
///
/// Rounds half-up to two decimal places, matching receipt conventions.
#[must_use]
pub fn format_sgd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("S${rounded:.2}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_whole_amount() {
        assert_eq!(format_sgd(Decimal::new(13, 0)), "S$13.00");
    }

    #[test]
    fn test_format_fractional_amount() {
        assert_eq!(format_sgd(Decimal::new(312, 2)), "S$3.12");
    }

    #[test]
    fn test_format_rounds_half_up() {
        // 0.125 -> 0.13
        assert_eq!(format_sgd(Decimal::new(125, 3)), "S$0.13");
    }

    #[test]
    fn test_format_zero() {
        assert_eq!(format_sgd(Decimal::ZERO), "S$0.00");
    }
}
