//! Order fee computation.
//!
//! Every order attracts three flat surcharges on its subtotal: GST (9%),
//! service (10%) and rush (5%) - an unconditional 24% in total. There is no
//! tiering and no configuration; the rates are fixed by policy. Amounts are
//! exact decimals; rounding is a display concern.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GST rate applied to every subtotal (9%).
fn gst_rate() -> Decimal {
    Decimal::new(9, 2)
}

/// Service charge rate applied to every subtotal (10%).
fn svc_rate() -> Decimal {
    Decimal::new(10, 2)
}

/// Rush surcharge rate applied to every subtotal (5%).
fn rush_rate() -> Decimal {
    Decimal::new(5, 2)
}

/// The fee components computed over one order's subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// Goods and services tax (9% of subtotal).
    pub gst: Decimal,
    /// Service charge (10% of subtotal).
    pub svc: Decimal,
    /// Rush surcharge (5% of subtotal).
    pub rush: Decimal,
    /// Sum of the three components.
    pub fee_total: Decimal,
}

/// Compute the fee breakdown for a subtotal.
///
/// Satisfies `fee_total == gst + svc + rush == 0.24 * subtotal` exactly.
#[must_use]
pub fn compute_fees(subtotal: Decimal) -> FeeBreakdown {
    let gst = subtotal * gst_rate();
    let svc = subtotal * svc_rate();
    let rush = subtotal * rush_rate();

    FeeBreakdown {
        gst,
        svc,
        rush,
        fee_total: gst + svc + rush,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_total_is_sum_of_components() {
        let fees = compute_fees(Decimal::new(1000, 2));
        assert_eq!(fees.fee_total, fees.gst + fees.svc + fees.rush);
    }

    #[test]
    fn test_fee_total_is_24_percent() {
        for cents in [0_i64, 1, 99, 1300, 250_000] {
            let subtotal = Decimal::new(cents, 2);
            let fees = compute_fees(subtotal);
            assert_eq!(fees.fee_total, subtotal * Decimal::new(24, 2));
        }
    }

    #[test]
    fn test_worked_example() {
        // subtotal 13.00 -> gst 1.17, svc 1.30, rush 0.65, fee_total 3.12
        let fees = compute_fees(Decimal::new(1300, 2));
        assert_eq!(fees.gst, Decimal::new(117, 2));
        assert_eq!(fees.svc, Decimal::new(130, 2));
        assert_eq!(fees.rush, Decimal::new(65, 2));
        assert_eq!(fees.fee_total, Decimal::new(312, 2));
    }

    #[test]
    fn test_zero_subtotal() {
        let fees = compute_fees(Decimal::ZERO);
        assert_eq!(fees.fee_total, Decimal::ZERO);
    }
}
