//! Immutable order records.
//!
//! An order captures a submitted purchase from exactly one stall. Orders are
//! created from cart partitions at checkout (see [`crate::checkout`]) and
//! never mutated afterwards; vendors advance only the `status` field.

use chrono::{DateTime, Utc};
use core::fmt;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fees::compute_fees;
use crate::types::{CustomerId, ItemCode, StallId};

/// Unique order identifier, assigned at materialization time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Generate a fresh random order ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OrderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// How the customer intends to pay at collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayType {
    /// Cash on collection.
    Cash,
    /// Card on collection.
    Card,
    /// QR wallet (PayNow and friends).
    Wallet,
}

impl fmt::Display for PayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Wallet => "wallet",
        };
        write!(f, "{label}")
    }
}

impl std::str::FromStr for PayType {
    type Err = UnknownPayType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            "wallet" => Ok(Self::Wallet),
            other => Err(UnknownPayType(other.to_owned())),
        }
    }
}

/// Error parsing a [`PayType`] from form input.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown pay type: {0}")]
pub struct UnknownPayType(pub String);

/// Lifecycle of a submitted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Submitted, not yet seen by the stall.
    #[default]
    Placed,
    /// Stall is preparing the food.
    Preparing,
    /// Ready for collection.
    Ready,
    /// Collected by the customer.
    Completed,
    /// Cancelled by the stall.
    Cancelled,
}

impl OrderStatus {
    /// Human-readable label for display.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Placed => "Placed",
            Self::Preparing => "Preparing",
            Self::Ready => "Ready for collection",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// One dish line within an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Menu code of the dish.
    pub item_code: ItemCode,
    /// Display name captured at checkout time.
    pub name: String,
    /// Ordered quantity.
    pub qty: u32,
    /// Unit price captured at checkout time.
    pub unit_price: Decimal,
}

/// The money totals of one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of `unit_price * qty` over the order's lines.
    pub subtotal: Decimal,
    /// GST component (9% of subtotal).
    pub gst: Decimal,
    /// Service component (10% of subtotal).
    pub svc: Decimal,
    /// Rush component (5% of subtotal).
    pub rush: Decimal,
    /// `gst + svc + rush`.
    pub fee_total: Decimal,
    /// `subtotal + fee_total`.
    pub grand_total: Decimal,
}

impl OrderTotals {
    /// Compute the full totals block for a subtotal.
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal) -> Self {
        let fees = compute_fees(subtotal);
        Self {
            subtotal,
            gst: fees.gst,
            svc: fees.svc,
            rush: fees.rush,
            fee_total: fees.fee_total,
            grand_total: subtotal + fees.fee_total,
        }
    }
}

/// An order not yet submitted to the data store.
///
/// Produced by [`crate::checkout::order_drafts`]; the storefront assigns the
/// ID and timestamp when it materializes the draft remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    /// Customer placing the order.
    pub user_id: CustomerId,
    /// The single stall this order is against.
    pub stall_id: StallId,
    /// Payment method recorded verbatim.
    pub pay_type: PayType,
    /// Dish lines, all belonging to `stall_id`.
    pub items: Vec<OrderLine>,
    /// Totals over only this order's lines.
    pub totals: OrderTotals,
}

impl OrderDraft {
    /// Materialize the draft into a full order record.
    #[must_use]
    pub fn into_order(self, id: OrderId, placed_at: DateTime<Utc>) -> Order {
        Order {
            id,
            user_id: self.user_id,
            stall_id: self.stall_id,
            pay_type: self.pay_type,
            status: OrderStatus::default(),
            placed_at,
            items: self.items,
            totals: self.totals,
        }
    }
}

/// An immutable record of a submitted purchase from exactly one stall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Customer that placed the order.
    pub user_id: CustomerId,
    /// The single stall this order is against.
    pub stall_id: StallId,
    /// Payment method recorded verbatim.
    pub pay_type: PayType,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Submission timestamp.
    pub placed_at: DateTime<Utc>,
    /// Dish lines.
    pub items: Vec<OrderLine>,
    /// Money totals.
    pub totals: OrderTotals,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_invariant() {
        let totals = OrderTotals::from_subtotal(Decimal::new(1300, 2));
        assert_eq!(
            totals.grand_total,
            totals.subtotal + totals.gst + totals.svc + totals.rush
        );
        assert_eq!(totals.grand_total, Decimal::new(1612, 2));
    }

    #[test]
    fn test_pay_type_roundtrip() {
        for raw in ["cash", "card", "wallet"] {
            let pay: PayType = raw.parse().unwrap();
            assert_eq!(pay.to_string(), raw);
        }
        assert!("cheque".parse::<PayType>().is_err());
    }

    #[test]
    fn test_order_status_default_is_placed() {
        assert_eq!(OrderStatus::default(), OrderStatus::Placed);
    }

    #[test]
    fn test_order_serde_roundtrip() {
        let draft = OrderDraft {
            user_id: CustomerId::parse("u-1").unwrap(),
            stall_id: StallId::new(10),
            pay_type: PayType::Cash,
            items: vec![OrderLine {
                item_code: ItemCode::parse("A").unwrap(),
                name: "Rice".to_owned(),
                qty: 2,
                unit_price: Decimal::new(500, 2),
            }],
            totals: OrderTotals::from_subtotal(Decimal::new(1000, 2)),
        };
        let order = draft.into_order(OrderId::generate(), Utc::now());

        let json = serde_json::to_string(&order).unwrap();
        let parsed: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, order);
    }
}
