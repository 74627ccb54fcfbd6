//! Cart-to-order partitioning.
//!
//! An order never spans stalls, so checkout splits the cart into one draft
//! per distinct stall. Fees are computed per partition, over only that
//! partition's lines. Submission of the drafts (and the abort-on-first-
//! failure policy around it) belongs to the storefront's checkout service;
//! this module is pure.

use crate::cart::Cart;
use crate::order::{OrderDraft, OrderLine, OrderTotals, PayType};
use crate::types::CustomerId;

/// Partition a cart into one [`OrderDraft`] per distinct stall.
///
/// Drafts come out in stall-id order, and lines within a draft in line-key
/// order, so repeated calls over the same cart are deterministic. An empty
/// cart yields no drafts.
#[must_use]
pub fn order_drafts(cart: &Cart, user_id: &CustomerId, pay_type: PayType) -> Vec<OrderDraft> {
    cart.items_by_stall()
        .into_iter()
        .map(|(stall_id, lines)| {
            let subtotal = lines.iter().map(|line| line.line_total()).sum();
            let items = lines
                .into_iter()
                .map(|line| OrderLine {
                    item_code: line.item_code.clone(),
                    name: line.name.clone(),
                    qty: line.qty,
                    unit_price: line.unit_price,
                })
                .collect();

            OrderDraft {
                user_id: user_id.clone(),
                stall_id,
                pay_type,
                items,
                totals: OrderTotals::from_subtotal(subtotal),
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::{ItemCode, StallId};

    fn code(s: &str) -> ItemCode {
        ItemCode::parse(s).unwrap()
    }

    fn price(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    fn customer() -> CustomerId {
        CustomerId::parse("u-1").unwrap()
    }

    #[test]
    fn test_empty_cart_yields_no_drafts() {
        let cart = Cart::default();
        assert!(order_drafts(&cart, &customer(), PayType::Cash).is_empty());
    }

    #[test]
    fn test_single_stall_single_draft() {
        let mut cart = Cart::default();
        cart.add_item(StallId::new(10), code("A"), "Rice", price(500), 2);
        cart.add_item(StallId::new(10), code("B"), "Soup", price(300), 1);

        let drafts = order_drafts(&cart, &customer(), PayType::Card);
        assert_eq!(drafts.len(), 1);

        let draft = drafts.first().unwrap();
        assert_eq!(draft.stall_id, StallId::new(10));
        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.pay_type, PayType::Card);
        assert_eq!(draft.totals.subtotal, price(1300));
    }

    #[test]
    fn test_two_stalls_two_drafts_with_partition_subtotals() {
        let mut cart = Cart::default();
        cart.add_item(StallId::new(10), code("A"), "Rice", price(500), 2);
        cart.add_item(StallId::new(10), code("B"), "Soup", price(300), 1);
        cart.add_item(StallId::new(20), code("C"), "Mee", price(450), 2);

        let drafts = order_drafts(&cart, &customer(), PayType::Cash);
        assert_eq!(drafts.len(), 2);

        // Drafts arrive in stall-id order.
        let first = drafts.first().unwrap();
        let second = drafts.get(1).unwrap();
        assert_eq!(first.stall_id, StallId::new(10));
        assert_eq!(first.totals.subtotal, price(1300));
        assert_eq!(second.stall_id, StallId::new(20));
        assert_eq!(second.totals.subtotal, price(900));

        // Each partition's fees are over only its own subtotal.
        assert_eq!(first.totals.grand_total, price(1612));
        assert_eq!(second.totals.gst, price(81));
    }

    #[test]
    fn test_worked_example_totals() {
        // cart = { "10_A": 5.00 x 2, "10_B": 3.00 x 1 }
        let mut cart = Cart::default();
        cart.add_item(StallId::new(10), code("A"), "Rice", price(500), 2);
        cart.add_item(StallId::new(10), code("B"), "Bee Hoon", price(300), 1);

        let drafts = order_drafts(&cart, &customer(), PayType::Wallet);
        let totals = drafts.first().unwrap().totals;
        assert_eq!(totals.subtotal, price(1300));
        assert_eq!(totals.gst, price(117));
        assert_eq!(totals.svc, price(130));
        assert_eq!(totals.rush, price(65));
        assert_eq!(totals.fee_total, price(312));
        assert_eq!(totals.grand_total, price(1612));
    }

    #[test]
    fn test_drafts_carry_the_user() {
        let mut cart = Cart::default();
        cart.add_item(StallId::new(10), code("A"), "Rice", price(500), 1);

        let drafts = order_drafts(&cart, &customer(), PayType::Cash);
        assert_eq!(drafts.first().unwrap().user_id, customer());
    }
}
