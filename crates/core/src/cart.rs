//! The per-customer shopping cart.
//!
//! A cart is a map of lines keyed by `"{stall_id}_{item_code}"`, so one cart
//! may hold dishes from several stalls at once. Lines with a non-positive
//! quantity are never retained: a decrement that reaches zero deletes the
//! line. Every mutation refreshes `updated_at`; the owning store rewrites
//! the whole blob afterwards.
//!
//! Deserialization is deliberately forgiving about *where* a cart comes
//! from but strict about its shape; callers that load carts from storage
//! fall back to [`Cart::default`] when the stored blob does not parse.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ItemCode, StallId};

/// Current cart blob schema version, part of the storage key namespace.
pub const CART_SCHEMA_VERSION: u32 = 1;

/// One selected dish line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Stall the dish belongs to.
    pub stall_id: StallId,
    /// Menu code of the dish within its stall.
    pub item_code: ItemCode,
    /// Display name captured at selection time.
    pub name: String,
    /// Unit price captured at selection time.
    pub unit_price: Decimal,
    /// Selected quantity; always `> 0` for a retained line.
    pub qty: u32,
}

impl CartItem {
    /// The cart map key for this line.
    #[must_use]
    pub fn line_key(&self) -> String {
        Cart::line_key(self.stall_id, &self.item_code)
    }

    /// `unit_price * qty` for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.qty)
    }
}

/// A customer's pending, unsubmitted selection of dishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Blob schema version.
    pub version: u32,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
    /// Lines keyed by `"{stall_id}_{item_code}"`.
    pub items: BTreeMap<String, CartItem>,
}

impl Default for Cart {
    fn default() -> Self {
        Self {
            version: CART_SCHEMA_VERSION,
            updated_at: Utc::now(),
            items: BTreeMap::new(),
        }
    }
}

impl Cart {
    /// Build the map key for a `(stall, item)` pair.
    #[must_use]
    pub fn line_key(stall_id: StallId, item_code: &ItemCode) -> String {
        format!("{stall_id}_{item_code}")
    }

    /// Add `delta_qty` of a dish, creating the line if absent.
    ///
    /// A zero delta is ignored entirely - it is not a mutation, so
    /// `updated_at` is left untouched.
    pub fn add_item(
        &mut self,
        stall_id: StallId,
        item_code: ItemCode,
        name: &str,
        unit_price: Decimal,
        delta_qty: u32,
    ) {
        if delta_qty == 0 {
            return;
        }

        let key = Self::line_key(stall_id, &item_code);
        self.items
            .entry(key)
            .and_modify(|line| line.qty += delta_qty)
            .or_insert_with(|| CartItem {
                stall_id,
                item_code,
                name: name.to_owned(),
                unit_price,
                qty: delta_qty,
            });
        self.touch();
    }

    /// Remove `delta_qty` of a dish; the line is deleted when its quantity
    /// reaches zero or below. Unknown lines and zero deltas are ignored.
    pub fn remove_qty(&mut self, stall_id: StallId, item_code: &ItemCode, delta_qty: u32) {
        if delta_qty == 0 {
            return;
        }

        let key = Self::line_key(stall_id, item_code);
        let Some(line) = self.items.get_mut(&key) else {
            return;
        };

        line.qty = line.qty.saturating_sub(delta_qty);
        if line.qty == 0 {
            self.items.remove(&key);
        }
        self.touch();
    }

    /// Set a line's quantity outright; zero deletes the line.
    ///
    /// Setting a quantity on an unknown line is ignored - quantity edits
    /// only apply to dishes already in the cart.
    pub fn set_qty(&mut self, stall_id: StallId, item_code: &ItemCode, qty: u32) {
        let key = Self::line_key(stall_id, item_code);
        if !self.items.contains_key(&key) {
            return;
        }

        if qty == 0 {
            self.items.remove(&key);
        } else if let Some(line) = self.items.get_mut(&key) {
            line.qty = qty;
        }
        self.touch();
    }

    /// Empty all items (after a fully successful checkout).
    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of dishes across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.values().map(|line| line.qty).sum()
    }

    /// Sum of `unit_price * qty` over every line.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.values().map(CartItem::line_total).sum()
    }

    /// Group lines by stall, in stable stall-id order.
    #[must_use]
    pub fn items_by_stall(&self) -> BTreeMap<StallId, Vec<&CartItem>> {
        let mut groups: BTreeMap<StallId, Vec<&CartItem>> = BTreeMap::new();
        for line in self.items.values() {
            groups.entry(line.stall_id).or_default().push(line);
        }
        groups
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn code(s: &str) -> ItemCode {
        ItemCode::parse(s).unwrap()
    }

    fn price(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    #[test]
    fn test_add_creates_then_increments() {
        let mut cart = Cart::default();
        cart.add_item(StallId::new(10), code("A"), "Rice", price(500), 2);
        cart.add_item(StallId::new(10), code("A"), "Rice", price(500), 1);

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items.get("10_A").unwrap().qty, 3);
    }

    #[test]
    fn test_no_line_ever_retained_at_zero_qty() {
        // Property: arbitrary add/remove sequences never leave qty <= 0.
        let mut cart = Cart::default();
        let stall = StallId::new(10);
        let ops: [(bool, u32); 8] = [
            (true, 2),
            (false, 1),
            (false, 5),
            (true, 1),
            (true, 0),
            (false, 0),
            (false, 1),
            (false, 1),
        ];
        for (add, delta) in ops {
            if add {
                cart.add_item(stall, code("A"), "Rice", price(500), delta);
            } else {
                cart.remove_qty(stall, &code("A"), delta);
            }
            assert!(cart.items.values().all(|line| line.qty > 0));
        }
    }

    #[test]
    fn test_remove_to_zero_deletes_line() {
        let mut cart = Cart::default();
        cart.add_item(StallId::new(10), code("A"), "Rice", price(500), 2);
        cart.remove_qty(StallId::new(10), &code("A"), 2);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_past_zero_deletes_line() {
        let mut cart = Cart::default();
        cart.add_item(StallId::new(10), code("A"), "Rice", price(500), 1);
        cart.remove_qty(StallId::new(10), &code("A"), 99);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_unknown_line_is_ignored() {
        let mut cart = Cart::default();
        cart.remove_qty(StallId::new(10), &code("A"), 1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_qty_zero_deletes_line() {
        let mut cart = Cart::default();
        cart.add_item(StallId::new(10), code("A"), "Rice", price(500), 2);
        cart.set_qty(StallId::new(10), &code("A"), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_qty_on_unknown_line_is_ignored() {
        let mut cart = Cart::default();
        cart.set_qty(StallId::new(10), &code("A"), 3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_subtotal_and_count() {
        let mut cart = Cart::default();
        cart.add_item(StallId::new(10), code("A"), "Rice", price(500), 2);
        cart.add_item(StallId::new(10), code("B"), "Soup", price(300), 1);

        assert_eq!(cart.subtotal(), price(1300));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_items_by_stall_groups_lines() {
        let mut cart = Cart::default();
        cart.add_item(StallId::new(10), code("A"), "Rice", price(500), 2);
        cart.add_item(StallId::new(20), code("A"), "Mee", price(400), 1);
        cart.add_item(StallId::new(10), code("B"), "Soup", price(300), 1);

        let groups = cart.items_by_stall();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.get(&StallId::new(10)).unwrap().len(), 2);
        assert_eq!(groups.get(&StallId::new(20)).unwrap().len(), 1);
    }

    #[test]
    fn test_mutations_refresh_updated_at() {
        let mut cart = Cart::default();
        let before = cart.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(5));
        cart.add_item(StallId::new(10), code("A"), "Rice", price(500), 1);
        assert!(cart.updated_at > before);

        let before = cart.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(5));
        cart.clear();
        assert!(cart.updated_at > before);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_zero_delta_is_not_a_mutation() {
        let mut cart = Cart::default();
        let before = cart.updated_at;
        cart.add_item(StallId::new(10), code("A"), "Rice", price(500), 0);
        assert!(cart.is_empty());
        assert_eq!(cart.updated_at, before);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut cart = Cart::default();
        cart.add_item(StallId::new(10), code("A"), "Rice", price(500), 2);

        let json = serde_json::to_string(&cart).unwrap();
        let parsed: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cart);
    }

    #[test]
    fn test_malformed_blob_fails_to_parse() {
        // The storefront falls back to Cart::default() on this error.
        assert!(serde_json::from_str::<Cart>("{\"items\": 42}").is_err());
        assert!(serde_json::from_str::<Cart>("not json").is_err());
    }
}
