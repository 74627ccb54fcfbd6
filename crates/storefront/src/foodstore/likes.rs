//! Remote likes mirror for authenticated customers.
//!
//! Likes are stored flat under `likes/` keyed
//! `"{customer_id}_{stall_id}_{item_code}" -> true`, matching the key shape
//! the cart uses for lines. Guests never reach this module; their favorites
//! stay in the device session.

use std::collections::BTreeMap;

use tracing::instrument;

use makan_core::{CustomerId, FavoriteSet, ItemCode, StallId};

use super::{StoreClient, StoreError};

/// Composite key for one like record.
#[must_use]
pub fn like_key(customer: &CustomerId, stall_id: StallId, code: &ItemCode) -> String {
    format!("{customer}_{stall_id}_{code}")
}

impl StoreClient {
    /// Record a like.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    #[instrument(skip(self))]
    pub async fn create_like(
        &self,
        customer: &CustomerId,
        stall_id: StallId,
        code: &ItemCode,
    ) -> Result<(), StoreError> {
        self.put_json(&format!("likes/{}", like_key(customer, stall_id, code)), &true)
            .await
    }

    /// Remove a like. Removing an absent like succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the delete fails.
    #[instrument(skip(self))]
    pub async fn delete_like(
        &self,
        customer: &CustomerId,
        stall_id: StallId,
        code: &ItemCode,
    ) -> Result<(), StoreError> {
        self.delete_json(&format!("likes/{}", like_key(customer, stall_id, code)))
            .await
    }

    /// The customer's liked dishes for one stall, as cart line keys
    /// (`"{stall_id}_{item_code}"`).
    ///
    /// The store cannot query by prefix, so this reads the whole collection
    /// and filters - the same full-read-then-filter the original client did.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unreachable.
    #[instrument(skip(self))]
    pub async fn likes_for(
        &self,
        customer: &CustomerId,
        stall_id: StallId,
    ) -> Result<FavoriteSet, StoreError> {
        let map: BTreeMap<String, bool> = self.get_json("likes").await?.unwrap_or_default();

        let prefix = format!("{customer}_{stall_id}_");
        let entries = map.into_iter().filter_map(|(key, present)| {
            if !present {
                return None;
            }
            key.strip_prefix(&prefix)
                .map(|code| format!("{stall_id}_{code}"))
        });

        Ok(FavoriteSet::from_entries(entries))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_like_key_shape() {
        let customer = CustomerId::parse("u-abc").unwrap();
        let code = ItemCode::parse("A1").unwrap();
        assert_eq!(like_key(&customer, StallId::new(10), &code), "u-abc_10_A1");
    }
}
