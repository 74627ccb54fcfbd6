//! Order records and their secondary indexes.
//!
//! Orders live at `orders/{order_id}`; creation also writes two index
//! entries, `users/{user_id}/orders/{order_id} -> true` and
//! `stalls/{stall_id}/orders/{order_id} -> true`, used to list a customer's
//! or a stall's orders without scanning the whole collection.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{instrument, warn};

use makan_core::{CustomerId, Order, OrderDraft, OrderId, StallId};

use super::{StoreClient, StoreError};

impl StoreClient {
    /// Materialize one order draft into the store.
    ///
    /// Three writes in sequence (record, user index, stall index); a failure
    /// partway leaves an index entry missing, which readers tolerate.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if any write fails.
    #[instrument(skip(self, draft), fields(stall_id = %draft.stall_id))]
    pub async fn create_order(&self, draft: OrderDraft) -> Result<Order, StoreError> {
        let order = draft.into_order(OrderId::generate(), Utc::now());

        self.put_json(&format!("orders/{}", order.id), &order).await?;
        self.put_json(
            &format!("users/{}/orders/{}", order.user_id, order.id),
            &true,
        )
        .await?;
        self.put_json(
            &format!("stalls/{}/orders/{}", order.stall_id, order.id),
            &true,
        )
        .await?;

        Ok(order)
    }

    /// Fetch one order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unreachable or the record is
    /// malformed.
    #[instrument(skip(self))]
    pub async fn order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        self.get_json(&format!("orders/{id}")).await
    }

    /// List a customer's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unreachable or a record is
    /// malformed.
    #[instrument(skip(self))]
    pub async fn orders_for_user(&self, user_id: &CustomerId) -> Result<Vec<Order>, StoreError> {
        let index: BTreeMap<String, bool> = self
            .get_json(&format!("users/{user_id}/orders"))
            .await?
            .unwrap_or_default();

        self.resolve_order_index(index).await
    }

    /// List a stall's orders, newest first (vendor dashboard).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unreachable or a record is
    /// malformed.
    #[instrument(skip(self))]
    pub async fn orders_for_stall(&self, stall_id: StallId) -> Result<Vec<Order>, StoreError> {
        let index: BTreeMap<String, bool> = self
            .get_json(&format!("stalls/{stall_id}/orders"))
            .await?
            .unwrap_or_default();

        self.resolve_order_index(index).await
    }

    /// Walk an order index, skipping dangling entries.
    async fn resolve_order_index(
        &self,
        index: BTreeMap<String, bool>,
    ) -> Result<Vec<Order>, StoreError> {
        let mut orders = Vec::with_capacity(index.len());
        for (raw_id, present) in index {
            if !present {
                continue;
            }
            let Ok(order_id) = raw_id.parse::<OrderId>() else {
                warn!(key = %raw_id, "skipping order index entry with invalid id");
                continue;
            };
            match self.order(order_id).await? {
                Some(order) => orders.push(order),
                None => warn!(%order_id, "order index entry dangles; skipping"),
            }
        }

        orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
        Ok(orders)
    }
}
