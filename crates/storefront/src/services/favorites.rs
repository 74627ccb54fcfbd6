//! Favorite-dish storage: device session plus remote mirror.
//!
//! Favorites are scoped per stall and per customer identity. The device
//! session always holds the set (key `likes:{stall_id}:{namespace}`); when
//! the customer is logged in, toggles are additionally mirrored to the
//! remote likes store, and the remote copy is the one rendered. There is no
//! conflict resolution between the two copies - the source is picked by
//! login state alone.

use tower_sessions::Session;
use tracing::warn;

use makan_core::{Cart, FavoriteSet, ItemCode, StallId};

use crate::error::Result;
use crate::foodstore::StoreClient;
use crate::models::CurrentCustomer;

/// Namespace for favorites of sessions that never logged in.
const GUEST_NAMESPACE: &str = "guest";

/// Favorite store for one stall and one request's customer identity.
pub struct FavoriteStore<'a> {
    session: &'a Session,
    store: &'a StoreClient,
    customer: Option<&'a CurrentCustomer>,
    stall_id: StallId,
}

impl<'a> FavoriteStore<'a> {
    /// Create a store scoped to one stall and the current identity.
    #[must_use]
    pub fn new(
        session: &'a Session,
        store: &'a StoreClient,
        customer: Option<&'a CurrentCustomer>,
        stall_id: StallId,
    ) -> Self {
        Self {
            session,
            store,
            customer,
            stall_id,
        }
    }

    fn storage_key(&self) -> String {
        let namespace = self
            .customer
            .map_or_else(|| GUEST_NAMESPACE.to_owned(), |c| c.id.to_string());
        format!("likes:{}:{namespace}", self.stall_id)
    }

    /// Load the favorite set from the source picked by login state:
    /// the remote likes store when logged in, the device session otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error only for remote reads; local malformed blobs fall
    /// back to an empty set.
    pub async fn load(&self) -> Result<FavoriteSet> {
        if let Some(customer) = self.customer {
            let favorites = self.store.likes_for(&customer.id, self.stall_id).await?;
            return Ok(favorites);
        }

        Ok(self.load_local().await)
    }

    /// Toggle a dish: add if absent, remove if present.
    ///
    /// The local set is always updated synchronously; logged-in customers
    /// also get the remote mirror write. Returns `true` if the dish is a
    /// favorite after the toggle.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote mirror write or the session write
    /// fails.
    pub async fn toggle(&self, item_code: &ItemCode) -> Result<bool> {
        let line_key = Cart::line_key(self.stall_id, item_code);

        // Membership is judged from the authoritative source for this
        // identity, then both copies are updated.
        let mut set = self.load().await?;
        let now_favorite = set.toggle(&line_key);

        self.session
            .insert(&self.storage_key(), &set)
            .await
            .map_err(crate::error::AppError::from)?;

        if let Some(customer) = self.customer {
            if now_favorite {
                self.store
                    .create_like(&customer.id, self.stall_id, item_code)
                    .await?;
            } else {
                self.store
                    .delete_like(&customer.id, self.stall_id, item_code)
                    .await?;
            }
        }

        Ok(now_favorite)
    }

    async fn load_local(&self) -> FavoriteSet {
        let key = self.storage_key();
        let stored: Option<serde_json::Value> =
            self.session.get(&key).await.unwrap_or_else(|e| {
                warn!(key = %key, "failed to read favorites blob, starting empty: {e}");
                None
            });

        stored.map_or_else(FavoriteSet::new, |value| {
            serde_json::from_value(value).unwrap_or_else(|e| {
                warn!("malformed favorites blob, starting empty: {e}");
                FavoriteSet::new()
            })
        })
    }
}
