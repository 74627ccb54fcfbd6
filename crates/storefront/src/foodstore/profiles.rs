//! Customer profile records.
//!
//! Profiles live at `users/{customer_id}/profile`, next to the customer's
//! order index. The identity provider owns credentials; the profile record
//! owns everything else (display name, role, the vendor's stall).

use tracing::instrument;

use makan_core::CustomerId;

use super::types::Profile;
use super::{StoreClient, StoreError};

impl StoreClient {
    /// Fetch a customer's profile.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unreachable or the record is
    /// malformed.
    #[instrument(skip(self))]
    pub async fn profile(&self, customer: &CustomerId) -> Result<Option<Profile>, StoreError> {
        self.get_json(&format!("users/{customer}/profile")).await
    }

    /// Create or replace a customer's profile.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    #[instrument(skip(self, profile))]
    pub async fn put_profile(
        &self,
        customer: &CustomerId,
        profile: &Profile,
    ) -> Result<(), StoreError> {
        self.put_json(&format!("users/{customer}/profile"), profile)
            .await
    }
}
