//! Session-related types.
//!
//! Types stored in the session for authentication state, plus the key
//! constants for the rest of the device-local state (cart blobs, favorite
//! sets, return-to URL, cached profile photo).

use serde::{Deserialize, Serialize};

use makan_core::{CustomerId, Email, StallId};

use crate::foodstore::AccountRole;

/// Session-stored customer identity.
///
/// Minimal data stored in the session to identify the logged-in customer;
/// the authoritative profile record lives in the food store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentCustomer {
    /// Provider-assigned customer ID.
    pub id: CustomerId,
    /// Registered email address.
    pub email: Email,
    /// Display name shown in the header.
    pub display_name: String,
    /// Customer or vendor.
    pub role: AccountRole,
    /// The stall a vendor operates; `None` for customers.
    pub stall_id: Option<StallId>,
}

impl CurrentCustomer {
    /// Whether this account may use the vendor pages.
    #[must_use]
    pub fn is_vendor(&self) -> bool {
        self.role == AccountRole::Vendor
    }
}

/// Session keys for device-local state.
pub mod session_keys {
    /// Key for storing the current logged-in customer.
    pub const CURRENT_CUSTOMER: &str = "current_customer";

    /// Key for the URL to return to after login.
    pub const RETURN_TO: &str = "return_to";

    /// Key for the cached profile photo (base64 data URL).
    pub const PROFILE_PHOTO: &str = "profile_photo";
}
