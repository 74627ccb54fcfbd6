//! Canonical record types at the data-access boundary.
//!
//! The hosted database accumulated several spellings for the same concept
//! over the life of the original data set (`price` / `ItemPrice` / `cost`,
//! `name` / `StallName` / `title`, ...). Rather than shape-guessing at every
//! call site, each record type here accepts the legacy spellings as serde
//! aliases on input and always writes the canonical field name. Nothing
//! past this module ever sees a legacy spelling.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use makan_core::{HawkerId, ItemCode, StallId};

/// Stored shape of a hawker centre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HawkerRecord {
    #[serde(alias = "HawkerName", alias = "title")]
    pub name: String,
    #[serde(alias = "Address", alias = "location", default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
}

/// A hawker centre with its assigned ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HawkerCentre {
    pub id: HawkerId,
    pub name: String,
    pub address: String,
    pub description: String,
}

impl HawkerCentre {
    pub(crate) fn from_record(id: HawkerId, record: HawkerRecord) -> Self {
        Self {
            id,
            name: record.name,
            address: record.address,
            description: record.description,
        }
    }
}

/// Stored shape of a stall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StallRecord {
    #[serde(alias = "StallName", alias = "title")]
    pub name: String,
    #[serde(alias = "hawker", alias = "HawkerId")]
    pub hawker_id: HawkerId,
    #[serde(alias = "type", alias = "Cuisine", default)]
    pub cuisine: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "isOpen", default = "default_true")]
    pub open: bool,
}

/// A stall with its assigned ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stall {
    pub id: StallId,
    pub name: String,
    pub hawker_id: HawkerId,
    pub cuisine: String,
    pub description: String,
    pub open: bool,
}

impl Stall {
    pub(crate) fn from_record(id: StallId, record: StallRecord) -> Self {
        Self {
            id,
            name: record.name,
            hawker_id: record.hawker_id,
            cuisine: record.cuisine,
            description: record.description,
            open: record.open,
        }
    }
}

/// Stored shape of a menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishRecord {
    #[serde(alias = "ItemName", alias = "title")]
    pub name: String,
    #[serde(alias = "price", alias = "ItemPrice", alias = "cost")]
    pub unit_price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "isAvailable", default = "default_true")]
    pub available: bool,
}

/// A dish on one stall's menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dish {
    pub stall_id: StallId,
    pub code: ItemCode,
    pub name: String,
    pub unit_price: Decimal,
    pub description: String,
    pub available: bool,
}

impl Dish {
    pub(crate) fn from_record(stall_id: StallId, code: ItemCode, record: DishRecord) -> Self {
        Self {
            stall_id,
            code,
            name: record.name,
            unit_price: record.unit_price,
            description: record.description,
            available: record.available,
        }
    }

    /// The cart line key for this dish.
    #[must_use]
    pub fn line_key(&self) -> String {
        makan_core::Cart::line_key(self.stall_id, &self.code)
    }
}

/// Account role recorded on the customer's profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    /// Ordinary ordering customer.
    #[default]
    Customer,
    /// Stall operator with access to the vendor pages.
    Vendor,
}

/// Customer profile record stored under `users/{id}/profile`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(alias = "DisplayName", alias = "username", default)]
    pub display_name: String,
    #[serde(default)]
    pub role: AccountRole,
    /// The stall a vendor account operates; `None` for customers.
    #[serde(default)]
    pub stall_id: Option<StallId>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_dish_record_accepts_legacy_price_spellings() {
        for field in ["unit_price", "price", "ItemPrice", "cost"] {
            let json = format!("{{\"name\": \"Laksa\", \"{field}\": \"4.50\"}}");
            let record: DishRecord = serde_json::from_str(&json).unwrap();
            assert_eq!(record.unit_price, Decimal::new(450, 2));
            assert!(record.available);
        }
    }

    #[test]
    fn test_dish_record_writes_canonical_field() {
        let record = DishRecord {
            name: "Laksa".to_owned(),
            unit_price: Decimal::new(450, 2),
            description: String::new(),
            available: true,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("unit_price").is_some());
        assert!(json.get("price").is_none());
    }

    #[test]
    fn test_stall_record_accepts_legacy_spellings() {
        let json = r#"{"StallName": "Ah Hock", "hawker": 3, "type": "chicken rice"}"#;
        let record: StallRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "Ah Hock");
        assert_eq!(record.hawker_id, HawkerId::new(3));
        assert_eq!(record.cuisine, "chicken rice");
        assert!(record.open);
    }

    #[test]
    fn test_profile_defaults_to_customer() {
        let profile: Profile = serde_json::from_str(r#"{"display_name": "Mei"}"#).unwrap();
        assert_eq!(profile.role, AccountRole::Customer);
        assert!(profile.stall_id.is_none());
    }

    #[test]
    fn test_vendor_profile_roundtrip() {
        let profile = Profile {
            display_name: "Ah Hock".to_owned(),
            role: AccountRole::Vendor,
            stall_id: Some(StallId::new(10)),
        };
        let json = serde_json::to_string(&profile).unwrap();
        let parsed: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, profile);
    }
}
