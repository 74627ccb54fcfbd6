//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Hawker centres and
//! stalls carry numeric IDs assigned by the data store; customers carry the
//! opaque string ID issued by the identity provider.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Macro to define a type-safe numeric ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Ord`, `Hash`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>` and `Into<i32>` implementations
///
/// # Example
///
/// ```rust
/// # use makan_core::define_id;
/// define_id!(HawkerId);
/// define_id!(StallId);
///
/// let hawker_id = HawkerId::new(1);
/// let stall_id = StallId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: HawkerId = stall_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.parse::<i32>().map(Self)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(HawkerId);
define_id!(StallId);

/// Error parsing a [`CustomerId`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum CustomerIdError {
    /// The input string is empty.
    #[error("customer id cannot be empty")]
    Empty,
}

/// Opaque customer identifier issued by the identity provider.
///
/// Unlike the numeric catalog IDs this is provider-assigned and treated as an
/// opaque string; it is used verbatim in data-store paths and composite keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Parse a `CustomerId` from a provider-issued string.
    ///
    /// # Errors
    ///
    /// Returns `CustomerIdError::Empty` if the input is empty.
    pub fn parse(s: &str) -> Result<Self, CustomerIdError> {
        if s.is_empty() {
            return Err(CustomerIdError::Empty);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CustomerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id_roundtrip() {
        let id = StallId::new(10);
        assert_eq!(id.as_i32(), 10);
        assert_eq!(id.to_string(), "10");
        assert_eq!("10".parse::<StallId>().unwrap(), id);
    }

    #[test]
    fn test_numeric_id_serde_transparent() {
        let id = HawkerId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        let parsed: HawkerId = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_customer_id_rejects_empty() {
        assert!(matches!(CustomerId::parse(""), Err(CustomerIdError::Empty)));
    }

    #[test]
    fn test_customer_id_display() {
        let id = CustomerId::parse("u-abc123").unwrap();
        assert_eq!(id.to_string(), "u-abc123");
        assert_eq!(id.as_str(), "u-abc123");
    }
}
