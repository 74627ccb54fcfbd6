//! Menu item codes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`ItemCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum ItemCodeError {
    /// The input string is empty.
    #[error("item code cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("item code must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[A-Za-z0-9-]`.
    #[error("item code may only contain letters, digits and dashes")]
    InvalidCharacter,
}

/// A stall-scoped menu item code (e.g. `"A1"`, `"laksa-std"`).
///
/// Codes are unique within one stall's menu. Underscores are rejected so
/// that the composite cart line key `"{stall_id}_{item_code}"` stays
/// unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCode(String);

impl ItemCode {
    /// Maximum length of an item code.
    pub const MAX_LENGTH: usize = 32;

    /// Parse an `ItemCode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 32 characters, or
    /// contains anything other than ASCII letters, digits and dashes.
    pub fn parse(s: &str) -> Result<Self, ItemCodeError> {
        if s.is_empty() {
            return Err(ItemCodeError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(ItemCodeError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ItemCodeError::InvalidCharacter);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemCode {
    type Err = ItemCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ItemCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_codes() {
        assert!(ItemCode::parse("A1").is_ok());
        assert!(ItemCode::parse("laksa-std").is_ok());
        assert!(ItemCode::parse("42").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(ItemCode::parse(""), Err(ItemCodeError::Empty)));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(33);
        assert!(matches!(
            ItemCode::parse(&long),
            Err(ItemCodeError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_underscore() {
        assert!(matches!(
            ItemCode::parse("A_1"),
            Err(ItemCodeError::InvalidCharacter)
        ));
    }

    #[test]
    fn test_parse_rejects_whitespace() {
        assert!(matches!(
            ItemCode::parse("A 1"),
            Err(ItemCodeError::InvalidCharacter)
        ));
    }

    #[test]
    fn test_serde_transparent() {
        let code = ItemCode::parse("A1").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"A1\"");
    }
}
