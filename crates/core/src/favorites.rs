//! Favorite-dish sets.
//!
//! Favorites are stored as a serialized array and deduplicated through set
//! semantics on load. Scoping (per stall or per hawker centre, per customer
//! identity) is the storage key's concern, not this type's.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A deduplicated set of favorite keys (dish line keys or stall ids).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet(BTreeSet<String>);

impl FavoriteSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Build a set from stored entries, discarding duplicates.
    #[must_use]
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(entries.into_iter().map(Into::into).collect())
    }

    /// Toggle membership: add if absent, remove if present.
    ///
    /// Returns `true` if the key is a member after the toggle.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.0.remove(key) {
            false
        } else {
            self.0.insert(key.to_owned());
            true
        }
    }

    /// Whether the key is currently a favorite.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    /// Number of favorites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the favorite keys in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a FavoriteSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut favorites = FavoriteSet::from_entries(["10_A", "10_B"]);

        assert!(!favorites.toggle("10_A"));
        assert!(!favorites.contains("10_A"));

        assert!(favorites.toggle("10_A"));
        assert!(favorites.contains("10_A"));

        assert_eq!(favorites, FavoriteSet::from_entries(["10_A", "10_B"]));
    }

    #[test]
    fn test_load_deduplicates() {
        let favorites = FavoriteSet::from_entries(["10_A", "10_A", "10_B"]);
        assert_eq!(favorites.len(), 2);
    }

    #[test]
    fn test_serializes_as_array() {
        let favorites = FavoriteSet::from_entries(["10_B", "10_A"]);
        let json = serde_json::to_string(&favorites).unwrap();
        assert_eq!(json, "[\"10_A\",\"10_B\"]");
    }

    #[test]
    fn test_deserializes_from_array_with_duplicates() {
        let favorites: FavoriteSet = serde_json::from_str("[\"10_A\",\"10_A\"]").unwrap();
        assert_eq!(favorites.len(), 1);
    }
}
