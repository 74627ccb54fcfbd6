//! Cache types for catalog reads.

use super::types::{Dish, HawkerCentre, Stall};

/// Cache key for catalog lookups.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Hawkers,
    Hawker(i32),
    HawkerStalls(i32),
    Stall(i32),
    Menu(i32),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Hawkers(Vec<HawkerCentre>),
    Hawker(Box<HawkerCentre>),
    Stalls(Vec<Stall>),
    Stall(Box<Stall>),
    Menu(Vec<Dish>),
}
