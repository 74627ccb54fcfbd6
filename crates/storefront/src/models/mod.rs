//! Shared model types for the storefront.

pub mod session;

pub use session::{CurrentCustomer, session_keys};
