//! HTTP middleware: sessions and authentication extractors.

mod auth;
mod session;

pub use auth::{
    OptionalAuth, RequireAuth, RequireVendor, clear_current_customer, set_current_customer,
};
pub use session::create_session_layer;
