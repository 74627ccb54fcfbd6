//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Hawker centre list (home)
//! GET  /health                  - Health check
//!
//! # Catalog
//! GET  /hawkers/{id}            - Stall list for one hawker centre
//! GET  /stalls/{id}             - Menu (dish list) for one stall
//! GET  /stalls/{id}/dishes/{code} - Dish detail
//!
//! # Cart (HTMX fragments)
//! GET  /cart                    - Cart page
//! POST /cart/add                - Add line (returns count fragment, triggers cart-updated)
//! POST /cart/update             - Set line quantity (returns cart_items fragment)
//! POST /cart/remove             - Remove line (returns cart_items fragment)
//! GET  /cart/count              - Cart count badge (fragment)
//!
//! # Checkout
//! POST /checkout                - Materialize one order per stall, then confirmation
//!
//! # Orders (requires auth)
//! GET  /orders                  - Order history
//! GET  /orders/{id}             - Order detail
//!
//! # Favorites (HTMX fragment)
//! POST /favorites/toggle        - Toggle a favorite dish
//!
//! # Feedback
//! GET  /feedback  POST /feedback     - Feedback form & submit
//! GET  /complaints POST /complaints  - Stall complaint form & submit
//!
//! # Auth
//! GET  /auth/login  POST /auth/login
//! GET  /auth/register POST /auth/register
//! POST /auth/logout
//!
//! # Account (requires auth)
//! GET  /account                 - Profile page
//! POST /account/profile         - Update display name
//! POST /account/photo           - Cache profile photo (data URL)
//!
//! # Vendor (requires vendor role)
//! GET  /vendor                  - Dashboard: menu, orders, complaints
//! POST /vendor/dishes           - Create menu item
//! POST /vendor/dishes/{code}    - Update menu item
//! POST /vendor/dishes/{code}/delete - Delete menu item
//! ```

pub mod account;
pub mod auth;
pub mod cart;
pub mod favorites;
pub mod feedback;
pub mod hawkers;
pub mod home;
pub mod orders;
pub mod stalls;
pub mod vendor;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::index))
        .route("/profile", post(account::update_profile))
        .route("/photo", post(account::upload_photo))
}

/// Create the vendor routes router.
pub fn vendor_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(vendor::dashboard))
        .route("/dishes", post(vendor::create_dish))
        .route("/dishes/{code}", post(vendor::update_dish))
        .route("/dishes/{code}/delete", post(vendor::delete_dish))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog
        .route("/hawkers/{id}", get(hawkers::show))
        .route("/stalls/{id}", get(stalls::show))
        .route("/stalls/{id}/dishes/{code}", get(stalls::dish))
        // Cart
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
        // Orders
        .route("/orders", get(orders::index))
        .route("/orders/{id}", get(orders::show))
        // Favorites
        .route("/favorites/toggle", post(favorites::toggle))
        // Feedback & complaints
        .route("/feedback", get(feedback::feedback_page).post(feedback::submit_feedback))
        .route(
            "/complaints",
            get(feedback::complaint_page).post(feedback::submit_complaint),
        )
        // Auth
        .nest("/auth", auth_routes())
        // Account
        .nest("/account", account_routes())
        // Vendor
        .nest("/vendor", vendor_routes())
}
