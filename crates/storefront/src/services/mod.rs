//! Application services bridging the pure core library to session and
//! gateway state.

mod cart_store;
mod checkout;
mod favorites;

pub use cart_store::CartStore;
pub use checkout::place_orders;
pub use favorites::FavoriteStore;
