//! `PostgreSQL` pool for session storage.
//!
//! The storefront keeps no domain tables locally; all catalog, order and
//! like data lives in the hosted food store. `PostgreSQL` exists solely to
//! back `tower-sessions` (the durable per-device state: cart blobs,
//! favorite sets, the saved return-to URL and the cached profile photo).

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
