//! Gateway connectivity checks.

use makan_storefront::foodstore::StoreClient;
use makan_storefront::identity::IdentityClient;

/// Probe the data store and the identity provider.
///
/// # Errors
///
/// Returns an error if configuration is missing or either gateway is
/// unreachable.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = StoreClient::new(&super::foodstore_config()?);
    store.ping().await?;
    tracing::info!("data store reachable");

    let identity = IdentityClient::new(&super::identity_config()?);
    identity.ping().await?;
    tracing::info!("identity provider reachable");

    Ok(())
}
