//! CLI command implementations.

pub mod check;
pub mod seed;

use secrecy::SecretString;

use makan_storefront::config::{FoodStoreConfig, IdentityConfig};

/// Error loading gateway settings from the environment.
#[derive(Debug, thiserror::Error)]
#[error("missing environment variable: {0}")]
pub struct MissingEnvVar(String);

fn required_env(key: &str) -> Result<String, MissingEnvVar> {
    std::env::var(key).map_err(|_| MissingEnvVar(key.to_owned()))
}

/// Load the data store settings the CLI needs.
///
/// Unlike the storefront, the CLI does not require the full application
/// configuration (no sessions, no base URL).
pub fn foodstore_config() -> Result<FoodStoreConfig, MissingEnvVar> {
    let _ = dotenvy::dotenv();
    Ok(FoodStoreConfig {
        base_url: required_env("FOODSTORE_URL")?.trim_end_matches('/').to_owned(),
        api_key: SecretString::from(required_env("FOODSTORE_API_KEY")?),
    })
}

/// Load the identity provider settings the CLI needs.
pub fn identity_config() -> Result<IdentityConfig, MissingEnvVar> {
    let _ = dotenvy::dotenv();
    Ok(IdentityConfig {
        api_url: required_env("IDENTITY_API_URL")?.trim_end_matches('/').to_owned(),
        api_key: SecretString::from(required_env("IDENTITY_API_KEY")?),
    })
}
