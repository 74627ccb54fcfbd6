//! Hosted identity provider client.
//!
//! Registration, login and session identity are fully delegated to a hosted
//! email/password identity provider; the storefront stores no credentials
//! of its own. Email shape and minimum password length are checked locally
//! before any provider call, and provider error codes are mapped onto the
//! typed [`IdentityError`].

mod error;

pub use error::IdentityError;

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::instrument;

use makan_core::{CustomerId, Email};

use crate::config::IdentityConfig;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// An authenticated identity as reported by the provider.
#[derive(Debug, Clone)]
pub struct IdentitySession {
    /// Provider-assigned opaque user ID.
    pub user_id: CustomerId,
    /// The registered email address.
    pub email: Email,
    /// Display name recorded with the provider, if any.
    pub display_name: Option<String>,
}

// =============================================================================
// Wire types
// =============================================================================

/// Successful response body for `signUp` / `signInWithPassword`.
#[derive(Debug, Deserialize)]
struct ProviderSessionBody {
    #[serde(rename = "localId")]
    local_id: String,
    email: String,
    #[serde(rename = "displayName", default)]
    display_name: Option<String>,
}

/// Error response body: `{"error": {"message": "EMAIL_EXISTS"}}`.
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    message: String,
}

#[derive(Debug, serde::Serialize)]
struct CredentialRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(rename = "displayName", skip_serializing_if = "Option::is_none")]
    display_name: Option<&'a str>,
    #[serde(rename = "returnSecureToken")]
    return_secure_token: bool,
}

// =============================================================================
// IdentityClient
// =============================================================================

/// Client for the hosted identity provider.
#[derive(Clone)]
pub struct IdentityClient {
    inner: Arc<IdentityClientInner>,
}

struct IdentityClientInner {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl IdentityClient {
    /// Create a new identity provider client.
    #[must_use]
    pub fn new(config: &IdentityConfig) -> Self {
        Self {
            inner: Arc::new(IdentityClientInner {
                client: reqwest::Client::new(),
                api_url: config.api_url.clone(),
                api_key: config.api_key.expose_secret().to_string(),
            }),
        }
    }

    /// Register a new account with email and password.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::InvalidEmail` if the email is malformed,
    /// `IdentityError::WeakPassword` if the password is too short, and
    /// `IdentityError::EmailExists` if the address is already registered.
    #[instrument(skip(self, password, display_name))]
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<IdentitySession, IdentityError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        self.credential_call(
            "accounts:signUp",
            &CredentialRequest {
                email: email.as_str(),
                password,
                display_name: Some(display_name),
                return_secure_token: true,
            },
        )
        .await
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::InvalidCredentials` if the email/password is
    /// wrong.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<IdentitySession, IdentityError> {
        let email = Email::parse(email)?;

        self.credential_call(
            "accounts:signInWithPassword",
            &CredentialRequest {
                email: email.as_str(),
                password,
                display_name: None,
                return_secure_token: true,
            },
        )
        .await
    }

    /// Probe connectivity with an intentionally failing lookup.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::Transport` if the provider is unreachable.
    pub async fn ping(&self) -> Result<(), IdentityError> {
        // An empty credential call answers with a provider error, which is
        // still proof the endpoint is reachable and the key is routed.
        match self.login("probe@makanlah.sg", "probe-password").await {
            Ok(_) | Err(IdentityError::InvalidCredentials | IdentityError::UserNotFound) => Ok(()),
            Err(e) => Err(e),
        }
    }

    async fn credential_call(
        &self,
        endpoint: &str,
        request: &CredentialRequest<'_>,
    ) -> Result<IdentitySession, IdentityError> {
        let url = format!(
            "{}/{}?key={}",
            self.inner.api_url, endpoint, self.inner.api_key
        );

        let response = self.inner.client.post(url).json(request).send().await?;

        if !response.status().is_success() {
            let body: ProviderErrorBody = response
                .json()
                .await
                .map_err(|e| IdentityError::Malformed(e.to_string()))?;
            return Err(map_provider_error(&body.error.message));
        }

        let body: ProviderSessionBody = response
            .json()
            .await
            .map_err(|e| IdentityError::Malformed(e.to_string()))?;

        let user_id = CustomerId::parse(&body.local_id)
            .map_err(|e| IdentityError::Malformed(e.to_string()))?;
        let email = Email::parse(&body.email).map_err(|e| IdentityError::Malformed(e.to_string()))?;

        Ok(IdentitySession {
            user_id,
            email,
            display_name: body.display_name,
        })
    }
}

/// Map a provider error code onto the typed error.
fn map_provider_error(code: &str) -> IdentityError {
    match code {
        "EMAIL_EXISTS" => IdentityError::EmailExists,
        "EMAIL_NOT_FOUND" => IdentityError::UserNotFound,
        "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => IdentityError::InvalidCredentials,
        "WEAK_PASSWORD" => IdentityError::WeakPassword("password rejected by provider".to_owned()),
        other => IdentityError::Provider(other.to_owned()),
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), IdentityError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(IdentityError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password_too_short() {
        assert!(matches!(
            validate_password("short"),
            Err(IdentityError::WeakPassword(_))
        ));
    }

    #[test]
    fn test_validate_password_ok() {
        assert!(validate_password("long-enough-password").is_ok());
    }

    #[test]
    fn test_map_provider_error_codes() {
        assert!(matches!(
            map_provider_error("EMAIL_EXISTS"),
            IdentityError::EmailExists
        ));
        assert!(matches!(
            map_provider_error("EMAIL_NOT_FOUND"),
            IdentityError::UserNotFound
        ));
        assert!(matches!(
            map_provider_error("INVALID_PASSWORD"),
            IdentityError::InvalidCredentials
        ));
        assert!(matches!(
            map_provider_error("SOMETHING_ELSE"),
            IdentityError::Provider(_)
        ));
    }
}
