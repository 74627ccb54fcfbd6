//! Authentication extractors.
//!
//! Provides extractors for requiring customer or vendor authentication in
//! route handlers. Pages behind `RequireAuth` save the requested URL in the
//! session so login can return the customer to where they were headed.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentCustomer, session_keys};

/// Extractor that requires a logged-in customer.
///
/// If the customer is not logged in, saves the requested URL and redirects
/// to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(customer): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", customer.display_name)
/// }
/// ```
pub struct RequireAuth(pub CurrentCustomer);

/// Extractor that requires a logged-in customer with the vendor role.
///
/// Non-vendors get a blocking access-denied page rather than a redirect.
pub struct RequireVendor(pub CurrentCustomer);

/// Error returned when authentication or authorization fails.
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (session layer missing).
    Unauthorized,
    /// Logged in but not allowed to view the page.
    AccessDenied,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::AccessDenied => (
                StatusCode::FORBIDDEN,
                Html(
                    "<h1>Access denied</h1>\
                     <p>This page is only available to stall operators.</p>\
                     <p><a href=\"/\">Back to hawker centres</a></p>",
                ),
            )
                .into_response(),
        }
    }
}

async fn current_customer(parts: &mut Parts) -> Result<CurrentCustomer, AuthRejection> {
    // Get the session from extensions (set by SessionManagerLayer)
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or(AuthRejection::Unauthorized)?;

    let customer: Option<CurrentCustomer> = session
        .get(session_keys::CURRENT_CUSTOMER)
        .await
        .ok()
        .flatten();

    match customer {
        Some(customer) => Ok(customer),
        None => {
            // Save where the customer was headed so login can return there.
            let return_to = parts
                .uri
                .path_and_query()
                .map_or_else(|| parts.uri.path().to_owned(), ToString::to_string);
            if let Err(e) = session.insert(session_keys::RETURN_TO, &return_to).await {
                tracing::warn!("Failed to save return-to URL: {e}");
            }
            Err(AuthRejection::RedirectToLogin)
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_customer(parts).await.map(Self)
    }
}

impl<S> FromRequestParts<S> for RequireVendor
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(customer) = RequireAuth::from_request_parts(parts, state).await?;
        if !customer.is_vendor() {
            return Err(AuthRejection::AccessDenied);
        }
        Ok(Self(customer))
    }
}

/// Extractor that optionally gets the current customer.
///
/// Unlike `RequireAuth`, this does not reject the request if the customer is
/// not logged in.
pub struct OptionalAuth(pub Option<CurrentCustomer>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let customer = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentCustomer>(session_keys::CURRENT_CUSTOMER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(customer))
    }
}

/// Helper to set the current customer in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_customer(
    session: &Session,
    customer: &CurrentCustomer,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::CURRENT_CUSTOMER, customer)
        .await
}

/// Helper to clear the current customer from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_customer(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentCustomer>(session_keys::CURRENT_CUSTOMER)
        .await?;
    Ok(())
}
