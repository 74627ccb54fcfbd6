//! Authentication route handlers.
//!
//! Login, registration and logout are delegated to the hosted identity
//! provider; the storefront only keeps the session identity and the profile
//! record in the food store. After login the customer is returned to the
//! URL saved when an authenticated page bounced them here.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::foodstore::Profile;
use crate::identity::IdentityError;
use crate::middleware::{clear_current_customer, set_current_customer};
use crate::models::{CurrentCustomer, session_keys};
use crate::state::AppState;

// =============================================================================
// Form & Query Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub display_name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
    pub logged_in: bool,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub logged_in: bool,
}

fn login_error_message(code: &str) -> String {
    match code {
        "credentials" => "Email or password is incorrect.",
        "session" => "Your session expired, please try again.",
        _ => "Something went wrong. Please try again.",
    }
    .to_string()
}

fn register_error_message(code: &str) -> String {
    match code {
        "mismatch" => "The passwords do not match.",
        "exists" => "An account with this email already exists.",
        "weak" => "Password must be at least 8 characters.",
        "email" => "Please enter a valid email address.",
        _ => "Something went wrong. Please try again.",
    }
    .to_string()
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error.as_deref().map(login_error_message),
        success: query
            .success
            .map(|_| "Account created. Welcome to Makan!".to_string()),
        logged_in: false,
    }
}

/// Handle login form submission.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let identity = match state.identity().login(&form.email, &form.password).await {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!("Login failed: {e}");
            return Redirect::to("/auth/login?error=credentials").into_response();
        }
    };

    // The profile record carries role and display name; a missing or
    // unreadable profile degrades to a plain customer account.
    let profile = match state.store().profile(&identity.user_id).await {
        Ok(profile) => profile.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Failed to fetch profile after login: {e}");
            Profile::default()
        }
    };

    let display_name = if profile.display_name.is_empty() {
        identity
            .display_name
            .clone()
            .unwrap_or_else(|| identity.email.to_string())
    } else {
        profile.display_name.clone()
    };

    let customer = CurrentCustomer {
        id: identity.user_id,
        email: identity.email,
        display_name,
        role: profile.role,
        stall_id: profile.stall_id,
    };

    if let Err(e) = set_current_customer(&session, &customer).await {
        tracing::error!("Failed to set session: {e}");
        return Redirect::to("/auth/login?error=session").into_response();
    }

    set_sentry_user(&customer.id, Some(customer.email.as_str()));

    // Return to wherever the customer was headed before login.
    let return_to: Option<String> = session
        .remove(session_keys::RETURN_TO)
        .await
        .ok()
        .flatten();

    Redirect::to(return_to.as_deref().unwrap_or("/")).into_response()
}

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate {
        error: query.error.as_deref().map(register_error_message),
        logged_in: false,
    }
}

/// Handle registration form submission.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.password != form.password_confirm {
        return Redirect::to("/auth/register?error=mismatch").into_response();
    }

    let display_name = form.display_name.trim();

    let identity = match state
        .identity()
        .register(&form.email, &form.password, display_name)
        .await
    {
        Ok(identity) => identity,
        Err(IdentityError::EmailExists) => {
            return Redirect::to("/auth/register?error=exists").into_response();
        }
        Err(IdentityError::WeakPassword(_)) => {
            return Redirect::to("/auth/register?error=weak").into_response();
        }
        Err(IdentityError::InvalidEmail(_)) => {
            return Redirect::to("/auth/register?error=email").into_response();
        }
        Err(e) => {
            tracing::error!("Registration failed: {e}");
            return Redirect::to("/auth/register?error=provider").into_response();
        }
    };

    // Seed the profile record. A failed write is recoverable (login falls
    // back to a default profile), so it does not fail the registration.
    let profile = Profile {
        display_name: if display_name.is_empty() {
            identity.email.to_string()
        } else {
            display_name.to_owned()
        },
        ..Profile::default()
    };
    if let Err(e) = state.store().put_profile(&identity.user_id, &profile).await {
        tracing::warn!("Failed to store profile for new account: {e}");
    }

    let customer = CurrentCustomer {
        id: identity.user_id,
        email: identity.email,
        display_name: profile.display_name,
        role: profile.role,
        stall_id: profile.stall_id,
    };

    if let Err(e) = set_current_customer(&session, &customer).await {
        tracing::error!("Failed to set session: {e}");
        return Redirect::to("/auth/login?success=registered").into_response();
    }

    set_sentry_user(&customer.id, Some(customer.email.as_str()));

    Redirect::to("/").into_response()
}

/// Handle logout.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_customer(&session).await {
        tracing::warn!("Failed to clear session on logout: {e}");
    }
    clear_sentry_user();

    Redirect::to("/").into_response()
}
