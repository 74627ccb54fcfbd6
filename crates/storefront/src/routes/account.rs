//! Profile page and profile mutations.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::{RequireAuth, set_current_customer};
use crate::models::session_keys;
use crate::state::AppState;

/// Upper bound on an uploaded photo data URL (roughly a 250 KB image).
const MAX_PHOTO_DATA_URL_LEN: usize = 350_000;

// =============================================================================
// Form & Query Types
// =============================================================================

/// Profile update form data.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub display_name: String,
}

/// Photo upload form data (a base64 data URL produced client-side).
#[derive(Debug, Deserialize)]
pub struct PhotoForm {
    pub photo: String,
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

/// Account page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountTemplate {
    pub display_name: String,
    pub email: String,
    pub photo: Option<String>,
    pub is_vendor: bool,
    pub error: Option<String>,
    pub success: Option<String>,
    pub logged_in: bool,
}

fn account_message(code: &str) -> String {
    match code {
        "profile" => "Profile updated.",
        "photo" => "Photo updated.",
        "name" => "Please enter a display name.",
        "photo_invalid" => "That does not look like a valid image.",
        "photo_size" => "That image is too large.",
        "save" => "Something went wrong saving your profile. Please try again.",
        _ => "Something went wrong. Please try again.",
    }
    .to_string()
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the profile page.
#[instrument(skip(session, customer))]
pub async fn index(
    session: Session,
    RequireAuth(customer): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    // The photo is device-local: a cached data URL, never sent to the store.
    let photo: Option<String> = session
        .get(session_keys::PROFILE_PHOTO)
        .await
        .ok()
        .flatten();

    AccountTemplate {
        display_name: customer.display_name.clone(),
        email: customer.email.to_string(),
        photo,
        is_vendor: customer.is_vendor(),
        error: query.error.as_deref().map(account_message),
        success: query.success.as_deref().map(account_message),
        logged_in: true,
    }
}

/// Update the display name.
#[instrument(skip(state, session, customer, form))]
pub async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(customer): RequireAuth,
    Form(form): Form<ProfileForm>,
) -> Result<Response> {
    let display_name = form.display_name.trim();
    if display_name.is_empty() {
        return Ok(Redirect::to("/account?error=name").into_response());
    }

    let mut profile = state
        .store()
        .profile(&customer.id)
        .await?
        .unwrap_or_default();
    profile.display_name = display_name.to_owned();

    if let Err(e) = state.store().put_profile(&customer.id, &profile).await {
        tracing::error!("Failed to update profile: {e}");
        return Ok(Redirect::to("/account?error=save").into_response());
    }

    // Keep the session identity in step with the profile record.
    let mut updated = customer;
    updated.display_name = profile.display_name;
    set_current_customer(&session, &updated).await?;

    Ok(Redirect::to("/account?success=profile").into_response())
}

/// Cache a profile photo in the session as a data URL.
#[instrument(skip(session, form))]
pub async fn upload_photo(
    session: Session,
    RequireAuth(_customer): RequireAuth,
    Form(form): Form<PhotoForm>,
) -> Result<Response> {
    if form.photo.len() > MAX_PHOTO_DATA_URL_LEN {
        return Ok(Redirect::to("/account?error=photo_size").into_response());
    }

    if !is_valid_image_data_url(&form.photo) {
        return Ok(Redirect::to("/account?error=photo_invalid").into_response());
    }

    session
        .insert(session_keys::PROFILE_PHOTO, &form.photo)
        .await?;

    Ok(Redirect::to("/account?success=photo").into_response())
}

/// Check that a string is a `data:image/...;base64,...` URL with a payload
/// that actually decodes.
fn is_valid_image_data_url(data_url: &str) -> bool {
    let Some(rest) = data_url.strip_prefix("data:image/") else {
        return false;
    };
    let Some((_media, payload)) = rest.split_once(";base64,") else {
        return false;
    };
    !payload.is_empty() && BASE64.decode(payload).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_data_url() {
        // A 1x1 transparent GIF
        let url = "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";
        assert!(is_valid_image_data_url(url));
    }

    #[test]
    fn test_rejects_non_image() {
        assert!(!is_valid_image_data_url("data:text/plain;base64,aGVsbG8="));
    }

    #[test]
    fn test_rejects_bad_base64() {
        assert!(!is_valid_image_data_url("data:image/png;base64,@@@@"));
    }

    #[test]
    fn test_rejects_missing_payload() {
        assert!(!is_valid_image_data_url("data:image/png;base64,"));
        assert!(!is_valid_image_data_url("not a data url"));
    }
}
