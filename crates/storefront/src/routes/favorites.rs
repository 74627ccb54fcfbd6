//! Favorite toggle fragment (HTMX).

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::IntoResponse};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use makan_core::{ItemCode, StallId};

use crate::error::{AppError, Result};
use crate::middleware::OptionalAuth;
use crate::services::FavoriteStore;
use crate::state::AppState;

/// Favorite toggle form data.
#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    pub stall_id: i32,
    pub item_code: String,
}

/// Favorite button fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/favorite_button.html")]
pub struct FavoriteButtonTemplate {
    pub stall_id: String,
    pub item_code: String,
    pub active: bool,
}

/// Toggle a favorite dish: add if absent, remove if present.
///
/// Guests toggle against the device session; logged-in customers also get
/// the remote likes mirror.
#[instrument(skip(state, session, customer))]
pub async fn toggle(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(customer): OptionalAuth,
    Form(form): Form<ToggleForm>,
) -> Result<impl IntoResponse> {
    let stall_id = StallId::new(form.stall_id);
    let item_code =
        ItemCode::parse(&form.item_code).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let active = FavoriteStore::new(&session, state.store(), customer.as_ref(), stall_id)
        .toggle(&item_code)
        .await?;

    Ok(FavoriteButtonTemplate {
        stall_id: stall_id.to_string(),
        item_code: item_code.to_string(),
        active,
    })
}
