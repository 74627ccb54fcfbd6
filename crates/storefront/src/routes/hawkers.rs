//! Hawker centre detail: the stall list.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use makan_core::HawkerId;

use crate::error::{AppError, Result};
use crate::filters;
use crate::foodstore::Stall;
use crate::middleware::OptionalAuth;
use crate::routes::home::HawkerView;
use crate::state::AppState;

/// Stall display data for templates.
#[derive(Clone)]
pub struct StallView {
    pub id: String,
    pub name: String,
    pub cuisine: String,
    pub description: String,
    pub open: bool,
}

impl From<&Stall> for StallView {
    fn from(stall: &Stall) -> Self {
        Self {
            id: stall.id.to_string(),
            name: stall.name.clone(),
            cuisine: stall.cuisine.clone(),
            description: stall.description.clone(),
            open: stall.open,
        }
    }
}

/// Hawker centre page template.
#[derive(Template, WebTemplate)]
#[template(path = "hawkers/show.html")]
pub struct HawkerShowTemplate {
    pub hawker: HawkerView,
    pub stalls: Vec<StallView>,
    pub logged_in: bool,
}

/// Display the stalls of one hawker centre.
#[instrument(skip(state, customer))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(customer): OptionalAuth,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let id = HawkerId::new(id);
    let hawker = state
        .store()
        .hawker(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("hawker centre {id}")))?;

    let stalls = state.store().stalls_for_hawker(id).await?;

    Ok(HawkerShowTemplate {
        hawker: HawkerView::from(&hawker),
        stalls: stalls.iter().map(StallView::from).collect(),
        logged_in: customer.is_some(),
    })
}
