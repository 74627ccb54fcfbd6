//! Home page: the hawker centre list.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::foodstore::HawkerCentre;
use crate::middleware::OptionalAuth;
use crate::state::AppState;

/// Hawker centre display data for templates.
#[derive(Clone)]
pub struct HawkerView {
    pub id: String,
    pub name: String,
    pub address: String,
    pub description: String,
}

impl From<&HawkerCentre> for HawkerView {
    fn from(hawker: &HawkerCentre) -> Self {
        Self {
            id: hawker.id.to_string(),
            name: hawker.name.clone(),
            address: hawker.address.clone(),
            description: hawker.description.clone(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub hawkers: Vec<HawkerView>,
    pub logged_in: bool,
}

/// Display the hawker centre list.
#[instrument(skip(state, customer))]
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(customer): OptionalAuth,
) -> Result<impl IntoResponse> {
    let hawkers = state.store().hawkers().await?;

    Ok(HomeTemplate {
        hawkers: hawkers.iter().map(HawkerView::from).collect(),
        logged_in: customer.is_some(),
    })
}
