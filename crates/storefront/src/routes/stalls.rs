//! Stall menu and dish detail pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tower_sessions::Session;
use tracing::instrument;

use makan_core::{FavoriteSet, ItemCode, StallId, format_sgd};

use crate::error::{AppError, Result};
use crate::filters;
use crate::foodstore::Dish;
use crate::middleware::OptionalAuth;
use crate::routes::hawkers::StallView;
use crate::services::FavoriteStore;
use crate::state::AppState;

/// Dish display data for templates.
#[derive(Clone)]
pub struct DishView {
    pub stall_id: String,
    pub code: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub available: bool,
    pub favorite: bool,
}

impl DishView {
    fn new(dish: &Dish, favorites: &FavoriteSet) -> Self {
        Self {
            stall_id: dish.stall_id.to_string(),
            code: dish.code.to_string(),
            name: dish.name.clone(),
            description: dish.description.clone(),
            price: format_sgd(dish.unit_price),
            available: dish.available,
            favorite: favorites.contains(&dish.line_key()),
        }
    }
}

/// Stall menu page template.
#[derive(Template, WebTemplate)]
#[template(path = "stalls/show.html")]
pub struct StallShowTemplate {
    pub stall: StallView,
    pub dishes: Vec<DishView>,
    pub logged_in: bool,
}

/// Dish detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "stalls/dish.html")]
pub struct DishShowTemplate {
    pub stall: StallView,
    pub dish: DishView,
    pub logged_in: bool,
}

/// Display one stall's menu.
#[instrument(skip(state, session, customer))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(customer): OptionalAuth,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let stall_id = StallId::new(id);
    let stall = state
        .store()
        .stall(stall_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("stall {stall_id}")))?;

    let dishes = state.store().menu(stall_id).await?;
    let favorites = FavoriteStore::new(&session, state.store(), customer.as_ref(), stall_id)
        .load()
        .await?;

    Ok(StallShowTemplate {
        stall: StallView::from(&stall),
        dishes: dishes
            .iter()
            .map(|dish| DishView::new(dish, &favorites))
            .collect(),
        logged_in: customer.is_some(),
    })
}

/// Display one dish.
#[instrument(skip(state, session, customer))]
pub async fn dish(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(customer): OptionalAuth,
    Path((id, code)): Path<(i32, String)>,
) -> Result<impl IntoResponse> {
    let stall_id = StallId::new(id);
    let code = ItemCode::parse(&code).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let stall = state
        .store()
        .stall(stall_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("stall {stall_id}")))?;

    let dish = state
        .store()
        .dish(stall_id, &code)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("dish {stall_id}/{code}")))?;

    let favorites = FavoriteStore::new(&session, state.store(), customer.as_ref(), stall_id)
        .load()
        .await?;

    Ok(DishShowTemplate {
        stall: StallView::from(&stall),
        dish: DishView::new(&dish, &favorites),
        logged_in: customer.is_some(),
    })
}
