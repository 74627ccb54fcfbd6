//! Vendor dashboard and menu management.
//!
//! All routes here sit behind [`RequireVendor`]; a vendor account must also
//! have a stall assigned on its profile before anything renders.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use makan_core::{ItemCode, StallId};

use crate::error::{AppError, Result};
use crate::filters;
use crate::foodstore::{ComplaintRecord, DishRecord};
use crate::middleware::RequireVendor;
use crate::models::CurrentCustomer;
use crate::routes::hawkers::StallView;
use crate::routes::orders::OrderSummaryView;
use crate::state::AppState;

// =============================================================================
// Form & Query Types
// =============================================================================

/// Menu item create/update form data.
#[derive(Debug, Deserialize)]
pub struct DishForm {
    /// Only read on create; updates take the code from the path.
    pub code: Option<String>,
    pub name: String,
    pub unit_price: String,
    #[serde(default)]
    pub description: String,
    /// Checkbox: present means available.
    pub available: Option<String>,
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

/// Vendor menu row display data.
///
/// `price` is the bare decimal (e.g. `"4.50"`) so the edit form can round-
/// trip it straight back through the price parser.
#[derive(Clone)]
pub struct VendorDishView {
    pub code: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub available: bool,
}

/// Complaint display data for the vendor dashboard.
#[derive(Clone)]
pub struct ComplaintView {
    pub subject: String,
    pub message: String,
    pub submitted_at: String,
}

impl From<&ComplaintRecord> for ComplaintView {
    fn from(record: &ComplaintRecord) -> Self {
        Self {
            subject: record.subject.clone(),
            message: record.message.clone(),
            submitted_at: record.submitted_at.format("%-d %b %Y, %H:%M").to_string(),
        }
    }
}

/// Vendor dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "vendor/index.html")]
pub struct VendorTemplate {
    pub stall: StallView,
    pub dishes: Vec<VendorDishView>,
    pub orders: Vec<OrderSummaryView>,
    pub complaints: Vec<ComplaintView>,
    pub error: Option<String>,
    pub success: Option<String>,
    pub logged_in: bool,
}

fn vendor_message(code: &str) -> String {
    match code {
        "saved" => "Menu item saved.",
        "deleted" => "Menu item deleted.",
        "code" => "Item codes may only contain letters, digits and dashes.",
        "name" => "Please give the dish a name.",
        "price" => "Please enter a valid, non-negative price.",
        "save" => "Something went wrong saving the menu. Please try again.",
        _ => "Something went wrong. Please try again.",
    }
    .to_string()
}

/// The stall assigned to this vendor account.
fn assigned_stall(customer: &CurrentCustomer) -> Result<StallId> {
    customer.stall_id.ok_or_else(|| {
        AppError::Forbidden("this vendor account has no stall assigned".to_owned())
    })
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the vendor dashboard: menu, incoming orders, complaints.
#[instrument(skip(state, customer))]
pub async fn dashboard(
    State(state): State<AppState>,
    RequireVendor(customer): RequireVendor,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let stall_id = assigned_stall(&customer)?;

    let stall = state
        .store()
        .stall(stall_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("stall {stall_id}")))?;

    let dishes = state.store().menu(stall_id).await?;
    let orders = state.store().orders_for_stall(stall_id).await?;
    let complaints = state.store().complaints_for_stall(stall_id).await?;

    Ok(VendorTemplate {
        stall: StallView::from(&stall),
        dishes: dishes
            .iter()
            .map(|dish| VendorDishView {
                code: dish.code.to_string(),
                name: dish.name.clone(),
                description: dish.description.clone(),
                price: dish.unit_price.to_string(),
                available: dish.available,
            })
            .collect(),
        orders: orders.iter().map(OrderSummaryView::from).collect(),
        complaints: complaints.iter().map(ComplaintView::from).collect(),
        error: query.error.as_deref().map(vendor_message),
        success: query.success.as_deref().map(vendor_message),
        logged_in: true,
    })
}

/// Create a menu item.
#[instrument(skip(state, customer, form))]
pub async fn create_dish(
    State(state): State<AppState>,
    RequireVendor(customer): RequireVendor,
    Form(form): Form<DishForm>,
) -> Result<Response> {
    let stall_id = assigned_stall(&customer)?;

    let Some(code) = form.code.as_deref().and_then(|c| ItemCode::parse(c).ok()) else {
        return Ok(Redirect::to("/vendor?error=code").into_response());
    };

    upsert_dish(&state, stall_id, &code, &form).await
}

/// Update a menu item.
#[instrument(skip(state, customer, form))]
pub async fn update_dish(
    State(state): State<AppState>,
    RequireVendor(customer): RequireVendor,
    Path(code): Path<String>,
    Form(form): Form<DishForm>,
) -> Result<Response> {
    let stall_id = assigned_stall(&customer)?;

    let Ok(code) = ItemCode::parse(&code) else {
        return Ok(Redirect::to("/vendor?error=code").into_response());
    };

    upsert_dish(&state, stall_id, &code, &form).await
}

/// Delete a menu item.
#[instrument(skip(state, customer))]
pub async fn delete_dish(
    State(state): State<AppState>,
    RequireVendor(customer): RequireVendor,
    Path(code): Path<String>,
) -> Result<Response> {
    let stall_id = assigned_stall(&customer)?;

    let Ok(code) = ItemCode::parse(&code) else {
        return Ok(Redirect::to("/vendor?error=code").into_response());
    };

    match state.store().delete_dish(stall_id, &code).await {
        Ok(()) => Ok(Redirect::to("/vendor?success=deleted").into_response()),
        Err(e) => {
            tracing::error!("Failed to delete dish: {e}");
            Ok(Redirect::to("/vendor?error=save").into_response())
        }
    }
}

async fn upsert_dish(
    state: &AppState,
    stall_id: StallId,
    code: &ItemCode,
    form: &DishForm,
) -> Result<Response> {
    let name = form.name.trim();
    if name.is_empty() {
        return Ok(Redirect::to("/vendor?error=name").into_response());
    }

    let Ok(unit_price) = form.unit_price.trim().parse::<Decimal>() else {
        return Ok(Redirect::to("/vendor?error=price").into_response());
    };
    if unit_price.is_sign_negative() {
        return Ok(Redirect::to("/vendor?error=price").into_response());
    }

    let record = DishRecord {
        name: name.to_owned(),
        unit_price,
        description: form.description.trim().to_owned(),
        available: form.available.is_some(),
    };

    match state.store().put_dish(stall_id, code, &record).await {
        Ok(()) => Ok(Redirect::to("/vendor?success=saved").into_response()),
        Err(e) => {
            tracing::error!("Failed to save dish: {e}");
            Ok(Redirect::to("/vendor?error=save").into_response())
        }
    }
}
