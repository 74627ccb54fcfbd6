//! Order history and order detail pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use makan_core::{Order, OrderId, format_sgd};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Order summary display data (history rows, confirmation page).
#[derive(Clone)]
pub struct OrderSummaryView {
    pub id: String,
    pub stall_id: String,
    pub placed_at: String,
    pub status: &'static str,
    pub item_count: u32,
    pub grand_total: String,
}

impl From<&Order> for OrderSummaryView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            stall_id: order.stall_id.to_string(),
            placed_at: order.placed_at.format("%-d %b %Y, %H:%M").to_string(),
            status: order.status.label(),
            item_count: order.items.iter().map(|line| line.qty).sum(),
            grand_total: format_sgd(order.totals.grand_total),
        }
    }
}

/// Order line display data.
#[derive(Clone)]
pub struct OrderLineView {
    pub code: String,
    pub name: String,
    pub qty: u32,
    pub unit_price: String,
    pub line_total: String,
}

/// Full order display data for the detail page.
#[derive(Clone)]
pub struct OrderDetailView {
    pub id: String,
    pub stall_name: String,
    pub placed_at: String,
    pub status: &'static str,
    pub pay_type: String,
    pub lines: Vec<OrderLineView>,
    pub subtotal: String,
    pub gst: String,
    pub svc: String,
    pub rush: String,
    pub fee_total: String,
    pub grand_total: String,
}

/// Order history page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub orders: Vec<OrderSummaryView>,
    pub logged_in: bool,
}

/// Order detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub order: OrderDetailView,
    pub logged_in: bool,
}

/// Display the customer's order history, newest first.
#[instrument(skip(state, customer))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
) -> Result<impl IntoResponse> {
    let orders = state.store().orders_for_user(&customer.id).await?;

    Ok(OrdersIndexTemplate {
        orders: orders.iter().map(OrderSummaryView::from).collect(),
        logged_in: true,
    })
}

/// Display one order.
///
/// Customers only ever see their own orders; anyone else's ID answers 404
/// rather than 403 so order IDs stay unguessable.
#[instrument(skip(state, customer))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let order_id = id
        .parse::<OrderId>()
        .map_err(|_| AppError::BadRequest("invalid order id".to_owned()))?;

    let order = state
        .store()
        .order(order_id)
        .await?
        .filter(|order| order.user_id == customer.id)
        .ok_or_else(|| AppError::NotFound(format!("order {order_id}")))?;

    let stall_name = state
        .store()
        .stall(order.stall_id)
        .await?
        .map_or_else(|| format!("Stall {}", order.stall_id), |stall| stall.name);

    let lines = order
        .items
        .iter()
        .map(|line| OrderLineView {
            code: line.item_code.to_string(),
            name: line.name.clone(),
            qty: line.qty,
            unit_price: format_sgd(line.unit_price),
            line_total: format_sgd(line.unit_price * rust_decimal::Decimal::from(line.qty)),
        })
        .collect();

    Ok(OrderShowTemplate {
        order: OrderDetailView {
            id: order.id.to_string(),
            stall_name,
            placed_at: order.placed_at.format("%-d %b %Y, %H:%M").to_string(),
            status: order.status.label(),
            pay_type: order.pay_type.to_string(),
            lines,
            subtotal: format_sgd(order.totals.subtotal),
            gst: format_sgd(order.totals.gst),
            svc: format_sgd(order.totals.svc),
            rush: format_sgd(order.totals.rush),
            fee_total: format_sgd(order.totals.fee_total),
            grand_total: format_sgd(order.totals.grand_total),
        },
        logged_in: true,
    })
}
