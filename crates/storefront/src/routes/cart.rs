//! Cart route handlers.
//!
//! Cart mutations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the device session, namespaced by customer
//! identity (see [`crate::services::CartStore`]); nothing touches the
//! remote store until checkout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use makan_core::{Cart, ItemCode, PayType, StallId, compute_fees, format_sgd};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::session_keys;
use crate::routes::orders::OrderSummaryView;
use crate::services::{CartStore, place_orders};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub stall_id: String,
    pub item_code: String,
    pub name: String,
    pub qty: u32,
    pub unit_price: String,
    pub line_total: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    pub subtotal: String,
    pub gst: String,
    pub svc: String,
    pub rush: String,
    pub fee_total: String,
    pub grand_total: String,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&Cart::default())
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let subtotal = cart.subtotal();
        let fees = compute_fees(subtotal);

        Self {
            items: cart
                .items
                .values()
                .map(|line| CartItemView {
                    stall_id: line.stall_id.to_string(),
                    item_code: line.item_code.to_string(),
                    name: line.name.clone(),
                    qty: line.qty,
                    unit_price: format_sgd(line.unit_price),
                    line_total: format_sgd(line.line_total()),
                })
                .collect(),
            item_count: cart.item_count(),
            subtotal: format_sgd(subtotal),
            gst: format_sgd(fees.gst),
            svc: format_sgd(fees.svc),
            rush: format_sgd(fees.rush),
            fee_total: format_sgd(fees.fee_total),
            grand_total: format_sgd(subtotal + fees.fee_total),
        }
    }
}

// =============================================================================
// Form & Query Types
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub stall_id: i32,
    pub item_code: String,
    pub qty: Option<u32>,
}

/// Update cart line form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub stall_id: i32,
    pub item_code: String,
    pub qty: u32,
}

/// Remove cart line form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub stall_id: i32,
    pub item_code: String,
}

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub pay_type: String,
}

/// Query parameters for error display on the cart page.
#[derive(Debug, Deserialize)]
pub struct CartQuery {
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub error: Option<String>,
    pub logged_in: bool,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Checkout confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/confirmation.html")]
pub struct CheckoutConfirmationTemplate {
    pub orders: Vec<OrderSummaryView>,
    pub logged_in: bool,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart page.
#[instrument(skip(session, customer))]
pub async fn show(
    session: Session,
    OptionalAuth(customer): OptionalAuth,
    Query(query): Query<CartQuery>,
) -> impl IntoResponse {
    let cart = CartStore::new(&session, customer.as_ref()).load().await;

    let error = query.error.as_deref().map(|code| {
        match code {
            "checkout" => "Something went wrong placing your order. Please try again.",
            "pay_type" => "Please pick how you want to pay.",
            _ => "Something went wrong. Please try again.",
        }
        .to_string()
    });

    CartShowTemplate {
        cart: CartView::from(&cart),
        error,
        logged_in: customer.is_some(),
    }
}

/// Add a dish to the cart (HTMX).
///
/// The dish's canonical name and price are read from the menu, never from
/// the form. Returns the count badge with a trigger so other fragments
/// refresh.
#[instrument(skip(state, session, customer))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(customer): OptionalAuth,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let stall_id = StallId::new(form.stall_id);
    let item_code =
        ItemCode::parse(&form.item_code).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let dish = state
        .store()
        .dish(stall_id, &item_code)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("dish {stall_id}/{item_code}")))?;

    if !dish.available {
        return Err(AppError::BadRequest(format!(
            "{} is sold out right now",
            dish.name
        )));
    }

    let cart = CartStore::new(&session, customer.as_ref())
        .add_item(
            stall_id,
            item_code,
            &dish.name,
            dish.unit_price,
            form.qty.unwrap_or(1),
        )
        .await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.item_count(),
        },
    )
        .into_response())
}

/// Set a cart line's quantity (HTMX).
#[instrument(skip(session, customer))]
pub async fn update(
    session: Session,
    OptionalAuth(customer): OptionalAuth,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let item_code =
        ItemCode::parse(&form.item_code).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let cart = CartStore::new(&session, customer.as_ref())
        .set_qty(StallId::new(form.stall_id), &item_code, form.qty)
        .await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response())
}

/// Remove a cart line entirely (HTMX).
#[instrument(skip(session, customer))]
pub async fn remove(
    session: Session,
    OptionalAuth(customer): OptionalAuth,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let item_code =
        ItemCode::parse(&form.item_code).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let cart = CartStore::new(&session, customer.as_ref())
        .set_qty(StallId::new(form.stall_id), &item_code, 0)
        .await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response())
}

/// Get the cart count badge (HTMX).
#[instrument(skip(session, customer))]
pub async fn count(session: Session, OptionalAuth(customer): OptionalAuth) -> impl IntoResponse {
    let cart = CartStore::new(&session, customer.as_ref()).load().await;

    CartCountTemplate {
        count: cart.item_count(),
    }
}

/// Materialize the cart into orders.
///
/// One order is created per distinct stall in the cart, submitted
/// sequentially. The first failure aborts the rest and sends the customer
/// back to the cart with a generic message; orders already created are not
/// rolled back. On full success the cart is cleared and the confirmation
/// page lists every order created.
#[instrument(skip(state, session, customer))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(customer): OptionalAuth,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    // Orders need an owner; guests log in first and come back.
    let Some(customer) = customer else {
        if let Err(e) = session.insert(session_keys::RETURN_TO, "/cart").await {
            tracing::warn!("Failed to save return-to URL: {e}");
        }
        return Ok(Redirect::to("/auth/login").into_response());
    };

    let cart_store = CartStore::new(&session, Some(&customer));
    let cart = cart_store.load().await;

    // Empty cart: nothing to materialize, just show the cart again.
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let Ok(pay_type) = form.pay_type.parse::<PayType>() else {
        return Ok(Redirect::to("/cart?error=pay_type").into_response());
    };

    match place_orders(state.store(), &cart, &customer.id, pay_type).await {
        Ok(orders) => {
            cart_store.clear().await?;

            Ok(CheckoutConfirmationTemplate {
                orders: orders.iter().map(OrderSummaryView::from).collect(),
                logged_in: true,
            }
            .into_response())
        }
        Err(e) => {
            tracing::error!("Checkout failed: {e}");
            Ok(Redirect::to("/cart?error=checkout").into_response())
        }
    }
}
