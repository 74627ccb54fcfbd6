//! Order materialization at checkout.
//!
//! The cart is partitioned into one draft per stall (see
//! [`makan_core::checkout`]) and the drafts are submitted sequentially as
//! independent order-create calls. The first failure aborts the remaining
//! partitions; orders already created stay created - partial success is
//! possible and is not reconciled, there is no compensation and no retry.

use tracing::instrument;

use makan_core::{Cart, CustomerId, Order, PayType, order_drafts};

use crate::foodstore::{StoreClient, StoreError};

/// Submit one order per stall represented in the cart.
///
/// Returns every order that was created. Callers clear the cart only when
/// this returns `Ok`; on `Err` the cart is left untouched so the customer
/// can retry, even though some partitions may already have gone through.
///
/// # Errors
///
/// Returns the first `StoreError` encountered; remaining partitions are not
/// attempted.
#[instrument(skip(store, cart), fields(stalls = cart.items_by_stall().len()))]
pub async fn place_orders(
    store: &StoreClient,
    cart: &Cart,
    user_id: &CustomerId,
    pay_type: PayType,
) -> Result<Vec<Order>, StoreError> {
    let drafts = order_drafts(cart, user_id, pay_type);

    let mut orders = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let order = store.create_order(draft).await?;
        orders.push(order);
    }

    Ok(orders)
}
