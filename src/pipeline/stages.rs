//! The five concrete stages of the order-placement chain.
//!
//! Three checks (cart lock, item availability, restaurant hours), then two
//! side-effecting actions (payment, finalize). Checks pass the context through
//! unchanged; the actions write the fields they own into the response. Field
//! ownership is documented on [`crate::pipeline::context::OrderResponse`].

use crate::core::{cart, menu, payment, restaurant};
use crate::entities::CartStatus;
use crate::errors::{Error, Result};
use crate::pipeline::context::OrderContext;
use crate::pipeline::gateway::PaymentGateway;
use crate::pipeline::stage::OrderStage;
use async_trait::async_trait;
use sea_orm::DatabaseTransaction;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Stage 1: the cart must exist and must not already be locked for ordering.
///
/// Reads nothing from the response and writes nothing; locking itself is
/// coordinated by [`crate::pipeline::lock::CartLockRegistry`] before stage 1
/// and by the storage-visible `ReadOnly` status this stage checks.
pub struct CartLockCheck;

#[async_trait]
impl OrderStage for CartLockCheck {
    fn name(&self) -> &'static str {
        "cart_lock_check"
    }

    async fn run(&self, txn: &DatabaseTransaction, ctx: &mut OrderContext) -> Result<()> {
        let cart_id = ctx.request.cart_id;
        let cart = cart::get_cart_by_id(txn, cart_id)
            .await?
            .ok_or(Error::CartUnavailable { cart_id })?;

        debug!("Cart {} status: {:?}", cart_id, cart.status);
        if cart.status == CartStatus::ReadOnly {
            return Err(Error::CartLocked { cart_id });
        }
        Ok(())
    }
}

/// Stage 2: every item the cart references must exist and be orderable.
///
/// The cart's stored lines are the source of truth; the request's item list
/// is cross-checked against them and any disagreement is an invalid cart
/// state. Availability fails fast on the first bad item, in line-id order.
pub struct ItemsAvailabilityCheck;

fn line_counts<I>(lines: I) -> BTreeMap<i32, i32>
where
    I: IntoIterator<Item = (i32, i32)>,
{
    let mut counts = BTreeMap::new();
    for (menu_item_id, quantity) in lines {
        *counts.entry(menu_item_id).or_insert(0) += quantity;
    }
    counts
}

#[async_trait]
impl OrderStage for ItemsAvailabilityCheck {
    fn name(&self) -> &'static str {
        "items_availability_check"
    }

    async fn run(&self, txn: &DatabaseTransaction, ctx: &mut OrderContext) -> Result<()> {
        let cart_id = ctx.request.cart_id;
        let lines = cart::get_cart_items(txn, cart_id).await?;

        let stored = line_counts(lines.iter().map(|l| (l.menu_item_id, l.quantity)));
        let requested = line_counts(ctx.request.items.iter().map(|l| (l.menu_item_id, l.quantity)));
        if stored != requested {
            return Err(Error::InvalidCartState {
                cart_id,
                message: "requested items do not match the cart's line items".to_string(),
            });
        }

        for line in &lines {
            if !menu::is_available(txn, line.menu_item_id).await? {
                return Err(Error::ItemUnavailable {
                    item_id: line.menu_item_id,
                });
            }
        }
        debug!("All {} cart lines available for cart {}", lines.len(), cart_id);
        Ok(())
    }
}

/// Stage 3: the restaurant must exist and be open at the processing time.
pub struct RestaurantHoursCheck;

#[async_trait]
impl OrderStage for RestaurantHoursCheck {
    fn name(&self) -> &'static str {
        "restaurant_hours_check"
    }

    async fn run(&self, txn: &DatabaseTransaction, ctx: &mut OrderContext) -> Result<()> {
        let restaurant_id = ctx.request.restaurant_id;
        let restaurant = restaurant::get_restaurant_by_id(txn, restaurant_id)
            .await?
            .ok_or(Error::RestaurantClosed { restaurant_id })?;

        let now = chrono::Utc::now().time();
        if !restaurant.is_open_at(now) {
            return Err(Error::RestaurantClosed { restaurant_id });
        }
        Ok(())
    }
}

/// Stage 4: authorize and persist the charge for the cart's total.
///
/// Owns `total_price` and `payment_id` in the response.
pub struct PaymentProcess {
    gateway: Arc<dyn PaymentGateway>,
}

impl PaymentProcess {
    /// Builds the stage around the external authorizer.
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl OrderStage for PaymentProcess {
    fn name(&self) -> &'static str {
        "payment_process"
    }

    async fn run(&self, txn: &DatabaseTransaction, ctx: &mut OrderContext) -> Result<()> {
        let cart_id = ctx.request.cart_id;
        let cart = cart::get_cart_by_id(txn, cart_id)
            .await?
            .ok_or(Error::CartUnavailable { cart_id })?;

        let amount = cart.total_price;
        self.gateway
            .authorize(amount)
            .await
            .map_err(|reason| Error::PaymentFailed { reason })?;

        let payment = payment::create_payment(txn, amount).await?;
        ctx.response.total_price = Some(amount);
        ctx.response.payment_id = Some(payment.id);
        info!(
            "Payment {} authorized for cart {}: {:.2}",
            payment.id, cart_id, amount
        );
        Ok(())
    }
}

/// Stage 5 (terminal): retire the cart and materialize the order.
///
/// Deletes the cart and its lines, inserts the order in `Purchased`, links
/// the payment back to it, and owns `order_id`, `order_time` and
/// `order_status` in the response. This is the only irreversible stage; its
/// writes are the last inside the transaction boundary.
pub struct FinalizeOrder;

#[async_trait]
impl OrderStage for FinalizeOrder {
    fn name(&self) -> &'static str {
        "finalize_order"
    }

    async fn run(&self, txn: &DatabaseTransaction, ctx: &mut OrderContext) -> Result<()> {
        let request = &ctx.request;
        let payment_id = ctx.response.payment_id.ok_or_else(|| Error::Config {
            message: "finalize stage ran before a payment was processed".to_string(),
        })?;
        let total_price = ctx.response.total_price.ok_or_else(|| Error::Config {
            message: "finalize stage ran without a charged total".to_string(),
        })?;

        // The cart has been consumed into the order; its lifetime ends here.
        cart::delete_cart_with_items(txn, request.cart_id).await?;

        let restaurant = restaurant::get_restaurant_by_id(txn, request.restaurant_id)
            .await?
            .ok_or(Error::NotFound {
                entity: "restaurant",
                id: request.restaurant_id,
            })?;
        let charged = payment::get_payment_by_id(txn, payment_id)
            .await?
            .ok_or(Error::NotFound {
                entity: "payment",
                id: payment_id,
            })?;

        let order =
            crate::core::order::save_order(txn, restaurant.id, charged.id, total_price).await?;
        payment::link_to_order(txn, charged.id, order.id).await?;

        ctx.response.order_id = Some(order.id);
        ctx.response.order_time = Some(order.order_time);
        ctx.response.order_status = Some(order.status);
        info!("Order {} has been placed successfully.", order.id);
        Ok(())
    }
}
