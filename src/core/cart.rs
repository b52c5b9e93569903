//! Cart business logic - Handles all cart-related operations.
//!
//! The cart collaborator owns cart lifetimes: it creates carts from menu
//! selections (computing per-line and cart totals from current menu prices),
//! flips the storage-visible lock when checkout begins, and retires a cart
//! together with its line items once an order has been finalized from it.
//! The order pipeline itself only ever reads carts through this module.

use crate::{
    entities::{Cart, CartItem, CartStatus, cart, cart_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info};

/// Finds a cart by its unique ID, returning `None` if it does not exist.
pub async fn get_cart_by_id<C>(conn: &C, cart_id: i32) -> Result<Option<cart::Model>>
where
    C: ConnectionTrait,
{
    Cart::find_by_id(cart_id)
        .one(conn)
        .await
        .map_err(Into::into)
}

/// Retrieves the line items of a cart, ordered by line ID.
///
/// The ordering makes fail-fast availability checks deterministic: the first
/// unavailable item reported is always the earliest line added.
pub async fn get_cart_items<C>(conn: &C, cart_id: i32) -> Result<Vec<cart_item::Model>>
where
    C: ConnectionTrait,
{
    CartItem::find()
        .filter(cart_item::Column::CartId.eq(cart_id))
        .order_by_asc(cart_item::Column::Id)
        .all(conn)
        .await
        .map_err(Into::into)
}

/// Creates a cart for a customer from `(menu_item_id, quantity)` selections.
///
/// Unit prices are read from the referenced menu items, line totals are
/// quantity x unit price, and the cart totals are the sums over all lines.
/// The cart and its lines are inserted atomically; the cart starts `Open`.
///
/// # Errors
/// * `Error::Config` if no lines are given or a quantity is not positive
/// * `Error::NotFound` if a referenced menu item does not exist
pub async fn create_cart(
    db: &DatabaseConnection,
    customer_id: i32,
    lines: &[(i32, i32)],
) -> Result<cart::Model> {
    if lines.is_empty() {
        return Err(Error::Config {
            message: "cannot create a cart without line items".to_string(),
        });
    }
    if let Some((menu_item_id, _)) = lines.iter().find(|(_, quantity)| *quantity <= 0) {
        return Err(Error::Config {
            message: format!("quantity for menu item {menu_item_id} must be positive"),
        });
    }

    let txn = db.begin().await?;

    let mut priced_lines = Vec::with_capacity(lines.len());
    let mut total_price = 0.0;
    let mut total_items = 0;
    for &(menu_item_id, quantity) in lines {
        let item = crate::core::menu::get_menu_item_by_id(&txn, menu_item_id)
            .await?
            .ok_or(Error::NotFound {
                entity: "menu item",
                id: menu_item_id,
            })?;
        let line_total = item.price * f64::from(quantity);
        total_price += line_total;
        total_items += quantity;
        priced_lines.push((menu_item_id, quantity, item.price, line_total));
    }

    let cart = cart::ActiveModel {
        customer_id: Set(customer_id),
        total_price: Set(total_price),
        total_items: Set(total_items),
        status: Set(CartStatus::Open),
        discount: Set(None),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for (menu_item_id, quantity, unit_price, line_total) in priced_lines {
        cart_item::ActiveModel {
            cart_id: Set(cart.id),
            menu_item_id: Set(menu_item_id),
            quantity: Set(quantity),
            unit_price: Set(unit_price),
            total_price: Set(Some(line_total)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    info!(
        "Created cart {} for customer {}: {} items totaling {:.2}",
        cart.id, customer_id, cart.total_items, cart.total_price
    );
    Ok(cart)
}

/// Flips a cart to `ReadOnly`, the storage-visible lock honored by the
/// cart-lock-check stage. This is how an external checkout flow marks a cart
/// as having an order in flight.
///
/// # Errors
/// Returns `Error::CartUnavailable` if the cart does not exist.
pub async fn mark_read_only(db: &DatabaseConnection, cart_id: i32) -> Result<cart::Model> {
    let cart = get_cart_by_id(db, cart_id)
        .await?
        .ok_or(Error::CartUnavailable { cart_id })?;

    let mut active: cart::ActiveModel = cart.into();
    active.status = Set(CartStatus::ReadOnly);
    let updated = active.update(db).await?;
    debug!("Cart {} marked read-only", cart_id);
    Ok(updated)
}

/// Deletes a cart together with all of its line items.
///
/// The finalize stage calls this inside the order transaction: the cart's
/// lifetime ends the moment it is consumed into an order. Deleting an unknown
/// cart is a no-op, matching the collaborator's delete contract.
pub async fn delete_cart_with_items<C>(conn: &C, cart_id: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    CartItem::delete_many()
        .filter(cart_item::Column::CartId.eq(cart_id))
        .exec(conn)
        .await?;
    Cart::delete_by_id(cart_id).exec(conn).await?;
    debug!("Cart {} and its items deleted", cart_id);
    Ok(())
}
