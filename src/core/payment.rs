//! Payment business logic - Creating charges and linking them to orders.
//!
//! A payment row exists before the order it will pay for: the payment stage
//! inserts it mid-pipeline, and the finalize stage calls [`link_to_order`]
//! once the order row exists. Both run inside the same transaction, so a
//! payment is never observable without its order.

use crate::{
    entities::{Payment, PaymentStatus, payment},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::debug;

/// Finds a payment by its unique ID, returning `None` if it does not exist.
pub async fn get_payment_by_id<C>(conn: &C, payment_id: i32) -> Result<Option<payment::Model>>
where
    C: ConnectionTrait,
{
    Payment::find_by_id(payment_id)
        .one(conn)
        .await
        .map_err(Into::into)
}

/// Records an authorized charge for the given amount.
///
/// The payment starts in `Authorized` with no order attached.
pub async fn create_payment<C>(conn: &C, amount: f64) -> Result<payment::Model>
where
    C: ConnectionTrait,
{
    let payment = payment::ActiveModel {
        amount: Set(amount),
        status: Set(PaymentStatus::Authorized),
        order_id: Set(None),
        ..Default::default()
    }
    .insert(conn)
    .await?;
    debug!("Created payment {} for amount {:.2}", payment.id, amount);
    Ok(payment)
}

/// Ties an authorized payment to the order it settles and marks it completed.
///
/// # Errors
/// Returns `Error::NotFound` if the payment does not exist.
pub async fn link_to_order<C>(conn: &C, payment_id: i32, order_id: i32) -> Result<payment::Model>
where
    C: ConnectionTrait,
{
    let payment = get_payment_by_id(conn, payment_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "payment",
            id: payment_id,
        })?;

    let mut active: payment::ActiveModel = payment.into();
    active.order_id = Set(Some(order_id));
    active.status = Set(PaymentStatus::Completed);
    active.update(conn).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_payment_starts_authorized_and_unlinked() -> Result<()> {
        let db = setup_test_db().await?;

        let payment = create_payment(&db, 19.98).await?;
        assert_eq!(payment.amount, 19.98);
        assert_eq!(payment.status, PaymentStatus::Authorized);
        assert_eq!(payment.order_id, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_link_to_order() -> Result<()> {
        let db = setup_test_db().await?;
        let payment = create_payment(&db, 8.00).await?;

        let linked = link_to_order(&db, payment.id, 31).await?;
        assert_eq!(linked.order_id, Some(31));
        assert_eq!(linked.status, PaymentStatus::Completed);

        let reloaded = get_payment_by_id(&db, payment.id).await?.unwrap();
        assert_eq!(reloaded, linked);
        Ok(())
    }

    #[tokio::test]
    async fn test_link_missing_payment() -> Result<()> {
        let db = setup_test_db().await?;
        let result = link_to_order(&db, 404, 1).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound {
                entity: "payment",
                id: 404
            }
        ));
        Ok(())
    }
}
