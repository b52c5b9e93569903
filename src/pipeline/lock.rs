//! Per-cart mutual exclusion for in-flight orders.
//!
//! Order placement is not instantaneous, and two concurrent requests against
//! the same cart must not both proceed past the lock-check stage. The
//! registry is acquired before stage 1 and the guard releases on terminal
//! success or abort alike, so at most one order per cart is ever in flight
//! within this process. The `ReadOnly` cart status remains the
//! storage-visible lock that stage 1 checks on top of this.

use crate::errors::{Error, Result};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Registry of cart ids with an order currently in flight.
#[derive(Debug, Default)]
pub struct CartLockRegistry {
    in_flight: Mutex<HashSet<i32>>,
}

impl CartLockRegistry {
    /// Creates an empty registry, wrapped in an `Arc` for sharing across
    /// request handlers.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Claims the cart for one in-flight order.
    ///
    /// # Errors
    /// Returns `Error::CartLocked` if another order against the same cart is
    /// already past its lock check.
    pub fn try_acquire(&self, cart_id: i32) -> Result<CartLockGuard<'_>> {
        let mut held = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !held.insert(cart_id) {
            return Err(Error::CartLocked { cart_id });
        }
        Ok(CartLockGuard {
            registry: self,
            cart_id,
        })
    }
}

/// Holds the claim on a cart; dropping it releases the cart.
#[derive(Debug)]
pub struct CartLockGuard<'a> {
    registry: &'a CartLockRegistry,
    cart_id: i32,
}

impl Drop for CartLockGuard<'_> {
    fn drop(&mut self) {
        self.registry
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.cart_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_rejected() {
        let registry = CartLockRegistry::new();
        let _guard = registry.try_acquire(5).unwrap();

        let second = registry.try_acquire(5);
        assert!(matches!(
            second.unwrap_err(),
            Error::CartLocked { cart_id: 5 }
        ));
    }

    #[test]
    fn test_distinct_carts_do_not_contend() {
        let registry = CartLockRegistry::new();
        let _a = registry.try_acquire(1).unwrap();
        let _b = registry.try_acquire(2).unwrap();
    }

    #[test]
    fn test_drop_releases_the_cart() {
        let registry = CartLockRegistry::new();
        {
            let _guard = registry.try_acquire(9).unwrap();
        }
        assert!(registry.try_acquire(9).is_ok());
    }
}
