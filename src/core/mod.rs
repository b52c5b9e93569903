//! Core business logic - framework-agnostic collaborators over the entities.
//!
//! Each submodule owns one resource the order pipeline coordinates: carts and
//! their line items, restaurant menus, restaurant schedules, payments, and the
//! order lifecycle itself.

/// Cart operations: creation, totals maintenance, locking, retirement
pub mod cart;
/// Menu item lookups and availability management
pub mod menu;
/// Order placement entry point and lifecycle operations
pub mod order;
/// Payment creation and order linking
pub mod payment;
/// Restaurant lookups and schedule queries
pub mod restaurant;
