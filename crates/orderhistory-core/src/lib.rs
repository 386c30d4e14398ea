//! Core contracts and helpers for orderhistory.
//!
//! This crate defines the catalog and order types, the catalog loader, and the
//! error type shared by the store, the generator and the CLI.

pub mod catalog;
pub mod error;
pub mod model;

pub use catalog::{Catalog, Item, load_catalog, parse_catalog};
pub use error::{Error, Result};
pub use model::{GeneratedOrder, Order, OrderDetail, OrderLine, OrderSummary, ORDER_DATE_FORMAT};
