//! Drink catalog.
//!
//! Static seed data plus the search operations over it. The catalog is built
//! once and shared read-only; mutations never touch it.

pub mod drink;
pub mod service;

pub use drink::{Alcoholic, Drink};
pub use service::{CatalogError, CatalogService};
