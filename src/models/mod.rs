//! Database models backing the catalog repository.

pub mod brand;
pub mod config;
pub mod product;
pub mod product_type;
