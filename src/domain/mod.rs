//! Domain aggregates exposed by the catalog query engine.

pub mod brand;
pub mod filter;
pub mod product;
pub mod product_type;
pub mod types;
