//! Filtered, sorted and paginated product queries over a catalog store.
//!
//! [`services`] holds the query engine, [`repository`] the storage
//! capabilities it runs against, and [`domain`] the request and entity types
//! shared by both.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "data")]
pub mod services;

/// Page size used when the caller does not provide one.
pub const DEFAULT_PAGE_SIZE: usize = 10;
