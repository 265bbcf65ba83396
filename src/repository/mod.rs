//! Storage capabilities consumed by the query engine.
//!
//! Each trait is a narrow capability; [`DieselRepository`] and
//! [`memory::InMemoryRepository`] implement all of them.

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::brand::{NewBrand, ProductBrand};
use crate::domain::filter::{FilterExpr, Sort};
use crate::domain::product::{NewProduct, Product};
use crate::domain::product_type::{NewProductType, ProductType};
use crate::domain::types::ProductId;
use crate::pagination::PageWindow;
use crate::repository::errors::RepositoryResult;

pub mod brand;
pub mod errors;
pub mod memory;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod product;
pub mod product_type;

/// Find request: filter, ordering and an optional page window.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    pub filter: FilterExpr,
    pub sort: Sort,
    pub window: Option<PageWindow>,
}

impl ProductQuery {
    pub fn new(filter: FilterExpr) -> Self {
        Self {
            filter,
            sort: Sort::default(),
            window: None,
        }
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn paginate(mut self, window: PageWindow) -> Self {
        self.window = Some(window);
        self
    }
}

/// Outcome of a single-record write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteAck {
    /// The backend accepted the write.
    pub acknowledged: bool,
    /// Records matched by the write predicate.
    pub affected: usize,
}

impl WriteAck {
    pub const fn acknowledged(affected: usize) -> Self {
        Self {
            acknowledged: true,
            affected,
        }
    }

    /// Whether exactly one record was touched.
    pub const fn is_single(&self) -> bool {
        self.acknowledged && self.affected == 1
    }
}

pub trait ProductReader {
    /// Products matching the query, ordered and windowed.
    fn find_products(&self, query: &ProductQuery) -> RepositoryResult<Vec<Product>>;
    /// Number of products matching the filter, ignoring any window.
    fn count_products(&self, filter: &FilterExpr) -> RepositoryResult<usize>;
}

pub trait ProductWriter {
    fn insert_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    /// Replaces the record whose id equals `product.id`.
    fn replace_product(&self, product: &Product) -> RepositoryResult<WriteAck>;
    fn delete_product(&self, id: ProductId) -> RepositoryResult<WriteAck>;
}

pub trait BrandReader {
    fn list_brands(&self) -> RepositoryResult<Vec<ProductBrand>>;
}

pub trait BrandWriter {
    fn create_brand(&self, new_brand: &NewBrand) -> RepositoryResult<ProductBrand>;
}

pub trait TypeReader {
    fn list_types(&self) -> RepositoryResult<Vec<ProductType>>;
}

pub trait TypeWriter {
    fn create_type(&self, new_type: &NewProductType) -> RepositoryResult<ProductType>;
}

/// SQLite-backed implementation of every catalog capability.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_write_requires_ack_and_one_record() {
        assert!(WriteAck::acknowledged(1).is_single());
        assert!(!WriteAck::acknowledged(0).is_single());
        assert!(
            !WriteAck {
                acknowledged: false,
                affected: 1,
            }
            .is_single()
        );
    }

    #[test]
    fn query_defaults_to_name_order_without_window() {
        let query = ProductQuery::new(FilterExpr::all());
        assert_eq!(query.sort, Sort::default());
        assert!(query.window.is_none());
    }
}
