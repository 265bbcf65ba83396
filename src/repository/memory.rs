//! Process-local implementation of the catalog capabilities.
//!
//! Useful for tests and for embedding the engine without a database. Products
//! are stored normalized (brand and type by id) and joined on read, so
//! renaming a brand is reflected in every product, as with the SQL backend.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::brand::{NewBrand, ProductBrand};
use crate::domain::filter::FilterExpr;
use crate::domain::product::{NewProduct, Product};
use crate::domain::product_type::{NewProductType, ProductType};
use crate::domain::types::{BrandId, ProductId, TypeId};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    BrandReader, BrandWriter, ProductQuery, ProductReader, ProductWriter, TypeReader, TypeWriter,
    WriteAck,
};

#[derive(Clone, Debug)]
struct StoredProduct {
    id: ProductId,
    name: String,
    summary: Option<String>,
    description: Option<String>,
    image_file: Option<String>,
    price: f64,
    brand_id: BrandId,
    type_id: TypeId,
}

#[derive(Debug, Default)]
struct CatalogState {
    brands: Vec<ProductBrand>,
    types: Vec<ProductType>,
    products: Vec<StoredProduct>,
    last_brand_id: i32,
    last_type_id: i32,
    last_product_id: i32,
}

impl CatalogState {
    fn brand(&self, id: BrandId) -> RepositoryResult<&ProductBrand> {
        self.brands
            .iter()
            .find(|brand| brand.id == id)
            .ok_or_else(|| RepositoryError::ConstraintViolation(format!("unknown brand {id}")))
    }

    fn product_type(&self, id: TypeId) -> RepositoryResult<&ProductType> {
        self.types
            .iter()
            .find(|product_type| product_type.id == id)
            .ok_or_else(|| RepositoryError::ConstraintViolation(format!("unknown type {id}")))
    }

    fn join(&self, stored: &StoredProduct) -> RepositoryResult<Product> {
        Ok(Product {
            id: stored.id,
            name: stored.name.clone(),
            summary: stored.summary.clone(),
            description: stored.description.clone(),
            image_file: stored.image_file.clone(),
            price: stored.price,
            brand: self.brand(stored.brand_id)?.clone(),
            product_type: self.product_type(stored.type_id)?.clone(),
        })
    }

    fn matching(&self, filter: &FilterExpr) -> RepositoryResult<Vec<Product>> {
        let mut matched = Vec::new();
        for stored in &self.products {
            let product = self.join(stored)?;
            if filter.matches(&product) {
                matched.push(product);
            }
        }
        Ok(matched)
    }

    fn check_unique_name<'a>(
        names: impl IntoIterator<Item = &'a str>,
        name: &str,
    ) -> RepositoryResult<()> {
        if names.into_iter().any(|existing| existing == name) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "Unique constraint violation: {name}"
            )));
        }
        Ok(())
    }
}

fn next_id(last: &mut i32) -> RepositoryResult<i32> {
    *last = last
        .checked_add(1)
        .ok_or_else(|| RepositoryError::Unexpected("identifier space exhausted".to_string()))?;
    Ok(*last)
}

/// In-memory catalog guarded by a read/write lock.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: RwLock<CatalogState>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, CatalogState>> {
        self.state
            .read()
            .map_err(|_| RepositoryError::ConnectionError("catalog lock poisoned".to_string()))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, CatalogState>> {
        self.state
            .write()
            .map_err(|_| RepositoryError::ConnectionError("catalog lock poisoned".to_string()))
    }
}

impl ProductReader for InMemoryRepository {
    fn find_products(&self, query: &ProductQuery) -> RepositoryResult<Vec<Product>> {
        let state = self.read()?;
        let mut products = state.matching(&query.filter)?;
        products.sort_by(|a, b| query.sort.compare(a, b));

        Ok(match query.window {
            Some(window) => products
                .into_iter()
                .skip(window.skip())
                .take(window.limit())
                .collect(),
            None => products,
        })
    }

    fn count_products(&self, filter: &FilterExpr) -> RepositoryResult<usize> {
        Ok(self.read()?.matching(filter)?.len())
    }
}

impl ProductWriter for InMemoryRepository {
    fn insert_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
        let mut state = self.write()?;
        state.brand(new_product.brand_id)?;
        state.product_type(new_product.type_id)?;

        let id = ProductId::new(next_id(&mut state.last_product_id)?)?;
        let stored = StoredProduct {
            id,
            name: new_product.name.clone(),
            summary: new_product.summary.clone(),
            description: new_product.description.clone(),
            image_file: new_product.image_file.clone(),
            price: new_product.price,
            brand_id: new_product.brand_id,
            type_id: new_product.type_id,
        };
        let product = state.join(&stored)?;
        state.products.push(stored);

        Ok(product)
    }

    fn replace_product(&self, product: &Product) -> RepositoryResult<WriteAck> {
        let mut state = self.write()?;
        let Some(index) = state.products.iter().position(|p| p.id == product.id) else {
            return Ok(WriteAck::acknowledged(0));
        };
        state.brand(product.brand.id)?;
        state.product_type(product.product_type.id)?;

        state.products[index] = StoredProduct {
            id: product.id,
            name: product.name.clone(),
            summary: product.summary.clone(),
            description: product.description.clone(),
            image_file: product.image_file.clone(),
            price: product.price,
            brand_id: product.brand.id,
            type_id: product.product_type.id,
        };

        Ok(WriteAck::acknowledged(1))
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<WriteAck> {
        let mut state = self.write()?;
        let before = state.products.len();
        state.products.retain(|p| p.id != id);

        Ok(WriteAck::acknowledged(before - state.products.len()))
    }
}

impl BrandReader for InMemoryRepository {
    fn list_brands(&self) -> RepositoryResult<Vec<ProductBrand>> {
        Ok(self.read()?.brands.clone())
    }
}

impl BrandWriter for InMemoryRepository {
    fn create_brand(&self, new_brand: &NewBrand) -> RepositoryResult<ProductBrand> {
        let mut state = self.write()?;
        CatalogState::check_unique_name(
            state.brands.iter().map(|b| b.name.as_str()),
            new_brand.name.as_str(),
        )?;

        let brand = ProductBrand {
            id: BrandId::new(next_id(&mut state.last_brand_id)?)?,
            name: new_brand.name.as_str().to_string(),
        };
        state.brands.push(brand.clone());

        Ok(brand)
    }
}

impl TypeReader for InMemoryRepository {
    fn list_types(&self) -> RepositoryResult<Vec<ProductType>> {
        Ok(self.read()?.types.clone())
    }
}

impl TypeWriter for InMemoryRepository {
    fn create_type(&self, new_type: &NewProductType) -> RepositoryResult<ProductType> {
        let mut state = self.write()?;
        CatalogState::check_unique_name(
            state.types.iter().map(|t| t.name.as_str()),
            new_type.name.as_str(),
        )?;

        let product_type = ProductType {
            id: TypeId::new(next_id(&mut state.last_type_id)?)?,
            name: new_type.name.as_str().to_string(),
        };
        state.types.push(product_type.clone());

        Ok(product_type)
    }
}
