#![allow(dead_code)]

use catalog_query::db::{DbPool, open_catalog};
use catalog_query::domain::brand::{NewBrand, ProductBrand};
use catalog_query::domain::product::{NewProduct, Product};
use catalog_query::domain::product_type::{NewProductType, ProductType};
use catalog_query::domain::types::NonEmptyString;
use catalog_query::repository::{BrandWriter, ProductWriter, TypeWriter};
use tempfile::TempDir;

/// Migrated SQLite database in a temporary directory, removed on drop.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = open_catalog(path.to_str().expect("utf-8 path")).expect("open catalog");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

pub fn brand<R: BrandWriter + ?Sized>(repo: &R, name: &str) -> ProductBrand {
    repo.create_brand(&NewBrand::new(NonEmptyString::new(name).unwrap()))
        .unwrap()
}

pub fn product_type<R: TypeWriter + ?Sized>(repo: &R, name: &str) -> ProductType {
    repo.create_type(&NewProductType::new(NonEmptyString::new(name).unwrap()))
        .unwrap()
}

pub fn product<R: ProductWriter + ?Sized>(
    repo: &R,
    name: &str,
    price: f64,
    brand: &ProductBrand,
    product_type: &ProductType,
) -> Product {
    repo.insert_product(&NewProduct::new(
        name.to_string(),
        Some(format!("{name} summary")),
        None,
        Some(format!("{}.png", name.to_lowercase())),
        price,
        brand.id,
        product_type.id,
    ))
    .unwrap()
}

/// Two brands, two types and eight products with distinct prices.
pub fn seed_catalog<R>(repo: &R) -> (Vec<ProductBrand>, Vec<ProductType>, Vec<Product>)
where
    R: BrandWriter + TypeWriter + ProductWriter + ?Sized,
{
    let brands = vec![brand(repo, "Adidas"), brand(repo, "Nike")];
    let types = vec![product_type(repo, "Shoes"), product_type(repo, "Boards")];

    let products = vec![
        product(repo, "Adidas Runner", 120.0, &brands[0], &types[0]),
        product(repo, "Nike Runner", 140.0, &brands[1], &types[0]),
        product(repo, "Adidas Street Board", 80.0, &brands[0], &types[1]),
        product(repo, "Nike Park Board", 95.0, &brands[1], &types[1]),
        product(repo, "Adidas Trail", 130.0, &brands[0], &types[0]),
        product(repo, "Nike Trail", 150.0, &brands[1], &types[0]),
        product(repo, "Adidas Cruiser Board", 60.0, &brands[0], &types[1]),
        product(repo, "Nike runner lite", 70.0, &brands[1], &types[0]),
    ];

    (brands, types, products)
}
