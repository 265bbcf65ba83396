//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::brand::{NewBrand, ProductBrand};
use crate::domain::filter::FilterExpr;
use crate::domain::product::{NewProduct, Product};
use crate::domain::product_type::{NewProductType, ProductType};
use crate::domain::types::ProductId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    BrandReader, BrandWriter, ProductQuery, ProductReader, ProductWriter, TypeReader, TypeWriter,
    WriteAck,
};

mock! {
    pub Repository {}

    impl ProductReader for Repository {
        fn find_products(&self, query: &ProductQuery) -> RepositoryResult<Vec<Product>>;
        fn count_products(&self, filter: &FilterExpr) -> RepositoryResult<usize>;
    }

    impl ProductWriter for Repository {
        fn insert_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn replace_product(&self, product: &Product) -> RepositoryResult<WriteAck>;
        fn delete_product(&self, id: ProductId) -> RepositoryResult<WriteAck>;
    }

    impl BrandReader for Repository {
        fn list_brands(&self) -> RepositoryResult<Vec<ProductBrand>>;
    }

    impl BrandWriter for Repository {
        fn create_brand(&self, new_brand: &NewBrand) -> RepositoryResult<ProductBrand>;
    }

    impl TypeReader for Repository {
        fn list_types(&self) -> RepositoryResult<Vec<ProductType>>;
    }

    impl TypeWriter for Repository {
        fn create_type(&self, new_type: &NewProductType) -> RepositoryResult<ProductType>;
    }
}
