use diesel::prelude::*;

use crate::domain::product_type::{NewProductType, ProductType};
use crate::models::product_type::{
    NewProductType as DbNewProductType, ProductType as DbProductType,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, TypeReader, TypeWriter};
use crate::schema::product_types;

impl TypeReader for DieselRepository {
    fn list_types(&self) -> RepositoryResult<Vec<ProductType>> {
        let mut conn = self.conn()?;

        product_types::table
            .order(product_types::id.asc())
            .select(DbProductType::as_select())
            .load::<DbProductType>(&mut conn)?
            .into_iter()
            .map(|product_type| ProductType::try_from(product_type).map_err(RepositoryError::from))
            .collect()
    }
}

impl TypeWriter for DieselRepository {
    fn create_type(&self, new_type: &NewProductType) -> RepositoryResult<ProductType> {
        let mut conn = self.conn()?;
        let insertable: DbNewProductType = new_type.into();

        let product_type = diesel::insert_into(product_types::table)
            .values(&insertable)
            .returning(DbProductType::as_returning())
            .get_result(&mut conn)?;

        Ok(ProductType::try_from(product_type)?)
    }
}
