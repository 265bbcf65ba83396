use diesel::prelude::*;

use crate::domain::brand::{NewBrand, ProductBrand};
use crate::models::brand::{Brand as DbBrand, NewBrand as DbNewBrand};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{BrandReader, BrandWriter, DieselRepository};
use crate::schema::brands;

impl BrandReader for DieselRepository {
    fn list_brands(&self) -> RepositoryResult<Vec<ProductBrand>> {
        let mut conn = self.conn()?;

        brands::table
            .order(brands::id.asc())
            .select(DbBrand::as_select())
            .load::<DbBrand>(&mut conn)?
            .into_iter()
            .map(|brand| ProductBrand::try_from(brand).map_err(RepositoryError::from))
            .collect()
    }
}

impl BrandWriter for DieselRepository {
    fn create_brand(&self, new_brand: &NewBrand) -> RepositoryResult<ProductBrand> {
        let mut conn = self.conn()?;
        let insertable: DbNewBrand = new_brand.into();

        let brand = diesel::insert_into(brands::table)
            .values(&insertable)
            .returning(DbBrand::as_returning())
            .get_result(&mut conn)?;

        Ok(ProductBrand::try_from(brand)?)
    }
}
