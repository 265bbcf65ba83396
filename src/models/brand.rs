use diesel::prelude::*;

use crate::domain::brand::{NewBrand as DomainNewBrand, ProductBrand};
use crate::domain::types::{BrandId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::brands)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::brand::ProductBrand`].
pub struct Brand {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::brands)]
pub struct NewBrand<'a> {
    pub name: &'a str,
}

impl TryFrom<Brand> for ProductBrand {
    type Error = TypeConstraintError;

    fn try_from(brand: Brand) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BrandId::new(brand.id)?,
            name: brand.name,
        })
    }
}

impl<'a> From<&'a DomainNewBrand> for NewBrand<'a> {
    fn from(brand: &'a DomainNewBrand) -> Self {
        Self {
            name: brand.name.as_str(),
        }
    }
}
