use diesel::prelude::*;

use crate::domain::product_type::{
    NewProductType as DomainNewProductType, ProductType as DomainProductType,
};
use crate::domain::types::{TypeConstraintError, TypeId};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::product_types)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::product_type::ProductType`].
pub struct ProductType {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_types)]
pub struct NewProductType<'a> {
    pub name: &'a str,
}

impl TryFrom<ProductType> for DomainProductType {
    type Error = TypeConstraintError;

    fn try_from(product_type: ProductType) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TypeId::new(product_type.id)?,
            name: product_type.name,
        })
    }
}

impl<'a> From<&'a DomainNewProductType> for NewProductType<'a> {
    fn from(product_type: &'a DomainNewProductType) -> Self {
        Self {
            name: product_type.name.as_str(),
        }
    }
}
