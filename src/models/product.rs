use diesel::prelude::*;

use crate::domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct};
use crate::domain::types::{ProductId, TypeConstraintError};
use crate::models::brand::Brand;
use crate::models::product_type::ProductType;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::product::Product`].
pub struct Product {
    pub id: i32,
    pub name: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub image_file: Option<String>,
    pub price: f64,
    pub brand_id: i32,
    pub type_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
/// Insertable form of [`Product`].
pub struct NewProduct<'a> {
    pub name: &'a str,
    pub summary: Option<&'a str>,
    pub description: Option<&'a str>,
    pub image_file: Option<&'a str>,
    pub price: f64,
    pub brand_id: i32,
    pub type_id: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_null = true)]
/// Full replacement of a [`Product`] row, id excluded.
pub struct ReplaceProduct<'a> {
    pub name: &'a str,
    pub summary: Option<&'a str>,
    pub description: Option<&'a str>,
    pub image_file: Option<&'a str>,
    pub price: f64,
    pub brand_id: i32,
    pub type_id: i32,
}

/// A product row joined with its brand and type rows.
pub type ProductRow = (Product, Brand, ProductType);

impl TryFrom<ProductRow> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from((product, brand, product_type): ProductRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(product.id)?,
            name: product.name,
            summary: product.summary,
            description: product.description,
            image_file: product.image_file,
            price: product.price,
            brand: brand.try_into()?,
            product_type: product_type.try_into()?,
        })
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(product: &'a DomainNewProduct) -> Self {
        Self {
            name: product.name.as_str(),
            summary: product.summary.as_deref(),
            description: product.description.as_deref(),
            image_file: product.image_file.as_deref(),
            price: product.price,
            brand_id: product.brand_id.get(),
            type_id: product.type_id.get(),
        }
    }
}

impl<'a> From<&'a DomainProduct> for ReplaceProduct<'a> {
    fn from(product: &'a DomainProduct) -> Self {
        Self {
            name: product.name.as_str(),
            summary: product.summary.as_deref(),
            description: product.description.as_deref(),
            image_file: product.image_file.as_deref(),
            price: product.price,
            brand_id: product.brand.id.get(),
            type_id: product.product_type.id.get(),
        }
    }
}
