use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::brand::ProductBrand;
use crate::domain::product_type::ProductType;
use crate::domain::types::{BrandId, ProductId, TypeId};

/// A catalog entry together with the brand and type it belongs to.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[validate(length(min = 1))]
    pub name: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub image_file: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub brand: ProductBrand,
    pub product_type: ProductType,
}

/// Payload used to insert a product. The id is assigned by the backend.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[validate(length(min = 1))]
    pub name: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub image_file: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub brand_id: BrandId,
    pub type_id: TypeId,
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl NewProduct {
    #[must_use]
    pub fn new(
        name: String,
        summary: Option<String>,
        description: Option<String>,
        image_file: Option<String>,
        price: f64,
        brand_id: BrandId,
        type_id: TypeId,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            summary: normalize_optional(summary),
            description: normalize_optional(description),
            image_file: normalize_optional(image_file),
            price,
            brand_id,
            type_id,
        }
    }
}
