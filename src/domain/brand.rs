use serde::{Deserialize, Serialize};

use crate::domain::types::{BrandId, NonEmptyString};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductBrand {
    pub id: BrandId,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewBrand {
    pub name: NonEmptyString,
}

impl NewBrand {
    #[must_use]
    pub fn new(name: NonEmptyString) -> Self {
        Self { name }
    }
}
