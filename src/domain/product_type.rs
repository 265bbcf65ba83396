use serde::{Deserialize, Serialize};

use crate::domain::types::{NonEmptyString, TypeId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductType {
    pub id: TypeId,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewProductType {
    pub name: NonEmptyString,
}

impl NewProductType {
    #[must_use]
    pub fn new(name: NonEmptyString) -> Self {
        Self { name }
    }
}
