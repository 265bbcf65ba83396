//! Query intent and the backend-agnostic filter expression it compiles to.
//!
//! A [`FilterSpec`] is what callers send. [`FilterSpec::to_filter`] turns its
//! optional fields into a [`FilterExpr`] that every backend knows how to
//! evaluate, and [`SortKey::sort`] resolves the requested ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::product::Product;
use crate::domain::types::{BrandId, TypeId};

/// Requested ordering of a product listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum SortKey {
    #[default]
    NameAsc,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    /// Resolves the key into the ordering applied by backends.
    pub const fn sort(self) -> Sort {
        match self {
            SortKey::PriceAsc => Sort::new(SortField::Price, Direction::Asc),
            SortKey::PriceDesc => Sort::new(SortField::Price, Direction::Desc),
            SortKey::NameAsc => Sort::new(SortField::Name, Direction::Asc),
        }
    }
}

impl From<&str> for SortKey {
    /// Unrecognised names fall back to [`SortKey::NameAsc`].
    fn from(value: &str) -> Self {
        match value {
            "priceAsc" => SortKey::PriceAsc,
            "priceDesc" => SortKey::PriceDesc,
            _ => SortKey::NameAsc,
        }
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        SortKey::from(value.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Name,
    Price,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Ordering of a product sequence. Ties are always broken by ascending id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: Direction,
}

impl Sort {
    pub const fn new(field: SortField, direction: Direction) -> Self {
        Self { field, direction }
    }

    /// Compares two products under this ordering, id ascending on ties.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let primary = match self.field {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Price => a.price.total_cmp(&b.price),
        };
        let primary = match self.direction {
            Direction::Asc => primary,
            Direction::Desc => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

impl Default for Sort {
    fn default() -> Self {
        SortKey::default().sort()
    }
}

/// Product attributes a [`FilterExpr`] can refer to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductField {
    Id,
    Name,
    BrandId,
    TypeId,
    BrandName,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterValue {
    Id(i32),
    Text(String),
}

/// Backend-agnostic predicate over products.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterExpr {
    /// Conjunction; an empty list matches every product.
    And(Vec<FilterExpr>),
    /// Exact equality of a field with a value.
    Eq(ProductField, FilterValue),
    /// Case-sensitive literal substring match on a text field.
    Contains(ProductField, String),
}

impl FilterExpr {
    /// The empty filter.
    pub const fn all() -> Self {
        FilterExpr::And(Vec::new())
    }

    pub fn eq_id(field: ProductField, id: i32) -> Self {
        FilterExpr::Eq(field, FilterValue::Id(id))
    }

    pub fn eq_text(field: ProductField, text: impl Into<String>) -> Self {
        FilterExpr::Eq(field, FilterValue::Text(text.into()))
    }

    /// AND-combines two expressions, flattening nested conjunctions.
    #[must_use]
    pub fn and(self, other: FilterExpr) -> Self {
        let mut parts = match self {
            FilterExpr::And(parts) => parts,
            single => vec![single],
        };
        match other {
            FilterExpr::And(more) => parts.extend(more),
            single => parts.push(single),
        }
        FilterExpr::And(parts)
    }

    /// Whether this expression matches every product.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterExpr::And(parts) => parts.iter().all(FilterExpr::is_empty),
            _ => false,
        }
    }

    /// Evaluates the expression against a product held in memory.
    ///
    /// A field compared with a value of the wrong kind never matches.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            FilterExpr::And(parts) => parts.iter().all(|part| part.matches(product)),
            FilterExpr::Eq(field, FilterValue::Id(id)) => {
                id_field(product, *field).is_some_and(|value| value == *id)
            }
            FilterExpr::Eq(field, FilterValue::Text(text)) => {
                text_field(product, *field).is_some_and(|value| value == text.as_str())
            }
            FilterExpr::Contains(field, needle) => {
                text_field(product, *field).is_some_and(|value| value.contains(needle.as_str()))
            }
        }
    }
}

fn id_field(product: &Product, field: ProductField) -> Option<i32> {
    match field {
        ProductField::Id => Some(product.id.get()),
        ProductField::BrandId => Some(product.brand.id.get()),
        ProductField::TypeId => Some(product.product_type.id.get()),
        ProductField::Name | ProductField::BrandName => None,
    }
}

fn text_field(product: &Product, field: ProductField) -> Option<&str> {
    match field {
        ProductField::Name => Some(&product.name),
        ProductField::BrandName => Some(&product.brand.name),
        ProductField::Id | ProductField::BrandId | ProductField::TypeId => None,
    }
}

/// Structured listing request: what to match, how to order, which page.
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    /// Case-sensitive substring of the product name. Empty means absent.
    pub search_text: Option<String>,
    pub brand_id: Option<BrandId>,
    pub type_id: Option<TypeId>,
    pub sort_key: Option<SortKey>,
    #[validate(range(min = 1))]
    pub page_index: usize,
    #[validate(range(min = 1))]
    pub page_size: usize,
}

impl FilterSpec {
    /// Unfiltered first page of the given size.
    pub fn new(page_size: usize) -> Self {
        Self {
            search_text: None,
            brand_id: None,
            type_id: None,
            sort_key: None,
            page_index: 1,
            page_size,
        }
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    pub fn brand(mut self, brand_id: BrandId) -> Self {
        self.brand_id = Some(brand_id);
        self
    }

    pub fn product_type(mut self, type_id: TypeId) -> Self {
        self.type_id = Some(type_id);
        self
    }

    pub fn sort_by(mut self, sort_key: SortKey) -> Self {
        self.sort_key = Some(sort_key);
        self
    }

    pub fn page(mut self, page_index: usize, page_size: usize) -> Self {
        self.page_index = page_index;
        self.page_size = page_size;
        self
    }

    /// Builds the conjunction of predicates for every non-empty field.
    pub fn to_filter(&self) -> FilterExpr {
        let mut predicates = Vec::new();

        if let Some(text) = self.search_text.as_deref().filter(|t| !t.is_empty()) {
            predicates.push(FilterExpr::Contains(ProductField::Name, text.to_string()));
        }
        if let Some(brand_id) = self.brand_id {
            predicates.push(FilterExpr::eq_id(ProductField::BrandId, brand_id.get()));
        }
        if let Some(type_id) = self.type_id {
            predicates.push(FilterExpr::eq_id(ProductField::TypeId, type_id.get()));
        }

        FilterExpr::And(predicates)
    }

    /// Resolved ordering; an absent key resolves like [`SortKey::NameAsc`].
    pub fn sort(&self) -> Sort {
        self.sort_key.unwrap_or_default().sort()
    }
}
