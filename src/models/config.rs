//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::DEFAULT_PAGE_SIZE;

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Clone, Debug, Deserialize)]
/// Settings shared by catalog entry points.
pub struct CatalogConfig {
    pub database_url: String,
    /// Page size used when a caller does not ask for one.
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
}
