//! Brand types.

use crate::catalog::Product;
use crate::ids::BrandId;
use serde::{Deserialize, Serialize};

/// Title shown for products whose brand is missing from the catalog.
pub const UNKNOWN_BRAND: &str = "<unknown brand>";

/// A brand in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Brand {
    pub id: BrandId,
    pub title: String,
    /// Sort key as supplied by the catalog.
    #[serde(default)]
    pub sort: String,
    /// URL-friendly code.
    #[serde(default)]
    pub code: String,
}

/// A product with its brand id resolved to a display title.
#[derive(Debug, Clone, Copy)]
pub struct BrandedProduct<'a> {
    pub product: &'a Product,
    pub brand: &'a str,
}

impl<'a> BrandedProduct<'a> {
    pub fn new(product: &'a Product, brand: &'a str) -> Self {
        Self { product, brand }
    }
}
