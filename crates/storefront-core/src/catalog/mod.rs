//! Product catalog module.
//!
//! Contains the product/brand model and the in-memory [`Catalog`] built from
//! JSON dumps. Fetching the dumps is the caller's job; the catalog only
//! decodes them and rewrites relative image paths against a base URL so the
//! variant engine always sees absolute image references.

mod brand;
mod product;

pub use brand::{Brand, BrandedProduct, UNKNOWN_BRAND};
pub use product::{
    ConfigurableOption, ConfigurableProduct, OptionValue, Product, ProductInfo, ProductType,
    RawValue, Variant, VariantAttribute, VariantProduct,
};

use crate::error::CatalogError;
use crate::ids::{BrandId, ProductId};
use serde::{Deserialize, Serialize};

/// Settings applied while loading a catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogSettings {
    /// Base URL prepended to every product and variant image path.
    #[serde(default)]
    pub image_base: String,
}

/// Decoded products and brands.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    brands: Vec<Brand>,
}

impl Catalog {
    /// Create a catalog from already decoded data.
    pub fn new(products: Vec<Product>, brands: Vec<Brand>) -> Self {
        Self { products, brands }
    }

    /// Decode product and brand dumps, prefixing image paths.
    pub fn from_json(
        products_json: &str,
        brands_json: &str,
        settings: &CatalogSettings,
    ) -> Result<Self, CatalogError> {
        let mut products: Vec<Product> = serde_json::from_str(products_json)
            .map_err(|e| CatalogError::decode("products", e))?;
        let brands: Vec<Brand> =
            serde_json::from_str(brands_json).map_err(|e| CatalogError::decode("brands", e))?;

        for product in &mut products {
            prefix_images(product, &settings.image_base);
        }

        tracing::debug!(
            products = products.len(),
            brands = brands.len(),
            "catalog decoded"
        );

        Ok(Self::new(products, brands))
    }

    /// All products, or only those of `brand`.
    ///
    /// A zero brand id is treated as "no filter".
    pub fn products(&self, brand: Option<BrandId>) -> Vec<&Product> {
        match brand {
            Some(brand) if brand.get() != 0 => self
                .products
                .iter()
                .filter(|p| p.info().brand == brand)
                .collect(),
            _ => self.products.iter().collect(),
        }
    }

    /// Find a product by id.
    pub fn product(&self, id: ProductId) -> Result<&Product, CatalogError> {
        self.products
            .iter()
            .find(|p| p.id() == id)
            .ok_or(CatalogError::ProductNotFound(id.get()))
    }

    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    /// Find a brand by id.
    pub fn brand(&self, id: BrandId) -> Result<&Brand, CatalogError> {
        self.brands
            .iter()
            .find(|b| b.id == id)
            .ok_or(CatalogError::BrandNotFound(id.get()))
    }

    /// Brand title, or [`UNKNOWN_BRAND`] when the brand is missing.
    pub fn brand_title(&self, id: BrandId) -> &str {
        self.brand(id)
            .map(|b| b.title.as_str())
            .unwrap_or(UNKNOWN_BRAND)
    }

    /// Attach the brand title to a product.
    pub fn branded<'a>(&'a self, product: &'a Product) -> BrandedProduct<'a> {
        BrandedProduct::new(product, self.brand_title(product.info().brand))
    }
}

/// Prepend `base` (with one trailing slash trimmed) to the product image and
/// to every variant image.
pub fn prefix_images(product: &mut Product, base: &str) {
    let base = base.strip_suffix('/').unwrap_or(base);

    let info = product.info_mut();
    info.image = format!("{}{}", base, info.image);

    if let Product::Configurable(configurable) = product {
        for variant in &mut configurable.variants {
            variant.product.image = format!("{}{}", base, variant.product.image);
        }
    }
}
