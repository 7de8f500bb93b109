//! Catalog, variant selection and cart logic for the storefront.
//!
//! This crate provides:
//!
//! - **Catalog**: products, brands, JSON dump decoding, image URL prefixing
//! - **Options**: compatibility index, variant selector, color/size grouping
//! - **Cart**: in-memory cart and the add-to-cart interaction
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_core::prelude::*;
//!
//! let catalog = Catalog::from_json(&products_json, &brands_json, &settings)?;
//! let product = catalog.product(ProductId::new(2))?;
//!
//! let mut selector = VariantSelector::for_product(product);
//! selector.select("color", ValueIndex::new(0));
//! selector.select("size", ValueIndex::new(1));
//!
//! if let Some(variant) = selector.resolved_variant() {
//!     println!("{} ({})", variant.product.sku, variant.product.image);
//! }
//!
//! let mut cart = Cart::new();
//! CartInteraction::new(catalog.branded(product), &selector).add_to_cart(&mut cart);
//! ```

pub mod error;
pub mod ids;
pub mod price;

pub mod cart;
pub mod catalog;
pub mod options;

pub use error::CatalogError;
pub use ids::*;
pub use price::Price;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::*;
    pub use crate::price::Price;

    // Catalog
    pub use crate::catalog::{
        Brand, BrandedProduct, Catalog, CatalogSettings, ConfigurableOption, ConfigurableProduct,
        OptionValue, Product, ProductInfo, ProductType, RawValue, Variant, VariantAttribute,
        VariantProduct,
    };

    // Options
    pub use crate::options::{
        AxisGrouping, CompatibilityIndex, GroupingDiagnostic, ResolvedVariant, SelectOutcome,
        Selection, VariantSelector,
    };

    // Cart
    pub use crate::cart::{AddItem, AddToCart, Cart, CartInteraction, CartItem};
}
