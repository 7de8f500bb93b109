//! Add-to-cart behavior for a product detail view.

use crate::cart::{AddItem, Cart};
use crate::catalog::{BrandedProduct, Product};
use crate::options::{ResolvedVariant, VariantSelector};
use serde::Serialize;

/// Result of [`CartInteraction::add_to_cart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddToCart {
    /// One unit was added.
    Added,
    /// Already in the cart; the caller should navigate to the cart instead.
    AlreadyInCart,
    /// Nothing to add yet (the selection does not resolve to a variant).
    Unavailable,
}

/// Connects a product, its variant selector and the cart.
#[derive(Debug, Clone, Copy)]
pub struct CartInteraction<'a> {
    product: BrandedProduct<'a>,
    selector: &'a VariantSelector,
}

impl<'a> CartInteraction<'a> {
    pub fn new(product: BrandedProduct<'a>, selector: &'a VariantSelector) -> Self {
        Self { product, selector }
    }

    /// Simple products can always be added, configurable ones once a variant
    /// is resolved.
    pub fn can_add(&self) -> bool {
        match self.product.product {
            Product::Simple(_) => true,
            Product::Configurable(_) => self.selector.resolved_variant().is_some(),
        }
    }

    /// Whether the purchasable unit currently shown is already in the cart.
    pub fn is_added(&self, cart: &Cart) -> bool {
        match self.product.product {
            Product::Simple(info) => cart.has_item(info.id),
            Product::Configurable(_) => self
                .selector
                .resolved_variant()
                .map(|variant| cart.has_item(variant.product.id))
                .unwrap_or(false),
        }
    }

    /// The line that [`add_to_cart`](Self::add_to_cart) would add.
    pub fn line_item(&self) -> Option<AddItem> {
        let info = self.product.product.info();
        match self.product.product {
            Product::Simple(_) => Some(AddItem {
                id: info.id,
                title: info.title.clone(),
                image: info.image.clone(),
                brand: self.product.brand.to_string(),
                price: info.regular_price.clone(),
                options: Default::default(),
            }),
            Product::Configurable(_) => {
                let variant = self.selector.resolved_variant()?;
                Some(AddItem {
                    id: variant.product.id,
                    title: info.title.clone(),
                    image: variant.product.image.clone(),
                    brand: self.product.brand.to_string(),
                    price: info.regular_price.clone(),
                    options: self.option_labels(&variant),
                })
            }
        }
    }

    /// Add the current unit to `cart` unless it is already there.
    pub fn add_to_cart(&self, cart: &mut Cart) -> AddToCart {
        if self.is_added(cart) {
            return AddToCart::AlreadyInCart;
        }
        match self.line_item() {
            Some(item) => {
                tracing::debug!(id = %item.id, title = %item.title, "adding to cart");
                cart.add_item(item);
                AddToCart::Added
            }
            None => AddToCart::Unavailable,
        }
    }

    // Axis label to value label, falling back to the axis code.
    fn option_labels(&self, variant: &ResolvedVariant) -> indexmap::IndexMap<String, String> {
        variant
            .options
            .iter()
            .map(|(code, value)| {
                let axis = self
                    .selector
                    .attributes()
                    .get(code)
                    .cloned()
                    .unwrap_or_else(|| code.clone());
                (axis, value.label.clone())
            })
            .collect()
    }
}
