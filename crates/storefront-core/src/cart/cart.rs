//! Cart and line item types.

use crate::ids::ProductId;
use crate::price::Price;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Product or variant id being purchased.
    pub id: ProductId,
    /// Product title (denormalized for display).
    pub title: String,
    pub image: String,
    /// Brand title.
    pub brand: String,
    pub quantity: u32,
    /// Unit price.
    pub price: Price,
    /// Axis label to value label (e.g., "Color" → "Red").
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub options: IndexMap<String, String>,
}

/// A line to add; quantity is managed by the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddItem {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub brand: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub options: IndexMap<String, String>,
}

impl AddItem {
    fn into_cart_item(self, quantity: u32) -> CartItem {
        CartItem {
            id: self.id,
            title: self.title,
            image: self.image,
            brand: self.brand,
            quantity,
            price: self.price,
            options: self.options,
        }
    }
}

/// In-memory shopping cart keyed by product/variant id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    items: IndexMap<ProductId, CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a product or variant is in the cart.
    pub fn has_item(&self, id: ProductId) -> bool {
        self.items.contains_key(&id)
    }

    /// Add one unit. A new line starts at quantity 1, an existing one grows by 1.
    pub fn add_item(&mut self, item: AddItem) {
        match self.items.get_mut(&item.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(1),
            None => {
                self.items.insert(item.id, item.into_cart_item(1));
            }
        }
    }

    /// Remove a line.
    pub fn remove_item(&mut self, id: ProductId) -> bool {
        self.items.shift_remove(&id).is_some()
    }

    /// Set a line's quantity. Zero removes the line.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) {
        if quantity < 1 {
            self.items.shift_remove(&id);
            return;
        }
        if let Some(item) = self.items.get_mut(&id) {
            item.quantity = quantity;
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get a line by id.
    pub fn get_item(&self, id: ProductId) -> Option<&CartItem> {
        self.items.get(&id)
    }

    /// Lines in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &CartItem> {
        self.items.values()
    }

    /// Sum of quantities.
    pub fn total_items(&self) -> u32 {
        self.items.values().map(|i| i.quantity).sum()
    }

    /// Sum of quantity times unit price.
    ///
    /// Currencies are not reconciled; a cart is expected to hold one.
    pub fn total_price(&self) -> f64 {
        self.items.values().map(|i| i.price.times(i.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
