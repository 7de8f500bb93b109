//! Shopping cart module.
//!
//! Contains the in-memory cart and the add-to-cart interaction used by a
//! product detail view.

mod cart;
mod interaction;

pub use cart::{AddItem, Cart, CartItem};
pub use interaction::{AddToCart, CartInteraction};
