//! Newtype IDs for type-safe identifiers.
//!
//! Catalog dumps use plain integers for products, brands and attributes.
//! Wrapping them keeps a brand id from being passed where a product id is
//! expected, while serializing exactly like the underlying number.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate numeric newtype ID structs.
macro_rules! define_id {
    ($name:ident, $inner:ty) => {
        /// A numeric identifier as it appears in catalog dumps.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name($inner);

        impl $name {
            /// Create a new ID from its raw value.
            pub const fn new(id: $inner) -> Self {
                Self(id)
            }

            /// Get the raw value.
            pub const fn get(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(id: $inner) -> Self {
                Self(id)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<$inner>().map(Self)
            }
        }
    };
}

define_id!(ProductId, u64);
define_id!(BrandId, u64);
define_id!(AttributeId, u64);

// Unique within one axis only, never across axes.
define_id!(ValueIndex, u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new(42);
        assert_eq!(id.get(), 42);
    }

    #[test]
    fn test_id_from_str() {
        let id: ValueIndex = " 7 ".parse().unwrap();
        assert_eq!(id, ValueIndex::new(7));
        assert!("seven".parse::<ValueIndex>().is_err());
    }

    #[test]
    fn test_id_display() {
        let id = BrandId::new(3);
        assert_eq!(format!("{}", id), "3");
    }

    #[test]
    fn test_id_serializes_as_number() {
        let json = serde_json::to_string(&ProductId::new(15)).unwrap();
        assert_eq!(json, "15");

        let id: AttributeId = serde_json::from_str("93").unwrap();
        assert_eq!(id, AttributeId::new(93));
    }
}
