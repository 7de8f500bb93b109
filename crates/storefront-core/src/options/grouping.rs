//! Two-axis color/size grouping for swatch-style pickers.

use crate::catalog::{ConfigurableOption, Product, Variant};
use crate::ids::{ProductId, ValueIndex};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Axis code of the color axis.
pub const COLOR: &str = "color";
/// Axis code of the size axis.
pub const SIZE: &str = "size";

/// A variant left out of the grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupingDiagnostic {
    pub variant_id: ProductId,
    pub sku: String,
    /// Axis codes that could not be resolved.
    pub missing: Vec<&'static str>,
}

impl fmt::Display for GroupingDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "variant {} (id {}) has no {}",
            self.sku,
            self.variant_id,
            self.missing.join(" or ")
        )
    }
}

/// Color and size values grouped by each other, keyed by display value.
///
/// Colors are keyed by their raw token, sizes by their label. Every declared
/// value is present, possibly with an empty list. Lists keep one entry per
/// variant, so repeated pairings repeat.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AxisGrouping {
    /// Color token to compatible size labels.
    pub color: IndexMap<String, Vec<String>>,
    /// Size label to compatible color tokens.
    pub size: IndexMap<String, Vec<String>>,
    /// Variants skipped because color or size did not resolve.
    pub diagnostics: Vec<GroupingDiagnostic>,
}

impl AxisGrouping {
    /// Grouping for a configurable product, `None` for a simple one.
    pub fn for_product(product: &Product) -> Option<Self> {
        product
            .as_configurable()
            .map(|p| Self::build(&p.configurable_options, &p.variants))
    }

    /// Build the grouping. Axes other than color and size are ignored.
    pub fn build(options: &[ConfigurableOption], variants: &[Variant]) -> Self {
        let mut grouping = Self::default();
        let mut color_keys: HashMap<ValueIndex, String> = HashMap::new();
        let mut size_keys: HashMap<ValueIndex, String> = HashMap::new();

        for option in options {
            let (keys, groups) = match option.attribute_code.as_str() {
                COLOR => (&mut color_keys, &mut grouping.color),
                SIZE => (&mut size_keys, &mut grouping.size),
                _ => continue,
            };
            for value in &option.values {
                let key = if option.attribute_code == COLOR {
                    value.value.to_string()
                } else {
                    value.label.clone()
                };
                groups.insert(key.clone(), Vec::new());
                keys.insert(value.value_index, key);
            }
        }

        for variant in variants {
            let mut color = None;
            let mut size = None;

            for attr in &variant.attributes {
                match attr.code.as_str() {
                    COLOR => color = color_keys.get(&attr.value_index),
                    SIZE => size = size_keys.get(&attr.value_index),
                    _ => {}
                }
            }

            let (Some(color), Some(size)) = (color, size) else {
                let mut missing = Vec::new();
                if color.is_none() {
                    missing.push(COLOR);
                }
                if size.is_none() {
                    missing.push(SIZE);
                }
                let diagnostic = GroupingDiagnostic {
                    variant_id: variant.product.id,
                    sku: variant.product.sku.clone(),
                    missing,
                };
                tracing::warn!(
                    variant_id = %diagnostic.variant_id,
                    sku = %diagnostic.sku,
                    "{}",
                    diagnostic
                );
                grouping.diagnostics.push(diagnostic);
                continue;
            };

            if let Some(sizes) = grouping.color.get_mut(color) {
                sizes.push(size.clone());
            }
            if let Some(colors) = grouping.size.get_mut(size) {
                colors.push(color.clone());
            }
        }

        grouping
    }

    /// Size labels available for a color token.
    pub fn sizes_for(&self, color: &str) -> &[String] {
        self.color.get(color).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Color tokens available for a size label.
    pub fn colors_for(&self, size: &str) -> &[String] {
        self.size.get(size).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VariantAttribute;
    use crate::options::fixtures::{tshirt_options, tshirt_variants, variant};

    #[test]
    fn test_groups_by_display_value() {
        let grouping = AxisGrouping::build(&tshirt_options(), &tshirt_variants());

        assert_eq!(grouping.sizes_for("#ff0000"), ["S"]);
        assert_eq!(grouping.sizes_for("#0000ff"), ["M"]);
        assert_eq!(grouping.colors_for("S"), ["#ff0000"]);
        assert_eq!(grouping.colors_for("M"), ["#0000ff"]);
        assert!(grouping.diagnostics.is_empty());
    }

    #[test]
    fn test_unused_color_is_seeded() {
        let grouping = AxisGrouping::build(&tshirt_options(), &tshirt_variants());
        assert_eq!(
            grouping.color.keys().collect::<Vec<_>>(),
            vec!["#ff0000", "#0000ff", "#00ff00"]
        );
        assert!(grouping.color["#00ff00"].is_empty());
    }

    #[test]
    fn test_variant_missing_size_is_reported_once() {
        let mut variants = tshirt_variants();
        variants.push(variant(150, vec![VariantAttribute::new("color", 0)]));

        let grouping = AxisGrouping::build(&tshirt_options(), &variants);

        assert_eq!(grouping.diagnostics.len(), 1);
        let diagnostic = &grouping.diagnostics[0];
        assert_eq!(diagnostic.variant_id, ProductId::new(150));
        assert_eq!(diagnostic.missing, vec![SIZE]);
        assert_eq!(grouping.sizes_for("#ff0000"), ["S"]);
        assert_eq!(grouping.colors_for("S"), ["#ff0000"]);
    }

    #[test]
    fn test_undeclared_value_is_unresolved() {
        let mut variants = tshirt_variants();
        variants.push(variant(
            151,
            vec![VariantAttribute::new("color", 9), VariantAttribute::new("size", 9)],
        ));

        let grouping = AxisGrouping::build(&tshirt_options(), &variants);
        assert_eq!(grouping.diagnostics[0].missing, vec![COLOR, SIZE]);
        assert_eq!(
            grouping.diagnostics[0].to_string(),
            "variant SKU-151 (id 151) has no color or size"
        );
    }

    #[test]
    fn test_repeated_pairings_are_kept() {
        let mut variants = tshirt_variants();
        variants.push(variants[0].clone());

        let grouping = AxisGrouping::build(&tshirt_options(), &variants);
        assert_eq!(grouping.sizes_for("#ff0000"), ["S", "S"]);
    }

    #[test]
    fn test_other_axes_are_ignored() {
        let mut options = tshirt_options();
        options.push(crate::options::fixtures::axis("material", 2));
        let mut variants = tshirt_variants();
        for v in &mut variants {
            v.attributes.push(VariantAttribute::new("material", 1));
        }

        let grouping = AxisGrouping::build(&options, &variants);
        assert!(grouping.diagnostics.is_empty());
        assert_eq!(grouping.color.len(), 3);
        assert_eq!(grouping.size.len(), 2);
    }

    #[test]
    fn test_simple_product_has_no_grouping() {
        let product: Product = serde_json::from_str(
            r#"{
                "type": "simple",
                "id": 1,
                "sku": "MUG",
                "title": "Mug",
                "brand": 1,
                "image": "/mug.png",
                "regular_price": { "currency": "USD", "value": 5 }
            }"#,
        )
        .unwrap();
        assert!(AxisGrouping::for_product(&product).is_none());
    }
}
