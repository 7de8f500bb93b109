//! Configurable product options.
//!
//! - [`CompatibilityIndex`]: which option values co-occur in some variant
//! - [`VariantSelector`]: incremental selection, disabled state, variant resolution
//! - [`AxisGrouping`]: color/size grouping for swatch pickers

mod grouping;
mod index;
mod resolver;

pub use grouping::{AxisGrouping, GroupingDiagnostic, COLOR, SIZE};
pub use index::{CompatSets, CompatibilityIndex};
pub use resolver::{ResolvedVariant, SelectOutcome, Selection, VariantSelector};

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::catalog::{
        ConfigurableOption, OptionValue, RawValue, Variant, VariantAttribute, VariantProduct,
    };
    use crate::ids::{AttributeId, ProductId, ValueIndex};

    fn value(index: u32, label: &str, raw: RawValue) -> OptionValue {
        OptionValue {
            value_index: ValueIndex::new(index),
            label: label.to_string(),
            value: raw,
        }
    }

    /// Axis `code` with values `0..count`.
    pub fn axis(code: &str, count: u32) -> ConfigurableOption {
        ConfigurableOption {
            attribute_id: AttributeId::new(1),
            attribute_code: code.to_string(),
            label: code.to_uppercase(),
            values: (0..count)
                .map(|i| value(i, &format!("{}-{}", code, i), RawValue::from(u64::from(i))))
                .collect(),
        }
    }

    pub fn variant(id: u64, attributes: Vec<VariantAttribute>) -> Variant {
        Variant {
            attributes,
            product: VariantProduct {
                id: ProductId::new(id),
                sku: format!("SKU-{}", id),
                image: format!("https://cdn.example.com/{}.png", id),
            },
        }
    }

    /// color: red(0), blue(1), green(2, unused); size: S(0), M(1).
    pub fn tshirt_options() -> Vec<ConfigurableOption> {
        vec![
            ConfigurableOption {
                attribute_id: AttributeId::new(93),
                attribute_code: "color".to_string(),
                label: "Color".to_string(),
                values: vec![
                    value(0, "Red", RawValue::from("#ff0000")),
                    value(1, "Blue", RawValue::from("#0000ff")),
                    value(2, "Green", RawValue::from("#00ff00")),
                ],
            },
            ConfigurableOption {
                attribute_id: AttributeId::new(144),
                attribute_code: "size".to_string(),
                label: "Size".to_string(),
                values: vec![
                    value(0, "S", RawValue::from(1)),
                    value(1, "M", RawValue::from(2)),
                ],
            },
        ]
    }

    /// red/S and blue/M.
    pub fn tshirt_variants() -> Vec<Variant> {
        let mut red_small = variant(
            101,
            vec![VariantAttribute::new("color", 0), VariantAttribute::new("size", 0)],
        );
        red_small.product.sku = "TSHIRT-RED-S".to_string();

        let mut blue_medium = variant(
            102,
            vec![VariantAttribute::new("color", 1), VariantAttribute::new("size", 1)],
        );
        blue_medium.product.sku = "TSHIRT-BLUE-M".to_string();

        vec![red_small, blue_medium]
    }
}
