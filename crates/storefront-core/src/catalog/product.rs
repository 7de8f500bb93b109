//! Product, option and variant types.

use crate::ids::{AttributeId, BrandId, ProductId, ValueIndex};
use crate::price::Price;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    /// Product with no option axes.
    Simple,
    /// Product with option axes (e.g., color, size) and variants.
    Configurable,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Simple => "simple",
            ProductType::Configurable => "configurable",
        }
    }
}

/// Fields shared by every product kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductInfo {
    /// Unique product identifier.
    pub id: ProductId,
    /// Stock keeping unit.
    pub sku: String,
    /// Display title.
    pub title: String,
    /// Owning brand.
    pub brand: BrandId,
    /// Absolute image URL (after catalog prefixing).
    pub image: String,
    /// Regular price.
    pub regular_price: Price,
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Product {
    Simple(ProductInfo),
    Configurable(ConfigurableProduct),
}

impl Product {
    /// Shared product fields.
    pub fn info(&self) -> &ProductInfo {
        match self {
            Product::Simple(info) => info,
            Product::Configurable(product) => &product.info,
        }
    }

    pub(crate) fn info_mut(&mut self) -> &mut ProductInfo {
        match self {
            Product::Simple(info) => info,
            Product::Configurable(product) => &mut product.info,
        }
    }

    pub fn id(&self) -> ProductId {
        self.info().id
    }

    pub fn title(&self) -> &str {
        &self.info().title
    }

    pub fn product_type(&self) -> ProductType {
        match self {
            Product::Simple(_) => ProductType::Simple,
            Product::Configurable(_) => ProductType::Configurable,
        }
    }

    /// The configurable part, if any.
    pub fn as_configurable(&self) -> Option<&ConfigurableProduct> {
        match self {
            Product::Simple(_) => None,
            Product::Configurable(product) => Some(product),
        }
    }
}

/// A product with option axes and concrete variants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigurableProduct {
    #[serde(flatten)]
    pub info: ProductInfo,
    /// Option axes.
    #[serde(default)]
    pub configurable_options: Vec<ConfigurableOption>,
    /// Purchasable combinations of one value per axis.
    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// An option axis (e.g., Color) with its values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigurableOption {
    pub attribute_id: AttributeId,
    /// Stable axis code (e.g., "color", "size").
    pub attribute_code: String,
    /// Human label (e.g., "Color").
    pub label: String,
    pub values: Vec<OptionValue>,
}

impl ConfigurableOption {
    /// Find a value by its index.
    pub fn value(&self, value_index: ValueIndex) -> Option<&OptionValue> {
        self.values.iter().find(|v| v.value_index == value_index)
    }
}

/// One choice along an axis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionValue {
    /// Index unique within the owning axis.
    pub value_index: ValueIndex,
    /// Display string (e.g., "Red", "M").
    pub label: String,
    /// Axis-specific raw value.
    pub value: RawValue,
}

/// Axis-specific raw value: a color token or a numeric size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    Number(serde_json::Number),
}

impl RawValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) => Some(s),
            RawValue::Number(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Text(_) => None,
            RawValue::Number(n) => n.as_f64(),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(s) => f.write_str(s),
            RawValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<u64> for RawValue {
    fn from(n: u64) -> Self {
        RawValue::Number(n.into())
    }
}

/// A concrete purchasable combination of option values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variant {
    pub attributes: Vec<VariantAttribute>,
    pub product: VariantProduct,
}

impl Variant {
    /// Value chosen on `code`, taking the first entry if the axis repeats.
    pub fn value_for(&self, code: &str) -> Option<ValueIndex> {
        self.attributes
            .iter()
            .find(|a| a.code == code)
            .map(|a| a.value_index)
    }
}

/// One `(axis code, value index)` pair of a variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct VariantAttribute {
    pub code: String,
    pub value_index: ValueIndex,
}

impl VariantAttribute {
    pub fn new(code: impl Into<String>, value_index: u32) -> Self {
        Self {
            code: code.into(),
            value_index: ValueIndex::new(value_index),
        }
    }
}

/// Product record a variant points at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariantProduct {
    pub id: ProductId,
    pub sku: String,
    pub image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIGURABLE: &str = r##"{
        "type": "configurable",
        "id": 2,
        "sku": "TSHIRT",
        "title": "T-shirt",
        "brand": 1,
        "image": "/images/tshirt.png",
        "regular_price": { "currency": "USD", "value": 20 },
        "configurable_options": [
            {
                "attribute_id": 93,
                "attribute_code": "color",
                "label": "Color",
                "values": [
                    { "label": "Red", "value_index": 0, "value": "#ff0000" }
                ]
            },
            {
                "attribute_id": 144,
                "attribute_code": "size",
                "label": "Size",
                "values": [
                    { "label": "M", "value_index": 1, "value": 2 }
                ]
            }
        ],
        "variants": [
            {
                "attributes": [
                    { "code": "color", "value_index": 0 },
                    { "code": "size", "value_index": 1 }
                ],
                "product": { "id": 21, "sku": "TSHIRT-RED-M", "image": "/images/red.png" }
            }
        ]
    }"##;

    #[test]
    fn test_decode_simple_product() {
        let json = r#"{
            "type": "simple",
            "id": 1,
            "sku": "MUG",
            "title": "Mug",
            "brand": 3,
            "image": "/images/mug.png",
            "regular_price": { "currency": "RUB", "value": 450.5 }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.product_type(), ProductType::Simple);
        assert_eq!(product.id(), ProductId::new(1));
        assert_eq!(product.info().regular_price.value, 450.5);
        assert!(product.as_configurable().is_none());
    }

    #[test]
    fn test_decode_configurable_product() {
        let product: Product = serde_json::from_str(CONFIGURABLE).unwrap();
        let configurable = product.as_configurable().unwrap();

        assert_eq!(configurable.info.title, "T-shirt");
        assert_eq!(configurable.configurable_options.len(), 2);

        let color = &configurable.configurable_options[0];
        let red = color.value(ValueIndex::new(0)).unwrap();
        assert_eq!(red.value.as_str(), Some("#ff0000"));

        let size = &configurable.configurable_options[1];
        let medium = size.value(ValueIndex::new(1)).unwrap();
        assert_eq!(medium.value.as_f64(), Some(2.0));
        assert_eq!(medium.value.to_string(), "2");

        let variant = &configurable.variants[0];
        assert_eq!(variant.value_for("size"), Some(ValueIndex::new(1)));
        assert_eq!(variant.value_for("material"), None);
    }

    #[test]
    fn test_product_type_tag_round_trips() {
        let product: Product = serde_json::from_str(CONFIGURABLE).unwrap();
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["type"], "configurable");
        assert_eq!(value["brand"], 1);
    }
}
