//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_core::catalog::CatalogSettings;

/// File names searched for, in order, from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog dump locations.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Output configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(path, &content)
    }

    /// Parse config content; `.json` paths are JSON, everything else TOML.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content).with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Where the catalog dumps live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Products dump, relative to the config file.
    #[serde(default = "default_products")]
    pub products: String,

    /// Brands dump, relative to the config file.
    #[serde(default = "default_brands")]
    pub brands: String,

    /// Base URL prepended to image paths.
    #[serde(default)]
    pub image_base: String,
}

fn default_products() -> String {
    "products.json".to_string()
}

fn default_brands() -> String {
    "brands.json".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            products: default_products(),
            brands: default_brands(),
            image_base: String::new(),
        }
    }
}

impl CatalogConfig {
    /// Settings handed to the catalog loader.
    pub fn settings(&self) -> CatalogSettings {
        CatalogSettings {
            image_base: self.image_base.clone(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Log filter used when `RUST_LOG` is unset (e.g., "warn", "storefront_core=debug").
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    r#"# Storefront configuration

[catalog]
products = "products.json"
brands = "brands.json"
# image_base = "https://cdn.example.com/"

[output]
log_level = "warn"
"#
    .to_string()
}
