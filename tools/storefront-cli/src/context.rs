//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_core::catalog::Catalog;
use storefront_core::CatalogError;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory catalog paths are relative to (the config file's directory).
    pub root: PathBuf,
    /// Config file in use, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        let root = config_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.clone());

        Ok(Self {
            config,
            output,
            cwd,
            root,
            config_path,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the config root.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.root.join(path)
        }
    }

    /// Read and decode the configured catalog dumps.
    pub async fn load_catalog(&self) -> Result<Catalog> {
        let products_path = self.resolve_path(&self.config.catalog.products);
        let brands_path = self.resolve_path(&self.config.catalog.brands);

        self.output
            .debug(&format!("Loading products from {}", products_path.display()));
        let products = tokio::fs::read_to_string(&products_path)
            .await
            .map_err(|e| CatalogError::io(products_path.display().to_string(), e))?;

        self.output
            .debug(&format!("Loading brands from {}", brands_path.display()));
        let brands = tokio::fs::read_to_string(&brands_path)
            .await
            .map_err(|e| CatalogError::io(brands_path.display().to_string(), e))?;

        let catalog = Catalog::from_json(&products, &brands, &self.config.catalog.settings())?;
        Ok(catalog)
    }
}
