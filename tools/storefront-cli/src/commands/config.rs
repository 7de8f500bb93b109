//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    // Catalog section
    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv(
        "products",
        &ctx.resolve_path(&ctx.config.catalog.products).display().to_string(),
    );
    ctx.output.kv(
        "brands",
        &ctx.resolve_path(&ctx.config.catalog.brands).display().to_string(),
    );
    if !ctx.config.catalog.image_base.is_empty() {
        ctx.output.kv("image_base", &ctx.config.catalog.image_base);
    }

    // Output section
    ctx.output.info("");
    ctx.output.info("[output]");
    ctx.output.kv("log_level", &ctx.config.output.log_level);

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("storefront.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    // Check catalog files
    for (key, path) in [
        ("catalog.products", &ctx.config.catalog.products),
        ("catalog.brands", &ctx.config.catalog.brands),
    ] {
        if !ctx.resolve_path(path).exists() {
            errors.push(format!("{} points at a missing file: {}", key, path));
        }
    }

    // Check image base
    let base = &ctx.config.catalog.image_base;
    if !base.is_empty() && !(base.starts_with("http://") || base.starts_with("https://") || base.starts_with('/')) {
        warnings.push(format!(
            "catalog.image_base '{}' is neither an absolute URL nor an absolute path",
            base
        ));
    }

    // Decode the catalog and check variant data
    if errors.is_empty() {
        match ctx.load_catalog().await {
            Ok(catalog) => {
                for product in catalog.products(None) {
                    if let Some(grouping) = storefront_core::options::AxisGrouping::for_product(product) {
                        for diagnostic in &grouping.diagnostics {
                            warnings.push(format!("{}: {}", product.info().sku, diagnostic));
                        }
                    }
                }
                ctx.output.debug(&format!(
                    "Decoded {} products and {} brands",
                    catalog.products(None).len(),
                    catalog.brands().len()
                ));
            }
            Err(e) => errors.push(format!("{:#}", e)),
        }
    }

    // Print results
    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
