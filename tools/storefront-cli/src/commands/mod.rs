//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod options;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use serde::Serialize;
use storefront_core::prelude::*;

use crate::output::Output;

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only list products of this brand id.
    #[arg(short, long)]
    pub brand: Option<BrandId>,
}

/// Product plus option selections, shared by options/resolve/cart.
#[derive(Args)]
pub struct SelectionArgs {
    /// Product id or SKU.
    pub product: String,

    /// Select a value, as `axis=value_index` or `axis=label`. Applied in order;
    /// repeating a selection toggles it off.
    #[arg(short, long = "select", value_parser = parse_select)]
    pub selections: Vec<SelectArg>,
}

/// Arguments for the pick command.
#[derive(Args)]
pub struct PickArgs {
    /// Product id or SKU.
    pub product: String,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Quantity of the line after adding.
    #[arg(short, long, default_value = "1")]
    pub quantity: u32,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the configuration and the catalog it points at.
    Validate,
}

/// One `axis=value` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectArg {
    pub axis: String,
    pub value: String,
}

fn parse_select(s: &str) -> Result<SelectArg, String> {
    let (axis, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected axis=value, got '{}'", s))?;
    let (axis, value) = (axis.trim(), value.trim());
    if axis.is_empty() || value.is_empty() {
        return Err(format!("expected axis=value, got '{}'", s));
    }
    Ok(SelectArg {
        axis: axis.to_string(),
        value: value.to_string(),
    })
}

/// Outcome of one applied selection, for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionStep {
    pub axis: String,
    pub value: ValueIndex,
    pub outcome: SelectOutcome,
}

/// Find a product by numeric id or by SKU (case-insensitive).
pub fn find_product<'a>(catalog: &'a Catalog, key: &str) -> Result<&'a Product> {
    if let Ok(id) = key.parse::<ProductId>() {
        return Ok(catalog.product(id)?);
    }
    match catalog
        .products(None)
        .into_iter()
        .find(|p| p.info().sku.eq_ignore_ascii_case(key))
    {
        Some(product) => Ok(product),
        None => bail!("No product with id or SKU '{}'", key),
    }
}

/// Resolve `value` to an index: a label match wins, otherwise a number is
/// accepted if it is a value index declared on the axis.
pub fn resolve_value(selector: &VariantSelector, arg: &SelectArg) -> Result<ValueIndex> {
    if let Some(index) = selector.value_by_label(&arg.axis, &arg.value) {
        return Ok(index);
    }
    let declared = arg.value.parse::<ValueIndex>().ok().filter(|index| {
        selector
            .options()
            .get(&arg.axis)
            .map(|values| values.contains_key(index))
            .unwrap_or(false)
    });
    match declared {
        Some(index) => Ok(index),
        None => bail!("Unknown value '{}' for axis '{}'", arg.value, arg.axis),
    }
}

/// Apply selections in order, reporting rejected ones.
pub fn apply_selections(
    selector: &mut VariantSelector,
    selections: &[SelectArg],
    output: &Output,
) -> Result<Vec<SelectionStep>> {
    let mut steps = Vec::with_capacity(selections.len());
    for arg in selections {
        let value = resolve_value(selector, arg)?;
        let outcome = selector.select(&arg.axis, value);
        match outcome {
            SelectOutcome::Rejected => output.warn(&format!(
                "{}={} is not available with the current selection",
                arg.axis, arg.value
            )),
            _ => output.debug(&format!("{}={} {:?}", arg.axis, arg.value, outcome)),
        }
        steps.push(SelectionStep {
            axis: arg.axis.clone(),
            value,
            outcome,
        });
    }
    Ok(steps)
}

/// Human description of a selection (e.g., "Color: Red, Size: M").
pub fn describe_selection(selector: &VariantSelector) -> String {
    let parts: Vec<String> = selector
        .selection()
        .iter()
        .map(|(code, value)| {
            let axis = selector
                .attributes()
                .get(code)
                .map(String::as_str)
                .unwrap_or(code.as_str());
            let label = selector
                .options()
                .get(code)
                .and_then(|values| values.get(value))
                .map(|v| v.label.clone())
                .unwrap_or_else(|| value.to_string());
            format!("{}: {}", axis, label)
        })
        .collect();

    if parts.is_empty() {
        "nothing selected".to_string()
    } else {
        parts.join(", ")
    }
}
