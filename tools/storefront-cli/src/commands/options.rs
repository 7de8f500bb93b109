//! Option inspection, variant resolution and interactive picking.

use anyhow::{bail, Result};
use console::style;
use dialoguer::{theme::ColorfulTheme, Select};
use serde::Serialize;
use storefront_core::prelude::*;

use super::{apply_selections, describe_selection, find_product, PickArgs, SelectionArgs, SelectionStep};
use crate::context::Context;
use crate::output::{option_badge, OptionState};

#[derive(Serialize)]
struct ValueRow {
    value_index: ValueIndex,
    label: String,
    value: String,
    state: OptionState,
}

#[derive(Serialize)]
struct AxisRow {
    code: String,
    label: String,
    values: Vec<ValueRow>,
}

fn axis_rows(selector: &VariantSelector) -> Vec<AxisRow> {
    selector
        .options()
        .iter()
        .map(|(code, values)| AxisRow {
            code: code.clone(),
            label: selector.attributes().get(code).cloned().unwrap_or_default(),
            values: values
                .values()
                .map(|v| ValueRow {
                    value_index: v.value_index,
                    label: v.label.clone(),
                    value: v.value.to_string(),
                    state: OptionState::new(
                        selector.is_selected(code, v.value_index),
                        selector.is_disabled(code, v.value_index),
                    ),
                })
                .collect(),
        })
        .collect()
}

#[derive(Serialize)]
struct OptionsReport {
    product: ProductId,
    steps: Vec<SelectionStep>,
    axes: Vec<AxisRow>,
    grouping: Option<AxisGrouping>,
    variant: Option<ResolvedVariant>,
}

/// Run the options command: every value with its state under the selection.
pub async fn options(args: SelectionArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog().await?;
    let product = find_product(&catalog, &args.product)?;

    let mut selector = VariantSelector::for_product(product);
    let steps = apply_selections(&mut selector, &args.selections, &ctx.output)?;
    let grouping = AxisGrouping::for_product(product);

    let report = OptionsReport {
        product: product.id(),
        steps,
        axes: axis_rows(&selector),
        grouping,
        variant: selector.resolved_variant(),
    };

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    ctx.output.header(&format!("Options for {}", product.title()));
    if !selector.is_configurable() {
        ctx.output.info("Simple product, no options.");
        return Ok(());
    }
    ctx.output.kv("selection", &describe_selection(&selector));

    for axis in &report.axes {
        ctx.output.info("");
        ctx.output.info(&format!("[{}] {}", axis.code, axis.label));
        let widths = [8, 12, 12, 10];
        for value in &axis.values {
            ctx.output.table_row(
                &[
                    &value.value_index.to_string(),
                    &value.label,
                    &value.value,
                    &option_badge(value.state),
                ],
                &widths,
            );
        }
    }

    if let Some(grouping) = &report.grouping {
        ctx.output.info("");
        ctx.output.info("Sizes by color:");
        for (color, sizes) in &grouping.color {
            ctx.output
                .list_item(&format!("{} → {}", color, join_or_dash(sizes)));
        }
        for diagnostic in &grouping.diagnostics {
            ctx.output.warn(&diagnostic.to_string());
        }
    }

    print_variant(ctx, report.variant.as_ref());
    Ok(())
}

#[derive(Serialize)]
struct ResolveReport {
    product: ProductId,
    steps: Vec<SelectionStep>,
    selection: Selection,
    variant: Option<ResolvedVariant>,
}

/// Run the resolve command: apply selections and report the variant.
pub async fn resolve(args: SelectionArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog().await?;
    let product = find_product(&catalog, &args.product)?;

    let mut selector = VariantSelector::for_product(product);
    let steps = apply_selections(&mut selector, &args.selections, &ctx.output)?;

    let report = ResolveReport {
        product: product.id(),
        steps,
        selection: selector.selection().clone(),
        variant: selector.resolved_variant(),
    };

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    ctx.output.header(&format!("Resolve {}", product.title()));
    ctx.output.kv("selection", &describe_selection(&selector));
    print_variant(ctx, report.variant.as_ref());
    Ok(())
}

/// Run the pick command: choose values interactively until a variant resolves.
pub async fn pick(args: PickArgs, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        bail!("pick is interactive and does not support --json");
    }

    let catalog = ctx.load_catalog().await?;
    let product = find_product(&catalog, &args.product)?;
    let mut selector = VariantSelector::for_product(product);

    if !selector.is_configurable() {
        ctx.output.info(&format!("{} has no options.", product.title()));
        return Ok(());
    }

    let theme = ColorfulTheme::default();
    loop {
        ctx.output.header(&format!("{} ({})", product.title(), describe_selection(&selector)));

        let mut choices: Vec<(String, ValueIndex)> = Vec::new();
        let mut items: Vec<String> = Vec::new();
        for (code, values) in selector.options() {
            for value in values.values() {
                let state = OptionState::new(
                    selector.is_selected(code, value.value_index),
                    selector.is_disabled(code, value.value_index),
                );
                items.push(format!(
                    "{} {} ({})",
                    style(code).dim(),
                    value.label,
                    option_badge(state)
                ));
                choices.push((code.clone(), value.value_index));
            }
        }
        items.push("Done".to_string());

        let picked = Select::with_theme(&theme)
            .with_prompt("Toggle an option")
            .items(&items)
            .default(0)
            .interact()?;

        let Some((code, value)) = choices.get(picked) else {
            break;
        };
        if selector.select(code, *value) == SelectOutcome::Rejected {
            ctx.output.warn("That option is not available with the current selection.");
        }
    }

    print_variant(ctx, selector.resolved_variant().as_ref());
    Ok(())
}

fn print_variant(ctx: &Context, variant: Option<&ResolvedVariant>) {
    ctx.output.info("");
    match variant {
        Some(variant) => {
            ctx.output.success(&format!("Variant {}", variant.product.sku));
            ctx.output.kv("id", &variant.product.id.to_string());
            ctx.output.kv("image", &variant.product.image);
            for (code, value) in &variant.options {
                ctx.output.kv(code, &value.label);
            }
        }
        None => ctx.output.info("No variant matches the selection."),
    }
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}
