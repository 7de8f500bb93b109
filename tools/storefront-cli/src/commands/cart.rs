//! Add-to-cart command.

use anyhow::Result;
use serde::Serialize;
use storefront_core::prelude::*;

use super::{apply_selections, describe_selection, find_product, CartArgs};
use crate::context::Context;

#[derive(Serialize)]
struct CartReport<'a> {
    outcome: AddToCart,
    items: Vec<&'a CartItem>,
    total_items: u32,
    total_price: f64,
}

/// Run the cart command: resolve the selection, add it to a fresh cart and
/// show the cart.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog().await?;
    let product = find_product(&catalog, &args.selection.product)?;

    let mut selector = VariantSelector::for_product(product);
    apply_selections(&mut selector, &args.selection.selections, &ctx.output)?;

    let mut cart = Cart::new();
    let interaction = CartInteraction::new(catalog.branded(product), &selector);
    let outcome = interaction.add_to_cart(&mut cart);

    if let (AddToCart::Added, Some(item)) = (outcome, interaction.line_item()) {
        if args.quantity != 1 {
            cart.set_quantity(item.id, args.quantity);
        }
    }

    let report = CartReport {
        outcome,
        items: cart.items().collect(),
        total_items: cart.total_items(),
        total_price: cart.total_price(),
    };

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    ctx.output.header("Cart");
    match outcome {
        AddToCart::Added => ctx.output.success(&format!("Added {}", product.title())),
        AddToCart::AlreadyInCart => ctx.output.info("Already in cart."),
        AddToCart::Unavailable => {
            ctx.output.warn(&format!(
                "Select every option first ({}).",
                describe_selection(&selector)
            ));
            return Ok(());
        }
    }

    let widths = [6, 24, 18, 4, 10];
    ctx.output
        .table_row(&["ID", "TITLE", "BRAND", "QTY", "PRICE"], &widths);
    for item in &report.items {
        ctx.output.table_row(
            &[
                &item.id.to_string(),
                &item.title,
                &item.brand,
                &item.quantity.to_string(),
                &item.price.display(),
            ],
            &widths,
        );
        for (axis, label) in &item.options {
            ctx.output.kv(axis, label);
        }
    }

    let currency = report
        .items
        .first()
        .map(|item| item.price.currency.clone())
        .unwrap_or_default();
    ctx.output.info("");
    ctx.output.kv("items", &report.total_items.to_string());
    ctx.output
        .kv("total", &Price::new(currency, report.total_price).display());

    Ok(())
}
