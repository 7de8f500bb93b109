//! Brand and product listing commands.

use anyhow::Result;
use serde::Serialize;
use storefront_core::prelude::*;

use super::ProductsArgs;
use crate::context::Context;

/// Run the brands command.
pub async fn brands(ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog().await?;

    if ctx.output.is_json() {
        ctx.output.json(&catalog.brands());
        return Ok(());
    }

    ctx.output.header("Brands");
    if catalog.brands().is_empty() {
        ctx.output.info("No brands found.");
        return Ok(());
    }

    let widths = [6, 24, 16];
    ctx.output.table_row(&["ID", "TITLE", "CODE"], &widths);
    for brand in catalog.brands() {
        ctx.output
            .table_row(&[&brand.id.to_string(), &brand.title, &brand.code], &widths);
    }

    Ok(())
}

#[derive(Serialize)]
struct ProductRow<'a> {
    id: ProductId,
    sku: &'a str,
    title: &'a str,
    #[serde(rename = "type")]
    product_type: &'static str,
    brand: &'a str,
    price: String,
    image: &'a str,
}

/// Run the products command.
pub async fn products(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog().await?;

    if let Some(brand) = args.brand {
        ctx.output
            .debug(&format!("Filtering by brand {}", catalog.brand_title(brand)));
    }

    let rows: Vec<ProductRow<'_>> = catalog
        .products(args.brand)
        .into_iter()
        .map(|product| {
            let branded = catalog.branded(product);
            let info = product.info();
            ProductRow {
                id: info.id,
                sku: &info.sku,
                title: &info.title,
                product_type: product.product_type().as_str(),
                brand: branded.brand,
                price: info.regular_price.display(),
                image: &info.image,
            }
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&rows);
        return Ok(());
    }

    ctx.output.header("Products");
    if rows.is_empty() {
        ctx.output.info("No products found.");
        return Ok(());
    }

    let widths = [6, 16, 24, 14, 18, 10];
    ctx.output.table_row(
        &["ID", "SKU", "TITLE", "TYPE", "BRAND", "PRICE"],
        &widths,
    );
    for row in &rows {
        ctx.output.table_row(
            &[
                &row.id.to_string(),
                row.sku,
                row.title,
                row.product_type,
                row.brand,
                &row.price,
            ],
            &widths,
        );
    }

    Ok(())
}
