//! Catalog listing.

use anyhow::{Context as _, Result};
use storefront_commerce::catalog::{categories, filter_by_category, CatalogSource, Product};

use super::ProductsArgs;
use crate::context::Context;

const WIDTHS: [usize; 4] = [4, 18, 44, 14];

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog();

    let spinner = ctx.output.spinner("Loading catalog...");
    let result = catalog.list_products().await;
    spinner.finish_and_clear();
    let products = result.context("Failed to load the product catalog")?;

    if args.categories {
        let names = categories(&products);
        if ctx.output.is_json() {
            ctx.output.json(&names);
            return Ok(());
        }
        ctx.output.header("Categories");
        for name in names {
            ctx.output.list_item(name);
        }
        return Ok(());
    }

    let shown: Vec<&Product> = match &args.category {
        Some(category) => filter_by_category(&products, category),
        None => products.iter().collect(),
    };

    if ctx.output.is_json() {
        ctx.output.json(&shown);
        return Ok(());
    }

    if shown.is_empty() {
        ctx.output.info("No products found.");
        return Ok(());
    }

    ctx.output.header(&match &args.category {
        Some(category) => format!("Products in {}", category),
        None => "Products".to_string(),
    });
    ctx.output.table_row(&["ID", "CATEGORY", "TITLE", "PRICE"], &WIDTHS);
    for product in shown {
        let price = product.price.display();
        ctx.output.table_row(
            &[
                product.id.as_str(),
                product.category.as_str(),
                product.title.as_str(),
                price.as_str(),
            ],
            &WIDTHS,
        );
    }

    Ok(())
}
