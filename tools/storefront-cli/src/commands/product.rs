//! Product detail view.

use anyhow::Result;
use storefront_commerce::catalog::ProductDetail;
use storefront_commerce::ProductId;

use super::ProductArgs;
use crate::context::Context;

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog();
    let mut detail = ProductDetail::new();

    let spinner = ctx.output.spinner(&format!("Loading product {}...", args.id));
    let loaded = detail.load(&catalog, ProductId::new(args.id.as_str())).await.cloned();
    spinner.finish_and_clear();

    // A failed load has already been logged; the view just stays empty.
    let Some(product) = loaded else {
        ctx.output.warn(&format!("No product data for {}", args.id));
        return Ok(());
    };

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.title);
    ctx.output.kv("id", product.id.as_str());
    ctx.output.kv("price", &product.price.display());
    ctx.output.kv("category", &product.category);
    let stars = usize::from(product.rating.stars());
    ctx.output.kv(
        "rating",
        &format!(
            "{}{} {} ({} reviews)",
            "★".repeat(stars),
            "☆".repeat(5 - stars),
            product.rating.rate,
            product.rating.count
        ),
    );
    if !product.image.is_empty() {
        ctx.output.kv("image", &product.image);
    }
    if let Some(description) = &product.description {
        ctx.output.info("");
        ctx.output.info(description);
    }

    Ok(())
}
