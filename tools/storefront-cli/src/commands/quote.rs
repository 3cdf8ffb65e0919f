//! Price a cart file.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use anyhow::{bail, Context as _, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::cart::{CartLineItem, CartSession, OrderSummary};
use storefront_commerce::catalog::{CatalogSource, Product};
use storefront_commerce::{Money, ProductId};

use super::QuoteArgs;
use crate::context::Context;

const WIDTHS: [usize; 4] = [5, 36, 14, 14];

/// A cart described on disk.
///
/// ```toml
/// discount = "10"
///
/// [[items]]
/// product_id = 1
/// quantity = "2"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct CartFile {
    #[serde(default)]
    pub discount: Option<FieldText>,
    #[serde(default)]
    pub items: Vec<CartFileLine>,
}

/// One line of a cart file. Lines without a `price` are looked up in the
/// catalog.
#[derive(Debug, Deserialize)]
pub struct CartFileLine {
    pub product_id: ProductId,
    #[serde(default)]
    pub quantity: Option<FieldText>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
}

/// A form field value, written either as a number or as the raw text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldText {
    Number(f64),
    Text(String),
}

impl FieldText {
    /// The text a user would have typed.
    pub fn as_input(&self) -> String {
        match self {
            FieldText::Number(n) => n.to_string(),
            FieldText::Text(s) => s.clone(),
        }
    }
}

impl CartFile {
    /// Load a cart file; `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read cart file: {}", path.display()))?;
        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
        Self::parse(&content, is_json)
            .with_context(|| format!("Failed to parse cart file: {}", path.display()))
    }

    fn parse(content: &str, is_json: bool) -> Result<Self> {
        if is_json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }
}

impl CartFileLine {
    /// The product described inline by this line, if it carries a price.
    pub fn inline_product(&self) -> Result<Option<Product>> {
        let Some(price) = self.price else {
            return Ok(None);
        };
        let Some(unit_price) = Money::try_from_rupees(price).filter(|p| !p.is_negative()) else {
            bail!("Invalid price {} for product {}", price, self.product_id);
        };

        let title = self
            .title
            .clone()
            .unwrap_or_else(|| format!("Product {}", self.product_id));
        let mut product = Product::new(self.product_id.clone(), title, unit_price);
        if let Some(category) = &self.category {
            product = product.with_category(category.clone());
        }
        Ok(Some(product))
    }
}

#[derive(Serialize)]
struct QuoteReport<'a> {
    lines: &'a [CartLineItem],
    quantity_errors: BTreeMap<&'a str, &'a str>,
    discount_input: &'a str,
    summary: &'a OrderSummary,
}

/// Run the quote command.
pub async fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let cart = CartFile::load(&ctx.resolve_path(&args.cart))?;
    let catalog = ctx.catalog();
    let mut session = CartSession::new(ctx.pricing_engine())?;
    let mut fetched: HashMap<ProductId, Product> = HashMap::new();

    for line in &cart.items {
        let product = match line.inline_product()? {
            Some(product) => product,
            None => match fetched.get(&line.product_id) {
                Some(product) => product.clone(),
                None => {
                    let spinner = ctx
                        .output
                        .spinner(&format!("Fetching product {}...", line.product_id));
                    let result = catalog.product(&line.product_id).await;
                    spinner.finish_and_clear();
                    match result {
                        Ok(product) => {
                            fetched.insert(line.product_id.clone(), product.clone());
                            product
                        }
                        Err(e) => {
                            tracing::warn!(product_id = %line.product_id, error = %e, "skipping cart line");
                            ctx.output
                                .warn(&format!("Skipping product {}: {}", line.product_id, e));
                            continue;
                        }
                    }
                }
            },
        };

        let line_id = session.add_product(&product)?;
        if let Some(quantity) = &line.quantity {
            // Rejected input stays on the session as a per-line message.
            if let Err(e) = session.change_quantity(&product.id, &line_id, &quantity.as_input()) {
                if !e.is_validation() {
                    return Err(e.into());
                }
            }
        }
    }

    let discount = args
        .discount
        .or_else(|| cart.discount.as_ref().map(FieldText::as_input));
    if let Some(discount) = discount {
        session.set_discount_input(discount)?;
    }

    if ctx.output.is_json() {
        let items = session.store().items();
        let quantity_errors = items
            .iter()
            .filter_map(|item| {
                session
                    .quantity_error(&item.line_id)
                    .map(|msg| (item.line_id.as_str(), msg))
            })
            .collect();
        ctx.output.json(&QuoteReport {
            lines: items,
            quantity_errors,
            discount_input: session.discount_input(),
            summary: session.summary(),
        });
        return Ok(());
    }

    print_cart(&session, ctx);
    print_summary(&session, ctx);
    Ok(())
}

fn print_cart(session: &CartSession, ctx: &Context) {
    ctx.output.header("Cart");
    let items = session.store().items();
    if items.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    ctx.output.table_row(&["QTY", "ITEM", "PRICE", "TOTAL"], &WIDTHS);
    for item in items {
        let quantity = item.quantity.to_string();
        let unit = item.unit_price.display();
        let total = item
            .line_total()
            .map(|total| total.display())
            .unwrap_or_else(|| "-".to_string());
        ctx.output.table_row(
            &[quantity.as_str(), item.title.as_str(), unit.as_str(), total.as_str()],
            &WIDTHS,
        );
        if let Some(msg) = session.quantity_error(&item.line_id) {
            ctx.output.field_error(msg);
        }
    }
}

fn print_summary(session: &CartSession, ctx: &Context) {
    let summary = session.summary();

    ctx.output.header("Order summary");
    ctx.output
        .amount_row("Subtotal", &summary.subtotal.display(), false);
    ctx.output
        .amount_row("Discount", &discount_row(summary), false);
    if let Some(msg) = session.discount_error() {
        ctx.output.field_error(msg);
    }
    ctx.output
        .amount_row("Shipping estimate", &summary.shipping_total.display(), false);
    ctx.output
        .amount_row("Tax estimate", &summary.tax_total.display(), false);
    ctx.output
        .amount_row("Order total", &summary.order_total.display(), true);

    if summary.order_total.is_negative() {
        ctx.output
            .warn("The discount is larger than the order; the total is negative.");
    }
}

/// The discount as shown in the summary, always with a leading minus.
fn discount_row(summary: &OrderSummary) -> String {
    format!("-{}", summary.discount_total.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_cart() {
        let cart = CartFile::parse(
            r#"
discount = "10"

[[items]]
product_id = 1
quantity = "2"

[[items]]
product_id = "7"
quantity = 3
title = "Ring"
price = 9.99
"#,
            false,
        )
        .unwrap();

        assert_eq!(cart.discount, Some(FieldText::Text("10".into())));
        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].product_id, ProductId::new("1"));
        assert_eq!(cart.items[0].quantity.as_ref().unwrap().as_input(), "2");
        assert_eq!(cart.items[1].quantity.as_ref().unwrap().as_input(), "3");
        assert!(cart.items[0].inline_product().unwrap().is_none());

        let ring = cart.items[1].inline_product().unwrap().unwrap();
        assert_eq!(ring.title, "Ring");
        assert_eq!(ring.price, Money::from_paise(999));
    }

    #[test]
    fn test_parse_json_cart() {
        let cart = CartFile::parse(
            r#"{"discount": 150, "items": [{"product_id": 2, "quantity": "abc"}]}"#,
            true,
        )
        .unwrap();

        assert_eq!(cart.discount.unwrap().as_input(), "150");
        assert_eq!(cart.items[0].quantity.as_ref().unwrap().as_input(), "abc");
    }

    #[test]
    fn test_empty_cart_file() {
        let cart = CartFile::parse("", false).unwrap();
        assert!(cart.items.is_empty());
        assert!(cart.discount.is_none());
    }

    #[test]
    fn test_inline_product_defaults() {
        let cart = CartFile::parse(
            r#"{"items": [{"product_id": 4, "price": 15.99, "category": "men's clothing"}]}"#,
            true,
        )
        .unwrap();
        let product = cart.items[0].inline_product().unwrap().unwrap();
        assert_eq!(product.title, "Product 4");
        assert_eq!(product.category, "men's clothing");
    }

    #[test]
    fn test_inline_product_rejects_negative_price() {
        let cart =
            CartFile::parse(r#"{"items": [{"product_id": 4, "price": -1.0}]}"#, true).unwrap();
        assert!(cart.items[0].inline_product().is_err());

        let cart =
            CartFile::parse(r#"{"items": [{"product_id": 4, "price": 1e300}]}"#, true).unwrap();
        assert!(cart.items[0].inline_product().is_err());
    }

    #[test]
    fn test_discount_row_is_always_signed() {
        let engine = storefront_commerce::cart::PricingEngine::default();

        let none = engine.quote(&[], "").unwrap();
        assert_eq!(discount_row(&none), "-\u{20b9}0.00");

        let mut session = CartSession::new(engine).unwrap();
        session
            .add_product(&Product::new("1", "Bag", Money::from_rupees(200.0)))
            .unwrap();
        session.set_discount_input("10%").unwrap();
        assert_eq!(discount_row(session.summary()), "-\u{20b9}20.00");
    }

    #[test]
    fn test_fractional_quantity_text() {
        assert_eq!(FieldText::Number(1.5).as_input(), "1.5");
        assert_eq!(FieldText::Number(2.0).as_input(), "2");
    }
}
