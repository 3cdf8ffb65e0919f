//! CLI command implementations.

pub mod config;
pub mod product;
pub mod products;
pub mod quote;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only show products in this category.
    #[arg(short, long)]
    pub category: Option<String>,

    /// List the categories instead of the products.
    #[arg(long)]
    pub categories: bool,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Catalog product id.
    pub id: String,
}

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Cart file (TOML or JSON).
    pub cart: String,

    /// Discount field value; overrides the one in the cart file.
    #[arg(short, long, allow_hyphen_values = true)]
    pub discount: Option<String>,
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
    /// Print the path of the loaded config file.
    Path,
    /// Write a default storefront.toml in the working directory.
    Init {
        /// Overwrite an existing file without asking.
        #[arg(short, long)]
        force: bool,
    },
}
