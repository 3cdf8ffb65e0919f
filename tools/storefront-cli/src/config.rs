//! CLI configuration.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::cart::PricingConfig;
use storefront_commerce::catalog::DEFAULT_CATALOG_URL;
use storefront_commerce::Money;

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Storefront configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Catalog API settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Flat shipping and tax estimates.
    #[serde(default)]
    pub pricing: PricingSettings,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Self = if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject values the storefront cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.catalog.base_url.starts_with("http://")
            || self.catalog.base_url.starts_with("https://"))
        {
            bail!("catalog.base_url must be an http(s) URL");
        }
        if self.catalog.timeout_secs == 0 {
            bail!("catalog.timeout_secs must be greater than zero");
        }
        for (key, value) in [
            ("pricing.shipping_estimate", self.pricing.shipping_estimate),
            ("pricing.tax_estimate", self.pricing.tax_estimate),
        ] {
            if value < 0.0 || Money::try_from_rupees(value).is_none() {
                bail!("{} must be a non-negative amount", key);
            }
        }
        Ok(())
    }
}

/// Catalog API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the product API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Flat shipping and tax estimates in rupees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingSettings {
    #[serde(default = "default_shipping")]
    pub shipping_estimate: f64,

    #[serde(default = "default_tax")]
    pub tax_estimate: f64,
}

impl PricingSettings {
    pub fn to_pricing_config(&self) -> PricingConfig {
        PricingConfig::new(
            Money::from_rupees(self.shipping_estimate),
            Money::from_rupees(self.tax_estimate),
        )
    }
}

fn default_shipping() -> f64 {
    PricingConfig::DEFAULT_SHIPPING.to_rupees()
}

fn default_tax() -> f64 {
    PricingConfig::DEFAULT_TAX.to_rupees()
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            shipping_estimate: default_shipping(),
            tax_estimate: default_tax(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines (for development).
    #[default]
    Human,
    /// JSON lines (for log aggregation).
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Storefront configuration

[catalog]
base_url = "{base_url}"
timeout_secs = {timeout}

[pricing]
# Flat estimates in rupees, added to every order.
shipping_estimate = {shipping:.2}
tax_estimate = {tax:.2}

[log]
# Overridden by RUST_LOG when set.
level = "info"
format = "human"
"#,
        base_url = DEFAULT_CATALOG_URL,
        timeout = default_timeout_secs(),
        shipping = default_shipping(),
        tax = default_tax(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_round_trips_to_defaults() {
        let config: StorefrontConfig = toml::from_str(&generate_default_config()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.catalog.base_url, DEFAULT_CATALOG_URL);
        assert_eq!(config.pricing.to_pricing_config(), PricingConfig::default());
        assert_eq!(config.log.format, LogFormat::Human);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [pricing]
            shipping_estimate = 0.0
            "#,
        )
        .unwrap();

        let pricing = config.pricing.to_pricing_config();
        assert_eq!(pricing.shipping_estimate, Money::zero());
        assert_eq!(pricing.tax_estimate, Money::from_rupees(8.32));
        assert_eq!(config.catalog.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_validation() {
        let mut config = StorefrontConfig::default();
        config.validate().unwrap();

        config.pricing.tax_estimate = -1.0;
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.catalog.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_log_format() {
        let config: StorefrontConfig =
            serde_json::from_str(r#"{"log": {"level": "debug", "format": "json"}}"#).unwrap();
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.level, "debug");
    }
}
