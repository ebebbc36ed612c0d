use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::invoice::{DocumentDefaults, TaxRate, ValueObjectError};

// Default timeout functions
fn default_db_connect_timeout() -> u64 {
  5
}

fn default_db_acquire_timeout() -> u64 {
  3
}

fn default_asset_timeout() -> u64 {
  15
}

fn default_asset_dir() -> String {
  "./uploads".to_string()
}

fn default_currency_symbol() -> String {
  "₹".to_string()
}

fn default_user_header() -> String {
  "X-Authenticated-User".to_string()
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub database: DatabaseConfig,
  pub invoice: InvoiceConfig,
  #[serde(default)]
  pub render: RenderConfig,
  #[serde(default)]
  pub pdf: PdfConfig,
  #[serde(default)]
  pub assets: AssetsConfig,
  #[serde(default)]
  pub session: SessionConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
  pub url: String,
  pub max_connections: u32,
  #[serde(default = "default_db_connect_timeout")]
  pub connect_timeout_seconds: u64,
  #[serde(default = "default_db_acquire_timeout")]
  pub acquire_timeout_seconds: u64,
}

/// Defaults for freshly created invoice documents
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceConfig {
  pub default_tax_rate: Decimal,
  pub invoice_number_prefix: String,
  pub default_payment_instructions: String,
  pub default_thank_you_note: String,
}

impl InvoiceConfig {
  pub fn document_defaults(&self) -> Result<DocumentDefaults, ValueObjectError> {
    Ok(DocumentDefaults {
      invoice_number_prefix: self.invoice_number_prefix.clone(),
      tax_rate: TaxRate::new(self.default_tax_rate)?,
      payment_instructions: self.default_payment_instructions.clone(),
      thank_you_note: self.default_thank_you_note.clone(),
    })
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
  #[serde(default = "default_currency_symbol")]
  pub currency_symbol: String,
}

impl Default for RenderConfig {
  fn default() -> Self {
    Self {
      currency_symbol: default_currency_symbol(),
    }
  }
}

/// PDF generation configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PdfConfig {
  pub wkhtmltopdf_path: Option<String>,
}

/// Where seal and signature images are fetched from during export
#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
  #[serde(default = "default_asset_timeout")]
  pub load_timeout_seconds: u64,
  #[serde(default = "default_asset_dir")]
  pub base_dir: String,
}

impl AssetsConfig {
  pub fn load_timeout(&self) -> Duration {
    Duration::from_secs(self.load_timeout_seconds)
  }

  pub fn base_path(&self) -> PathBuf {
    PathBuf::from(&self.base_dir)
  }
}

impl Default for AssetsConfig {
  fn default() -> Self {
    Self {
      load_timeout_seconds: default_asset_timeout(),
      base_dir: default_asset_dir(),
    }
  }
}

/// Authentication happens upstream; the proxy passes the user id in this header.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
  #[serde(default = "default_user_header")]
  pub user_header: String,
}

impl Default for SessionConfig {
  fn default() -> Self {
    Self {
      user_header: default_user_header(),
    }
  }
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Later sources override earlier ones:
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with the INVOICER_ prefix, sections separated by
  ///    double underscores, e.g. `INVOICER_SERVER__PORT=8080` or
  ///    `INVOICER_RENDER__CURRENCY_SYMBOL=$`
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("INVOICER")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}
