use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::entities::{Customer, LineItem, SavedInvoice};
use super::errors::InvoiceError;
use super::import::{ImportError, ImportFormat, ImportedRow, materialize};
use super::rendering::{ImageAsset, InvoiceView, PageLayout, RenderMode};

#[async_trait]
pub trait CustomerRepository: Send + Sync {
  async fn create(&self, customer: Customer) -> Result<Customer, InvoiceError>;
  async fn update(&self, customer: Customer) -> Result<Customer, InvoiceError>;
  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, InvoiceError>;
  async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Customer>, InvoiceError>;
  async fn search_by_name(&self, owner_id: Uuid, query: &str)
  -> Result<Vec<Customer>, InvoiceError>;
}

/// Saved invoices are write-once: there is no update.
#[async_trait]
pub trait SavedInvoiceRepository: Send + Sync {
  async fn create(&self, invoice: SavedInvoice) -> Result<SavedInvoice, InvoiceError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<SavedInvoice>, InvoiceError>;
  async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<SavedInvoice>, InvoiceError>;
  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError>;
}

/// Turns raw uploaded bytes into typed rows, and from there into a fully
/// materialized batch of line items.
pub trait ItemSource: Send + Sync {
  fn format(&self) -> ImportFormat;

  fn read_rows(&self, input: &[u8]) -> Result<Vec<ImportedRow>, ImportError>;

  fn read_items(&self, input: &[u8], today: NaiveDate) -> Result<Vec<LineItem>, ImportError> {
    let items = materialize(self.read_rows(input)?, today)?;
    tracing::debug!("Parsed {} line items from {}", items.len(), self.format().as_str());
    Ok(items)
  }
}

pub trait InvoiceRenderer: Send + Sync {
  fn render(&self, view: &InvoiceView, mode: RenderMode) -> Result<String, InvoiceError>;
}

#[async_trait]
pub trait PdfGenerator: Send + Sync {
  async fn generate_pdf(&self, html: &str, layout: &PageLayout) -> Result<Vec<u8>, InvoiceError>;
}

#[async_trait]
pub trait AssetLoader: Send + Sync {
  async fn load(&self, url: &str) -> Result<ImageAsset, InvoiceError>;
}
