use super::import::ImportError;
use crate::domain::business::BusinessError;
use crate::domain::catalog::CatalogError;
use super::value_objects::ValueObjectError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Import failed: {0}")]
  Import(#[from] ImportError),

  #[error(transparent)]
  Catalog(#[from] CatalogError),

  #[error(transparent)]
  Business(#[from] BusinessError),

  #[error("Customer not found: {0}")]
  CustomerNotFound(Uuid),

  #[error("Invoice not found: {0}")]
  InvoiceNotFound(Uuid),

  #[error("Line item not found: {0}")]
  LineItemNotFound(Uuid),

  #[error("Sign in required: {0}")]
  AuthenticationRequired(String),

  #[error("Permission denied: {0}")]
  PermissionDenied(String),

  #[error("Rendered invoice does not match the document: {0}")]
  RenderMismatch(String),

  #[error("Template rendering failed: {0}")]
  Template(String),

  #[error("Could not load image '{url}': {reason}")]
  AssetLoadFailed { url: String, reason: String },

  #[error("PDF generation failed: {0}")]
  PdfGenerationFailed(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Internal error: {0}")]
  Internal(String),
}
