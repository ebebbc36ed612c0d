use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::application::invoice::{CustomerFields, InvoiceDraft, InvoiceEdit};
use crate::domain::catalog::StockFilter;

/// Body for endpoints that only need the current document state
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftRequest {
  #[serde(default)]
  pub draft: InvoiceDraft,
}

/// Edits applied in order to the draft. An empty list just recomputes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditInvoiceRequest {
  #[serde(default)]
  pub draft: InvoiceDraft,
  #[serde(default)]
  pub edits: Vec<InvoiceEdit>,
}

/// Add a catalog product to the draft
#[derive(Debug, Clone, Deserialize)]
pub struct PickItemRequest {
  #[serde(default)]
  pub draft: InvoiceDraft,
  pub product_id: Uuid,
  pub quantity: Decimal,
  pub date: Option<NaiveDate>,
}

/// Import sent as a JSON body.
///
/// Text formats go in `content`; binary workbooks go base64-encoded in
/// `content_base64`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRequest {
  #[serde(default)]
  pub draft: InvoiceDraft,
  pub format: String,
  pub content: Option<String>,
  pub content_base64: Option<String>,
}

/// Bulk upload sent as a JSON body, same encoding rules as [`ImportRequest`]
#[derive(Debug, Clone, Deserialize)]
pub struct BulkUploadRequest {
  pub format: String,
  pub content: Option<String>,
  pub content_base64: Option<String>,
}

/// Optional query string for multipart uploads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportQuery {
  pub format: Option<String>,
}

/// `?q=` filter shared by the list endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
  pub q: Option<String>,
}

/// `GET /api/products` filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductListQuery {
  pub q: Option<String>,
  pub category: Option<String>,
  pub stock: Option<StockFilter>,
}

/// Request for creating or updating a customer
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CustomerRequest {
  #[validate(length(
    min = 1,
    max = 255,
    message = "Customer name must be between 1 and 255 characters"
  ))]
  pub name: String,

  pub email: Option<String>,

  #[validate(length(max = 2000, message = "Address is too long"))]
  pub address: Option<String>,

  #[validate(length(max = 50, message = "Phone number is too long"))]
  pub phone: Option<String>,
}

impl From<CustomerRequest> for CustomerFields {
  fn from(request: CustomerRequest) -> Self {
    Self {
      name: request.name,
      email: request.email,
      address: request.address,
      phone: request.phone,
    }
  }
}

/// Standard success response for operations without data
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
  /// Success message
  pub message: String,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Optional detailed error information
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}
