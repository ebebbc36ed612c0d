use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::bulk::BulkUploadError;
use crate::domain::business::BusinessError;
use crate::domain::catalog::CatalogError;
use crate::domain::invoice::{ImportError, InvoiceError, ValueObjectError};

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Bad input: validation failures, rejected imports (400 Bad Request)
  Validation(String),

  /// Operation needs a signed-in user (403 Forbidden)
  AuthenticationRequired(String),

  /// Record belongs to someone else (403 Forbidden)
  PermissionDenied(String),

  /// Uploaded bytes could not be decoded or read (422 Unprocessable Entity)
  UnreadableInput(String),

  /// Missing record (404 Not Found)
  NotFound(String),

  /// Picking more than is in stock (409 Conflict)
  InsufficientStock(String),

  /// A referenced image could not be fetched (502 Bad Gateway)
  AssetUnavailable(String),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::AuthenticationRequired(msg) => write!(f, "Authentication required: {}", msg),
      ApiError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
      ApiError::UnreadableInput(msg) => write!(f, "Unreadable input: {}", msg),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::InsufficientStock(msg) => write!(f, "Insufficient stock: {}", msg),
      ApiError::AssetUnavailable(msg) => write!(f, "Asset unavailable: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::AuthenticationRequired(_) | ApiError::PermissionDenied(_) => StatusCode::FORBIDDEN,
      ApiError::UnreadableInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::InsufficientStock(_) => StatusCode::CONFLICT,
      ApiError::AssetUnavailable(_) => StatusCode::BAD_GATEWAY,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::AuthenticationRequired(msg) => ("authentication_required", msg.clone()),
      ApiError::PermissionDenied(msg) => ("permission_denied", msg.clone()),
      ApiError::UnreadableInput(msg) => ("unreadable_input", msg.clone()),
      ApiError::NotFound(msg) => ("not_found", msg.clone()),
      ApiError::InsufficientStock(msg) => ("insufficient_stock", msg.clone()),
      ApiError::AssetUnavailable(msg) => ("asset_unavailable", msg.clone()),
      ApiError::Internal(msg) => {
        // Don't expose internal error details to clients
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
      details: None,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

impl From<ValueObjectError> for ApiError {
  fn from(error: ValueObjectError) -> Self {
    ApiError::Validation(error.to_string())
  }
}

impl From<ImportError> for ApiError {
  fn from(error: ImportError) -> Self {
    if error.is_io() {
      ApiError::UnreadableInput(error.to_string())
    } else {
      ApiError::Validation(error.to_string())
    }
  }
}

impl From<CatalogError> for ApiError {
  fn from(error: CatalogError) -> Self {
    match error {
      CatalogError::Validation(_)
      | CatalogError::ValueObject(_)
      | CatalogError::InvalidQuantity(_)
      | CatalogError::Inactive(_) => ApiError::Validation(error.to_string()),
      CatalogError::ProductNotFound(_) => ApiError::NotFound(error.to_string()),
      CatalogError::InsufficientStock { .. } => ApiError::InsufficientStock(error.to_string()),
      CatalogError::AuthenticationRequired => ApiError::AuthenticationRequired(error.to_string()),
      CatalogError::Database(e) => ApiError::Internal(format!("Repository error: {}", e)),
    }
  }
}

impl From<BulkUploadError> for ApiError {
  fn from(error: BulkUploadError) -> Self {
    match error {
      BulkUploadError::Import(e) => e.into(),
      BulkUploadError::EmptyBatch => ApiError::Validation(error.to_string()),
      BulkUploadError::BatchNotFound(_) => ApiError::NotFound(error.to_string()),
      BulkUploadError::AuthenticationRequired => {
        ApiError::AuthenticationRequired(error.to_string())
      }
      BulkUploadError::ValueObject(e) => {
        ApiError::Internal(format!("Stored bulk item is invalid: {}", e))
      }
      BulkUploadError::Database(e) => ApiError::Internal(format!("Repository error: {}", e)),
    }
  }
}

impl From<BusinessError> for ApiError {
  fn from(error: BusinessError) -> Self {
    match error {
      BusinessError::Validation(msg) => ApiError::Validation(msg),
      BusinessError::AuthenticationRequired => ApiError::AuthenticationRequired(error.to_string()),
      BusinessError::Database(e) => ApiError::Internal(format!("Repository error: {}", e)),
    }
  }
}

impl From<InvoiceError> for ApiError {
  fn from(error: InvoiceError) -> Self {
    match error {
      InvoiceError::Validation(e) => e.into(),
      InvoiceError::Import(e) => e.into(),
      InvoiceError::Catalog(e) => e.into(),
      InvoiceError::Business(e) => e.into(),
      InvoiceError::CustomerNotFound(_)
      | InvoiceError::InvoiceNotFound(_)
      | InvoiceError::LineItemNotFound(_) => ApiError::NotFound(error.to_string()),
      InvoiceError::AuthenticationRequired(msg) => ApiError::AuthenticationRequired(msg),
      InvoiceError::PermissionDenied(msg) => ApiError::PermissionDenied(msg),
      InvoiceError::AssetLoadFailed { .. } => ApiError::AssetUnavailable(error.to_string()),
      InvoiceError::RenderMismatch(_)
      | InvoiceError::Template(_)
      | InvoiceError::PdfGenerationFailed(_)
      | InvoiceError::Internal(_) => ApiError::Internal(error.to_string()),
      InvoiceError::Database(e) => ApiError::Internal(format!("Repository error: {}", e)),
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    ApiError::Validation(messages.join(", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;
  use uuid::Uuid;

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::Validation("test".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::AuthenticationRequired("test".to_string()).status_code(),
      StatusCode::FORBIDDEN
    );
    assert_eq!(
      ApiError::InsufficientStock("test".to_string()).status_code(),
      StatusCode::CONFLICT
    );
    assert_eq!(
      ApiError::Internal("test".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_invoice_error_conversion() {
    let api_error: ApiError = InvoiceError::InvoiceNotFound(Uuid::new_v4()).into();
    assert_eq!(api_error.status_code(), StatusCode::NOT_FOUND);

    let api_error: ApiError = InvoiceError::AuthenticationRequired("save".to_string()).into();
    assert_eq!(api_error.status_code(), StatusCode::FORBIDDEN);

    let api_error: ApiError = InvoiceError::Import(ImportError::MissingDescription { row: 3 }).into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);
    assert!(api_error.to_string().contains("Row 3"));

    let api_error: ApiError = InvoiceError::AssetLoadFailed {
      url: "seal.png".to_string(),
      reason: "timed out".to_string(),
    }
    .into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_GATEWAY);
  }

  #[test]
  fn test_unreadable_upload_is_not_a_validation_error() {
    let api_error: ApiError = InvoiceError::Import(ImportError::Encoding).into();
    assert_eq!(api_error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let api_error: ApiError = ImportError::Read("zip header missing".to_string()).into();
    assert_eq!(api_error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let api_error: ApiError = ImportError::OutOfRange("subtotal".to_string()).into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);
  }

  #[test]
  fn test_nested_catalog_error_keeps_its_status() {
    let api_error: ApiError = InvoiceError::Catalog(CatalogError::InsufficientStock {
      requested: dec!(5),
      available: 2,
    })
    .into();
    assert_eq!(api_error.status_code(), StatusCode::CONFLICT);
  }

  #[test]
  fn test_bulk_upload_error_conversion() {
    let api_error: ApiError = BulkUploadError::BatchNotFound(Uuid::new_v4()).into();
    assert_eq!(api_error.status_code(), StatusCode::NOT_FOUND);

    let api_error: ApiError = BulkUploadError::EmptyBatch.into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);

    let api_error: ApiError = BulkUploadError::Import(ImportError::Encoding).into();
    assert_eq!(api_error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
  }

  #[test]
  fn test_internal_details_are_hidden() {
    let response = ApiError::Internal("connection reset".to_string()).error_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
