use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::invoice::ValueObjectError;

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("Validation error: {0}")]
  Validation(String),

  #[error("Validation error: {0}")]
  ValueObject(#[from] ValueObjectError),

  #[error("Product not found: {0}")]
  ProductNotFound(Uuid),

  #[error("Invalid quantity: {0}")]
  InvalidQuantity(String),

  #[error("Only {available} in stock, {requested} requested")]
  InsufficientStock { requested: Decimal, available: i32 },

  #[error("Product '{0}' is inactive")]
  Inactive(String),

  #[error("Sign in required to use the catalog")]
  AuthenticationRequired,

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}
