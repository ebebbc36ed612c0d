use thiserror::Error;
use uuid::Uuid;

use crate::domain::invoice::{ImportError, ValueObjectError};

#[derive(Debug, Error)]
pub enum BulkUploadError {
  #[error(transparent)]
  Import(#[from] ImportError),

  #[error("Validation error: {0}")]
  ValueObject(#[from] ValueObjectError),

  #[error("The upload contains no items")]
  EmptyBatch,

  #[error("Upload batch not found: {0}")]
  BatchNotFound(Uuid),

  #[error("Sign in required to upload items")]
  AuthenticationRequired,

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}
