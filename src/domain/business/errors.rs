use thiserror::Error;

#[derive(Debug, Error)]
pub enum BusinessError {
  #[error("Validation error: {0}")]
  Validation(String),

  #[error("Sign in required to manage the business profile")]
  AuthenticationRequired,

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}
