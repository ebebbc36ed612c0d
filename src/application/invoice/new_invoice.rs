use serde::Serialize;
use std::sync::Arc;

use crate::domain::Session;
use crate::domain::invoice::{InvoiceDocument, InvoiceError};

use super::draft::DocumentFactory;

#[derive(Debug)]
pub struct NewInvoiceCommand {
  pub session: Session,
}

#[derive(Debug, Serialize)]
pub struct NewInvoiceResponse {
  pub document: InvoiceDocument,
}

/// Starts an empty document with today's date and a generated number.
pub struct NewInvoiceUseCase {
  factory: Arc<DocumentFactory>,
}

impl NewInvoiceUseCase {
  pub fn new(factory: Arc<DocumentFactory>) -> Self {
    Self { factory }
  }

  pub async fn execute(&self, command: NewInvoiceCommand) -> Result<NewInvoiceResponse, InvoiceError> {
    let document = self.factory.blank(&command.session).await?;
    Ok(NewInvoiceResponse { document })
  }
}
