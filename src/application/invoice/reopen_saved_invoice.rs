use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Session;
use crate::domain::invoice::{InvoiceDocument, InvoiceError, InvoiceService};

#[derive(Debug)]
pub struct ReopenSavedInvoiceCommand {
  pub session: Session,
  pub saved_invoice_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ReopenSavedInvoiceResponse {
  pub source_invoice_id: Uuid,
  pub document: InvoiceDocument,
}

/// Loads a saved record into a fresh editable document. The saved record is
/// left untouched; amounts and totals are recomputed from the stored items.
pub struct ReopenSavedInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ReopenSavedInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: ReopenSavedInvoiceCommand,
  ) -> Result<ReopenSavedInvoiceResponse, InvoiceError> {
    let saved = self
      .invoice_service
      .get_saved_invoice(&command.session, command.saved_invoice_id)
      .await?;

    Ok(ReopenSavedInvoiceResponse {
      source_invoice_id: saved.id,
      document: InvoiceDocument::reopen(&saved)?,
    })
  }
}
