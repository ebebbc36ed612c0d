use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Session;
use crate::domain::invoice::{InvoiceError, InvoiceService, SavedInvoice};

#[derive(Debug)]
pub struct GetSavedInvoiceCommand {
  pub session: Session,
  pub saved_invoice_id: Uuid,
}

pub struct GetSavedInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetSavedInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: GetSavedInvoiceCommand) -> Result<SavedInvoice, InvoiceError> {
    self
      .invoice_service
      .get_saved_invoice(&command.session, command.saved_invoice_id)
      .await
  }
}
