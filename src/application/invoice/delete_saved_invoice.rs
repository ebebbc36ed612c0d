use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Session;
use crate::domain::invoice::{InvoiceError, InvoiceService};

#[derive(Debug)]
pub struct DeleteSavedInvoiceCommand {
  pub session: Session,
  pub saved_invoice_id: Uuid,
}

pub struct DeleteSavedInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl DeleteSavedInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: DeleteSavedInvoiceCommand) -> Result<(), InvoiceError> {
    self
      .invoice_service
      .delete_saved_invoice(&command.session, command.saved_invoice_id)
      .await?;

    tracing::info!("Deleted saved invoice {}", command.saved_invoice_id);
    Ok(())
  }
}
