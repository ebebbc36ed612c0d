use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Session;
use crate::domain::invoice::{InvoiceError, InvoiceService};

#[derive(Debug)]
pub struct DeleteCustomerCommand {
  pub session: Session,
  pub customer_id: Uuid,
}

/// Saved invoices keep their own copy of the customer, so deleting one never
/// touches past documents.
pub struct DeleteCustomerUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl DeleteCustomerUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: DeleteCustomerCommand) -> Result<(), InvoiceError> {
    self
      .invoice_service
      .delete_customer(&command.session, command.customer_id)
      .await?;

    tracing::info!("Deleted customer {}", command.customer_id);
    Ok(())
  }
}
