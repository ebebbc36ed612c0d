use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Session;
use crate::domain::invoice::{InvoiceError, InvoiceService};

use super::list_customers::CustomerDto;

#[derive(Debug)]
pub struct GetCustomerCommand {
  pub session: Session,
  pub customer_id: Uuid,
}

pub struct GetCustomerUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetCustomerUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: GetCustomerCommand) -> Result<CustomerDto, InvoiceError> {
    let customer = self
      .invoice_service
      .get_customer(&command.session, command.customer_id)
      .await?;
    Ok(customer.into())
  }
}
