use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Session;
use crate::domain::invoice::{InvoiceError, InvoiceService};

use super::create_customer::CustomerFields;
use super::list_customers::CustomerDto;

#[derive(Debug)]
pub struct UpdateCustomerCommand {
  pub session: Session,
  pub customer_id: Uuid,
  pub fields: CustomerFields,
}

pub struct UpdateCustomerUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl UpdateCustomerUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: UpdateCustomerCommand) -> Result<CustomerDto, InvoiceError> {
    let data = command.fields.validate()?;
    let customer = self
      .invoice_service
      .update_customer(&command.session, command.customer_id, data)
      .await?;

    Ok(customer.into())
  }
}
