use serde::Deserialize;
use std::sync::Arc;

use crate::domain::Session;
use crate::domain::invoice::{
  CustomerData, CustomerEmail, CustomerName, InvoiceError, InvoiceService,
};

use super::list_customers::CustomerDto;

/// Customer fields as submitted by a form or JSON body.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerFields {
  pub name: String,
  pub email: Option<String>,
  pub address: Option<String>,
  pub phone: Option<String>,
}

impl CustomerFields {
  pub fn validate(self) -> Result<CustomerData, InvoiceError> {
    Ok(CustomerData {
      name: CustomerName::new(self.name)?,
      email: CustomerEmail::parse_optional(self.email)?,
      address: self.address,
      phone: self.phone,
    })
  }
}

#[derive(Debug)]
pub struct CreateCustomerCommand {
  pub session: Session,
  pub fields: CustomerFields,
}

pub struct CreateCustomerUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl CreateCustomerUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: CreateCustomerCommand) -> Result<CustomerDto, InvoiceError> {
    let data = command.fields.validate()?;
    let customer = self
      .invoice_service
      .create_customer(&command.session, data)
      .await?;

    tracing::info!("Created customer {}", customer.id);
    Ok(customer.into())
  }
}
