use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Session;
use crate::domain::invoice::{Customer, InvoiceError, InvoiceService};

#[derive(Debug, Clone, Serialize)]
pub struct CustomerDto {
  pub id: Uuid,
  pub name: String,
  pub email: Option<String>,
  pub address: Option<String>,
  pub phone: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<Customer> for CustomerDto {
  fn from(customer: Customer) -> Self {
    Self {
      id: customer.id,
      name: customer.name.into_inner(),
      email: customer.email.map(|e| e.into_inner()),
      address: customer.address,
      phone: customer.phone,
      created_at: customer.created_at,
      updated_at: customer.updated_at,
    }
  }
}

#[derive(Debug)]
pub struct ListCustomersCommand {
  pub session: Session,
  /// Name filter for the customer picker; blank lists everyone.
  pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListCustomersResponse {
  pub customers: Vec<CustomerDto>,
}

pub struct ListCustomersUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ListCustomersUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: ListCustomersCommand,
  ) -> Result<ListCustomersResponse, InvoiceError> {
    let customers = match command.query.as_deref() {
      Some(query) => {
        self
          .invoice_service
          .search_customers(&command.session, query)
          .await?
      }
      None => self.invoice_service.list_customers(&command.session).await?,
    };

    Ok(ListCustomersResponse {
      customers: customers.into_iter().map(CustomerDto::from).collect(),
    })
  }
}
