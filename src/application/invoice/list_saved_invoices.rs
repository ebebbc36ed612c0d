use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Session;
use crate::domain::invoice::{InvoiceError, InvoiceService, SavedInvoice};

#[derive(Debug)]
pub struct ListSavedInvoicesCommand {
  pub session: Session,
}

#[derive(Debug, Serialize)]
pub struct SavedInvoiceSummaryDto {
  pub id: Uuid,
  pub invoice_number: String,
  pub date: NaiveDate,
  pub customer_name: Option<String>,
  pub item_count: usize,
  pub total: Decimal,
  pub created_at: DateTime<Utc>,
}

impl From<&SavedInvoice> for SavedInvoiceSummaryDto {
  fn from(invoice: &SavedInvoice) -> Self {
    Self {
      id: invoice.id,
      invoice_number: invoice.invoice_number.value().to_string(),
      date: invoice.date,
      customer_name: invoice.customer.as_ref().map(|c| c.name.clone()),
      item_count: invoice.items.len(),
      total: invoice.totals.total,
      created_at: invoice.created_at,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ListSavedInvoicesResponse {
  pub invoices: Vec<SavedInvoiceSummaryDto>,
}

/// Newest first.
pub struct ListSavedInvoicesUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ListSavedInvoicesUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: ListSavedInvoicesCommand,
  ) -> Result<ListSavedInvoicesResponse, InvoiceError> {
    let invoices = self
      .invoice_service
      .list_saved_invoices(&command.session)
      .await?;

    Ok(ListSavedInvoicesResponse {
      invoices: invoices.iter().map(SavedInvoiceSummaryDto::from).collect(),
    })
  }
}
