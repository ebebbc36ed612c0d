use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Session;
use crate::domain::business::BusinessService;
use crate::domain::invoice::{InvoiceError, InvoiceService};

use super::draft::{DocumentFactory, InvoiceDraft};

#[derive(Debug)]
pub struct SaveInvoiceCommand {
  pub session: Session,
  pub draft: InvoiceDraft,
}

#[derive(Debug, Serialize)]
pub struct SaveInvoiceResponse {
  pub saved_invoice_id: Uuid,
  pub invoice_number: String,
  pub total: Decimal,
  pub created_at: DateTime<Utc>,
}

/// Stores the current document as a new, immutable record. Saving twice
/// creates two records.
pub struct SaveInvoiceUseCase {
  factory: Arc<DocumentFactory>,
  invoice_service: Arc<InvoiceService>,
  business_service: Arc<BusinessService>,
}

impl SaveInvoiceUseCase {
  pub fn new(
    factory: Arc<DocumentFactory>,
    invoice_service: Arc<InvoiceService>,
    business_service: Arc<BusinessService>,
  ) -> Self {
    Self {
      factory,
      invoice_service,
      business_service,
    }
  }

  pub async fn execute(
    &self,
    command: SaveInvoiceCommand,
  ) -> Result<SaveInvoiceResponse, InvoiceError> {
    if command.session.is_guest() {
      return Err(InvoiceError::AuthenticationRequired(
        "sign in to save invoices".to_string(),
      ));
    }

    let document = self
      .factory
      .from_draft(&command.session, command.draft)
      .await?;
    let snapshot = document.snapshot(Utc::now());
    let profile = self.business_service.profile_for(&command.session).await?;

    let saved = self
      .invoice_service
      .save_invoice(&command.session, &snapshot, &profile)
      .await?;

    tracing::info!(
      "Saved invoice {} as record {} ({} items)",
      saved.invoice_number.value(),
      saved.id,
      saved.items.len()
    );

    Ok(SaveInvoiceResponse {
      saved_invoice_id: saved.id,
      invoice_number: saved.invoice_number.value().to_string(),
      total: saved.totals.total,
      created_at: saved.created_at,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::test_support::{business_service_with, factory_with_profiles, profile_for};
  use crate::domain::invoice::services::fakes::{InMemoryCustomers, InMemorySavedInvoices};
  use rust_decimal_macros::dec;

  fn setup(user: Uuid) -> (SaveInvoiceUseCase, Arc<InMemorySavedInvoices>) {
    let saved = Arc::new(InMemorySavedInvoices::default());
    let service = Arc::new(InvoiceService::new(
      saved.clone(),
      Arc::new(InMemoryCustomers::default()),
    ));
    let use_case = SaveInvoiceUseCase::new(
      Arc::new(factory_with_profiles(vec![profile_for(user)])),
      service,
      business_service_with(vec![profile_for(user)]),
    );
    (use_case, saved)
  }

  fn draft() -> InvoiceDraft {
    serde_json::from_str(
      r#"{"invoice_number": "INV-1", "items": [
        {"date": "2024-01-01", "description": "Consulting", "quantity": "4", "unit_price": "7500"}]}"#,
    )
    .unwrap()
  }

  #[tokio::test]
  async fn test_save_twice_creates_two_records() {
    let user = Uuid::new_v4();
    let (use_case, saved) = setup(user);
    let session = Session::authenticated(user);

    let first = use_case
      .execute(SaveInvoiceCommand {
        session,
        draft: draft(),
      })
      .await
      .unwrap();
    let second = use_case
      .execute(SaveInvoiceCommand {
        session,
        draft: draft(),
      })
      .await
      .unwrap();

    assert_ne!(first.saved_invoice_id, second.saved_invoice_id);
    assert_eq!(first.total, dec!(33000));

    let records = saved.records.lock().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].business_name, "Acme Studio");
    assert_eq!(records[0].business_address.as_deref(), Some("42 Market Road"));
  }

  #[tokio::test]
  async fn test_guest_save_is_rejected() {
    let (use_case, saved) = setup(Uuid::new_v4());
    let result = use_case
      .execute(SaveInvoiceCommand {
        session: Session::Guest,
        draft: draft(),
      })
      .await;

    assert!(matches!(result, Err(InvoiceError::AuthenticationRequired(_))));
    assert!(saved.records.lock().unwrap().is_empty());
  }
}
