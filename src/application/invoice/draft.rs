use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Session;
use crate::domain::business::BusinessService;
use crate::domain::invoice::{
  CustomerSnapshot, Discount, DocumentDefaults, InvoiceDocument, InvoiceError, InvoiceNumber,
  LineItem, TaxRate, ValueObjectError,
};

/// Client-held document state sent with every editing request. Anything left
/// out falls back to the document defaults; amounts and totals are always
/// recomputed server-side.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceDraft {
  pub id: Option<Uuid>,
  pub invoice_number: Option<InvoiceNumber>,
  pub date: Option<NaiveDate>,
  pub customer: Option<CustomerSnapshot>,
  #[serde(default)]
  pub items: Vec<LineItem>,
  pub tax_rate: Option<TaxRate>,
  pub discount: Option<Discount>,
  pub payment_instructions: Option<String>,
  pub thank_you_note: Option<String>,
}

impl InvoiceDraft {
  pub fn into_document(
    self,
    defaults: &DocumentDefaults,
    today: NaiveDate,
    now: DateTime<Utc>,
  ) -> Result<InvoiceDocument, ValueObjectError> {
    InvoiceDocument::restore(
      self.id.unwrap_or_else(Uuid::new_v4),
      self
        .invoice_number
        .unwrap_or_else(|| InvoiceNumber::generate(&defaults.invoice_number_prefix, now)),
      self.date.unwrap_or(today),
      self.customer,
      self.items,
      self.tax_rate.unwrap_or(defaults.tax_rate),
      self.discount.unwrap_or_default(),
      self
        .payment_instructions
        .unwrap_or_else(|| defaults.payment_instructions.clone()),
      self
        .thank_you_note
        .unwrap_or_else(|| defaults.thank_you_note.clone()),
    )
  }

  fn needs_profile(&self) -> bool {
    self.payment_instructions.is_none() || self.thank_you_note.is_none()
  }
}

/// Builds documents for a session: configured defaults, overridden by the
/// footer texts of the session's business profile.
pub struct DocumentFactory {
  defaults: DocumentDefaults,
  business_service: Arc<BusinessService>,
}

impl DocumentFactory {
  pub fn new(defaults: DocumentDefaults, business_service: Arc<BusinessService>) -> Self {
    Self {
      defaults,
      business_service,
    }
  }

  pub async fn defaults_for(&self, session: &Session) -> Result<DocumentDefaults, InvoiceError> {
    let profile = self.business_service.profile_for(session).await?;
    Ok(self.defaults.clone().with_profile(&profile))
  }

  pub async fn blank(&self, session: &Session) -> Result<InvoiceDocument, InvoiceError> {
    let defaults = self.defaults_for(session).await?;
    let now = Utc::now();
    Ok(InvoiceDocument::new(&defaults, now.date_naive(), now))
  }

  pub async fn from_draft(
    &self,
    session: &Session,
    draft: InvoiceDraft,
  ) -> Result<InvoiceDocument, InvoiceError> {
    let defaults = if draft.needs_profile() {
      self.defaults_for(session).await?
    } else {
      self.defaults.clone()
    };
    let now = Utc::now();
    Ok(draft.into_document(&defaults, now.date_naive(), now)?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::test_support::{defaults, factory_with_profiles, profile_for};
  use rust_decimal_macros::dec;

  #[test]
  fn test_draft_recomputes_amounts_and_totals() {
    let draft: InvoiceDraft = serde_json::from_str(
      r#"{
        "invoice_number": "INV-9",
        "items": [
          {"date": "2024-01-01", "description": "Website Development",
           "quantity": "1", "unit_price": "75000", "amount": "1"},
          {"date": "2024-01-01", "description": "Logo Design",
           "quantity": "2", "unit_price": "12500"}
        ],
        "discount": {"mode": "percentage", "value": "5"}
      }"#,
    )
    .unwrap();

    let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let doc = draft.into_document(&defaults(), today, Utc::now()).unwrap();

    assert_eq!(doc.invoice_number().value(), "INV-9");
    assert_eq!(doc.items()[0].amount(), dec!(75000));
    assert_eq!(doc.totals().subtotal, dec!(100000));
    assert_eq!(doc.totals().tax_amount, dec!(10000));
    assert_eq!(doc.totals().discount_amount, dec!(5000));
    assert_eq!(doc.totals().total, dec!(105000));
    assert_eq!(doc.payment_instructions(), defaults().payment_instructions);
  }

  #[test]
  fn test_draft_rejects_negative_quantity() {
    let result: Result<InvoiceDraft, _> = serde_json::from_str(
      r#"{"items": [{"date": "2024-01-01", "description": "x",
           "quantity": "-1", "unit_price": "1"}]}"#,
    );
    assert!(result.is_err());
  }

  #[tokio::test]
  async fn test_blank_document_uses_profile_footer() {
    let user = Uuid::new_v4();
    let factory = factory_with_profiles(vec![profile_for(user)]);

    let doc = factory.blank(&Session::authenticated(user)).await.unwrap();
    assert_eq!(doc.payment_instructions(), "Pay to Acme within 7 days");
    assert!(doc.invoice_number().value().starts_with("INV-"));
    assert!(doc.items().is_empty());

    let guest_doc = factory.blank(&Session::Guest).await.unwrap();
    assert_eq!(guest_doc.payment_instructions(), defaults().payment_instructions);
  }
}
