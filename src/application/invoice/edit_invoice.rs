use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Session;
use crate::domain::invoice::{
  CustomerSnapshot, Discount, DiscountMode, InvoiceDocument, InvoiceError, InvoiceNumber,
  InvoiceService, LineItemPatch, TaxRate,
};

use super::draft::{DocumentFactory, InvoiceDraft};

/// One user edit. Edits are applied in order; the first failing edit rejects
/// the whole request and the caller keeps its previous draft.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum InvoiceEdit {
  SetInvoiceNumber { invoice_number: String },
  SetDate { date: NaiveDate },
  SetCustomer { customer: Option<CustomerSnapshot> },
  SelectCustomer { customer_id: Uuid },
  SetTaxRate { tax_rate: Decimal },
  SetDiscount { mode: DiscountMode, value: Decimal },
  SetPaymentInstructions { text: String },
  SetThankYouNote { text: String },
  AddBlankItem,
  UpdateItem { item_id: Uuid, patch: LineItemPatch },
  RemoveItem { item_id: Uuid },
}

#[derive(Debug)]
pub struct EditInvoiceCommand {
  pub session: Session,
  pub draft: InvoiceDraft,
  pub edits: Vec<InvoiceEdit>,
}

#[derive(Debug, Serialize)]
pub struct EditInvoiceResponse {
  pub document: InvoiceDocument,
}

/// Applies edits to a draft and returns the recomputed document. With no
/// edits this is a plain totals recompute.
pub struct EditInvoiceUseCase {
  factory: Arc<DocumentFactory>,
  invoice_service: Arc<InvoiceService>,
}

impl EditInvoiceUseCase {
  pub fn new(factory: Arc<DocumentFactory>, invoice_service: Arc<InvoiceService>) -> Self {
    Self {
      factory,
      invoice_service,
    }
  }

  pub async fn execute(
    &self,
    command: EditInvoiceCommand,
  ) -> Result<EditInvoiceResponse, InvoiceError> {
    let mut document = self
      .factory
      .from_draft(&command.session, command.draft)
      .await?;

    for edit in command.edits {
      self.apply(&command.session, &mut document, edit).await?;
    }

    Ok(EditInvoiceResponse { document })
  }

  async fn apply(
    &self,
    session: &Session,
    document: &mut InvoiceDocument,
    edit: InvoiceEdit,
  ) -> Result<(), InvoiceError> {
    match edit {
      InvoiceEdit::SetInvoiceNumber { invoice_number } => {
        document.set_invoice_number(InvoiceNumber::new(invoice_number)?);
      }
      InvoiceEdit::SetDate { date } => document.set_date(date),
      InvoiceEdit::SetCustomer { customer } => document.set_customer(customer),
      InvoiceEdit::SelectCustomer { customer_id } => {
        let customer = self.invoice_service.get_customer(session, customer_id).await?;
        document.set_customer(Some(CustomerSnapshot::from(&customer)));
      }
      InvoiceEdit::SetTaxRate { tax_rate } => document.set_tax_rate(TaxRate::new(tax_rate)?)?,
      InvoiceEdit::SetDiscount { mode, value } => {
        document.set_discount(Discount::new(mode, value)?)?;
      }
      InvoiceEdit::SetPaymentInstructions { text } => document.set_payment_instructions(text),
      InvoiceEdit::SetThankYouNote { text } => document.set_thank_you_note(text),
      InvoiceEdit::AddBlankItem => {
        document.add_blank_item(Utc::now().date_naive());
      }
      InvoiceEdit::UpdateItem { item_id, patch } => {
        document.update_item(item_id, patch)?;
      }
      InvoiceEdit::RemoveItem { item_id } => {
        document.remove_item(item_id)?;
      }
    }
    Ok(())
  }
}
