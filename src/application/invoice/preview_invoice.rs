use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::Session;
use crate::domain::business::BusinessService;
use crate::domain::invoice::{InvoiceError, InvoiceRenderer, InvoiceView, RenderMode, ViewImages};

use super::draft::{DocumentFactory, InvoiceDraft};

#[derive(Debug)]
pub struct PreviewInvoiceCommand {
  pub session: Session,
  pub draft: InvoiceDraft,
}

#[derive(Debug, Serialize)]
pub struct PreviewInvoiceResponse {
  pub invoice_number: String,
  pub html: String,
}

/// Renders the on-screen preview. Images are linked, not embedded.
pub struct PreviewInvoiceUseCase {
  factory: Arc<DocumentFactory>,
  business_service: Arc<BusinessService>,
  renderer: Arc<dyn InvoiceRenderer>,
  currency_symbol: String,
}

impl PreviewInvoiceUseCase {
  pub fn new(
    factory: Arc<DocumentFactory>,
    business_service: Arc<BusinessService>,
    renderer: Arc<dyn InvoiceRenderer>,
    currency_symbol: String,
  ) -> Self {
    Self {
      factory,
      business_service,
      renderer,
      currency_symbol,
    }
  }

  pub async fn execute(
    &self,
    command: PreviewInvoiceCommand,
  ) -> Result<PreviewInvoiceResponse, InvoiceError> {
    let document = self
      .factory
      .from_draft(&command.session, command.draft)
      .await?;
    let snapshot = document.snapshot(Utc::now());
    let profile = self.business_service.profile_for(&command.session).await?;

    let view = InvoiceView::build(
      &snapshot,
      &profile,
      &command.session,
      &self.currency_symbol,
      ViewImages::linked(&profile),
    );
    view.verify_against(&snapshot)?;

    let html = self.renderer.render(&view, RenderMode::Preview)?;
    Ok(PreviewInvoiceResponse {
      invoice_number: view.invoice_number,
      html,
    })
  }
}
