use chrono::Utc;
use futures_util::future::try_join;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::Session;
use crate::domain::business::BusinessService;
use crate::domain::invoice::{
  AssetLoader, ImageAsset, InvoiceDocument, InvoiceError, InvoiceRenderer, InvoiceSnapshot,
  InvoiceView, PageLayout, PdfGenerator, RenderMode, ViewImages, export_filename,
};

/// Export request. The snapshot is taken when the command is created, so
/// edits made to the live document afterwards never reach the PDF.
#[derive(Debug, Clone)]
pub struct ExportInvoiceCommand {
  pub session: Session,
  pub snapshot: InvoiceSnapshot,
}

impl ExportInvoiceCommand {
  pub fn capture(session: Session, document: &InvoiceDocument) -> Self {
    Self {
      session,
      snapshot: document.snapshot(Utc::now()),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ExportInvoiceResponse {
  pub invoice_number: String,
  pub filename: String,
  #[serde(skip)]
  pub pdf: Vec<u8>,
}

/// Counts exports in flight. The count drops when the guard goes out of
/// scope, whichever way the export ended.
struct PreparingGuard {
  counter: Arc<AtomicUsize>,
}

impl PreparingGuard {
  fn enter(counter: &Arc<AtomicUsize>) -> Self {
    counter.fetch_add(1, Ordering::SeqCst);
    Self {
      counter: counter.clone(),
    }
  }
}

impl Drop for PreparingGuard {
  fn drop(&mut self) {
    self.counter.fetch_sub(1, Ordering::SeqCst);
  }
}

pub struct ExportInvoiceUseCase {
  business_service: Arc<BusinessService>,
  renderer: Arc<dyn InvoiceRenderer>,
  pdf_generator: Arc<dyn PdfGenerator>,
  asset_loader: Arc<dyn AssetLoader>,
  currency_symbol: String,
  layout: PageLayout,
  preparing: Arc<AtomicUsize>,
}

impl ExportInvoiceUseCase {
  pub fn new(
    business_service: Arc<BusinessService>,
    renderer: Arc<dyn InvoiceRenderer>,
    pdf_generator: Arc<dyn PdfGenerator>,
    asset_loader: Arc<dyn AssetLoader>,
    currency_symbol: String,
  ) -> Self {
    Self {
      business_service,
      renderer,
      pdf_generator,
      asset_loader,
      currency_symbol,
      layout: PageLayout::a4_portrait(),
      preparing: Arc::new(AtomicUsize::new(0)),
    }
  }

  /// Number of exports currently being prepared.
  pub fn preparing_count(&self) -> usize {
    self.preparing.load(Ordering::SeqCst)
  }

  pub async fn execute(
    &self,
    command: ExportInvoiceCommand,
  ) -> Result<ExportInvoiceResponse, InvoiceError> {
    let _preparing = PreparingGuard::enter(&self.preparing);
    let snapshot = &command.snapshot;
    let invoice_number = snapshot.invoice_number.value().to_string();

    let profile = self.business_service.profile_for(&command.session).await?;

    // Every referenced image must be in hand before anything is rendered.
    let (seal, signature) = try_join(
      self.load_optional(profile.seal_url.as_deref()),
      self.load_optional(profile.signature_url.as_deref()),
    )
    .await
    .inspect_err(|e| tracing::warn!("Export of invoice {} aborted: {}", invoice_number, e))?;

    let view = InvoiceView::build(
      snapshot,
      &profile,
      &command.session,
      &self.currency_symbol,
      ViewImages::embedded(seal.as_ref(), signature.as_ref()),
    );
    view.verify_against(snapshot)?;

    let html = self.renderer.render(&view, RenderMode::Export)?;
    let pdf = self.pdf_generator.generate_pdf(&html, &self.layout).await?;

    tracing::info!(
      "Exported invoice {} ({} items, total {}, {} bytes)",
      invoice_number,
      snapshot.items.len(),
      view.total,
      pdf.len()
    );

    Ok(ExportInvoiceResponse {
      filename: export_filename(&invoice_number),
      invoice_number,
      pdf,
    })
  }

  /// Runs the export and reports the outcome to `on_complete` exactly once,
  /// after the preparing state has been cleared.
  pub async fn execute_with_callback<F>(
    &self,
    command: ExportInvoiceCommand,
    on_complete: F,
  ) -> Result<ExportInvoiceResponse, InvoiceError>
  where
    F: FnOnce(&Result<ExportInvoiceResponse, InvoiceError>),
  {
    let result = self.execute(command).await;
    on_complete(&result);
    result
  }

  async fn load_optional(&self, reference: Option<&str>) -> Result<Option<ImageAsset>, InvoiceError> {
    match reference.map(str::trim).filter(|r| !r.is_empty()) {
      Some(reference) => self.asset_loader.load(reference).await.map(Some),
      None => Ok(None),
    }
  }
}
