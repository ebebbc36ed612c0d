//! Fakes and fixtures shared by use case tests.

use async_trait::async_trait;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::application::invoice::DocumentFactory;
use crate::domain::business::services::fakes::InMemoryProfiles;
use crate::domain::business::{BusinessProfile, BusinessService};
use crate::domain::invoice::{
  AssetLoader, DocumentDefaults, ImageAsset, InvoiceError, InvoiceRenderer, InvoiceView,
  PageLayout, PdfGenerator, RenderMode, TaxRate,
};

pub fn defaults() -> DocumentDefaults {
  DocumentDefaults {
    invoice_number_prefix: "INV-".to_string(),
    tax_rate: TaxRate::new(dec!(10)).unwrap(),
    payment_instructions: "Payment due within 30 days. Thank you for your business!".to_string(),
    thank_you_note: "Thank you for choosing our services.".to_string(),
  }
}

pub fn profile_for(user_id: Uuid) -> BusinessProfile {
  BusinessProfile {
    owner_id: Some(user_id),
    name: "Acme Studio".to_string(),
    address: Some("42 Market Road".to_string()),
    payment_instructions: Some("Pay to Acme within 7 days".to_string()),
    seal_url: Some("seal.png".to_string()),
    signature_url: Some("signature.png".to_string()),
    upi_handle: Some("acme@upi".to_string()),
    bank_details: Some("A/C 0001".to_string()),
    ..BusinessProfile::placeholder()
  }
}

pub fn business_service_with(profiles: Vec<BusinessProfile>) -> Arc<BusinessService> {
  let repo = InMemoryProfiles::default();
  {
    let mut map = repo.profiles.lock().unwrap();
    for profile in profiles {
      if let Some(owner) = profile.owner_id {
        map.insert(owner, profile);
      }
    }
  }
  Arc::new(BusinessService::new(Arc::new(repo)))
}

pub fn factory_with_profiles(profiles: Vec<BusinessProfile>) -> DocumentFactory {
  DocumentFactory::new(defaults(), business_service_with(profiles))
}

/// Plain-text rendering of the figures a reader would check.
pub struct TextRenderer;

impl InvoiceRenderer for TextRenderer {
  fn render(&self, view: &InvoiceView, mode: RenderMode) -> Result<String, InvoiceError> {
    let mut out = format!("[{:?}] {}\n", mode, view.invoice_number);
    for row in &view.rows {
      out.push_str(&format!("{} {} {}\n", row.number, row.description, row.amount));
    }
    out.push_str(&format!(
      "subtotal={} tax={} discount={} total={}\n",
      view.subtotal, view.tax_amount, view.discount_amount, view.total
    ));
    if let Some(seal) = &view.business.seal_src {
      out.push_str(&format!("seal={}\n", seal));
    }
    if let Some(bank) = &view.bank_details {
      out.push_str(&format!("bank={}\n", bank));
    }
    Ok(out)
  }
}

/// Wraps the HTML so tests can read back exactly what was converted.
#[derive(Default)]
pub struct EchoPdfGenerator {
  pub layouts: Mutex<Vec<PageLayout>>,
}

#[async_trait]
impl PdfGenerator for EchoPdfGenerator {
  async fn generate_pdf(&self, html: &str, layout: &PageLayout) -> Result<Vec<u8>, InvoiceError> {
    self.layouts.lock().unwrap().push(*layout);
    Ok(format!("%PDF-fake\n{}", html).into_bytes())
  }
}

pub struct FailingPdfGenerator;

#[async_trait]
impl PdfGenerator for FailingPdfGenerator {
  async fn generate_pdf(&self, _html: &str, _layout: &PageLayout) -> Result<Vec<u8>, InvoiceError> {
    Err(InvoiceError::PdfGenerationFailed("converter crashed".to_string()))
  }
}

/// Serves images from memory; unknown references fail to load.
#[derive(Default)]
pub struct InMemoryAssets {
  pub assets: HashMap<String, ImageAsset>,
  pub requested: Mutex<Vec<String>>,
}

impl InMemoryAssets {
  pub fn with(references: &[&str]) -> Self {
    let assets = references
      .iter()
      .map(|r| {
        (
          r.to_string(),
          ImageAsset {
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
          },
        )
      })
      .collect();
    Self {
      assets,
      requested: Mutex::new(Vec::new()),
    }
  }
}

#[async_trait]
impl AssetLoader for InMemoryAssets {
  async fn load(&self, url: &str) -> Result<ImageAsset, InvoiceError> {
    self.requested.lock().unwrap().push(url.to_string());
    self
      .assets
      .get(url)
      .cloned()
      .ok_or_else(|| InvoiceError::AssetLoadFailed {
        url: url.to_string(),
        reason: "not found".to_string(),
      })
  }
}
