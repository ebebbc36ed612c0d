//! The render contract shared by preview and export.
//!
//! Both faces are driven by one [`InvoiceView`], built from a snapshot, so the
//! numbers a user previews are exactly the numbers that end up in the PDF.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::business::BusinessProfile;
use crate::domain::session::Session;

use super::entities::{CustomerSnapshot, InvoiceSnapshot, InvoiceTotals};
use super::errors::InvoiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
  Preview,
  Export,
}

/// Physical page setup for the exported PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
  pub page_size: &'static str,
  pub landscape: bool,
  pub margin_top_mm: u32,
  pub margin_right_mm: u32,
  pub margin_bottom_mm: u32,
  pub margin_left_mm: u32,
}

impl PageLayout {
  /// A4 portrait, 10mm margins with a 16mm bottom margin for the footer.
  pub const fn a4_portrait() -> Self {
    Self {
      page_size: "A4",
      landscape: false,
      margin_top_mm: 10,
      margin_right_mm: 10,
      margin_bottom_mm: 16,
      margin_left_mm: 10,
    }
  }
}

impl Default for PageLayout {
  fn default() -> Self {
    Self::a4_portrait()
  }
}

/// Image bytes fetched for embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
  pub content_type: String,
  pub bytes: Vec<u8>,
}

impl ImageAsset {
  pub fn data_uri(&self) -> String {
    format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.bytes))
  }
}

/// Image sources as they should appear in the markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewImages {
  pub seal_src: Option<String>,
  pub signature_src: Option<String>,
}

impl ViewImages {
  /// Preview links straight to the stored image references.
  pub fn linked(profile: &BusinessProfile) -> Self {
    Self {
      seal_src: profile.seal_url.clone(),
      signature_src: profile.signature_url.clone(),
    }
  }

  /// Export inlines the already-loaded bytes.
  pub fn embedded(seal: Option<&ImageAsset>, signature: Option<&ImageAsset>) -> Self {
    Self {
      seal_src: seal.map(ImageAsset::data_uri),
      signature_src: signature.map(ImageAsset::data_uri),
    }
  }
}

/// Two decimal places, half away from zero, currency symbol in front and the
/// sign in front of the symbol.
pub fn format_money(symbol: &str, value: Decimal) -> String {
  let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
  if rounded.is_sign_negative() && !rounded.is_zero() {
    format!("-{}{:.2}", symbol, rounded.abs())
  } else {
    format!("{}{:.2}", symbol, rounded.abs())
  }
}

/// `Invoice-<number>.pdf` with characters unsafe in file names replaced.
pub fn export_filename(invoice_number: &str) -> String {
  let safe: String = invoice_number
    .trim()
    .chars()
    .map(|c| match c {
      '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
      c if c.is_control() => '-',
      c => c,
    })
    .collect();
  format!("Invoice-{}.pdf", safe)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessView {
  pub name: String,
  pub address: Option<String>,
  pub phone: Option<String>,
  pub email: Option<String>,
  pub seal_src: Option<String>,
  pub signature_src: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewRow {
  pub item_id: Uuid,
  pub number: usize,
  pub date: String,
  pub reference_id: String,
  pub description: String,
  pub quantity: String,
  pub unit_price: String,
  pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceView {
  pub invoice_number: String,
  pub date: String,
  pub business: BusinessView,
  pub customer: Option<CustomerSnapshot>,
  pub rows: Vec<ViewRow>,
  pub currency_symbol: String,
  pub tax_rate: String,
  pub subtotal: String,
  pub tax_amount: String,
  pub discount_amount: String,
  pub show_discount: bool,
  pub total: String,
  pub payment_instructions: Option<String>,
  pub thank_you_note: Option<String>,
  pub upi_handle: Option<String>,
  pub bank_details: Option<String>,
}

impl InvoiceView {
  pub fn build(
    snapshot: &InvoiceSnapshot,
    profile: &BusinessProfile,
    session: &Session,
    currency_symbol: &str,
    images: ViewImages,
  ) -> Self {
    let money = |value: Decimal| format_money(currency_symbol, value);

    let rows = snapshot
      .items
      .iter()
      .enumerate()
      .map(|(index, item)| ViewRow {
        item_id: item.id(),
        number: index + 1,
        date: item.date().format("%Y-%m-%d").to_string(),
        reference_id: item.reference_id().to_string(),
        description: item.description().to_string(),
        quantity: item.quantity().value().normalize().to_string(),
        unit_price: money(item.unit_price().value()),
        amount: money(item.amount()),
      })
      .collect();

    let totals = &snapshot.totals;
    let confidential = |value: &Option<String>| {
      if session.is_guest() {
        None
      } else {
        non_blank(value)
      }
    };

    Self {
      invoice_number: snapshot.invoice_number.value().to_string(),
      date: snapshot.date.format("%Y-%m-%d").to_string(),
      business: BusinessView {
        name: profile.name.clone(),
        address: non_blank(&profile.address),
        phone: non_blank(&profile.phone),
        email: non_blank(&profile.email),
        seal_src: images.seal_src,
        signature_src: images.signature_src,
      },
      customer: snapshot.customer.clone(),
      rows,
      currency_symbol: currency_symbol.to_string(),
      tax_rate: snapshot.tax_rate.value().normalize().to_string(),
      subtotal: money(totals.subtotal),
      tax_amount: money(totals.tax_amount),
      discount_amount: money(totals.discount_amount),
      show_discount: totals.discount_amount > Decimal::ZERO,
      total: money(totals.total),
      payment_instructions: non_blank(&Some(snapshot.payment_instructions.clone())),
      thank_you_note: non_blank(&Some(snapshot.thank_you_note.clone())),
      upi_handle: confidential(&profile.upi_handle),
      bank_details: confidential(&profile.bank_details),
    }
  }

  /// Check that this view says exactly what the snapshot says: same rows in
  /// the same order, numbered 1..N, with matching amounts and totals.
  pub fn verify_against(&self, snapshot: &InvoiceSnapshot) -> Result<(), InvoiceError> {
    let money = |value: Decimal| format_money(&self.currency_symbol, value);

    if self.rows.len() != snapshot.items.len() {
      return Err(InvoiceError::RenderMismatch(format!(
        "view has {} rows, document has {} items",
        self.rows.len(),
        snapshot.items.len()
      )));
    }

    for (index, (row, item)) in self.rows.iter().zip(&snapshot.items).enumerate() {
      if row.number != index + 1 || row.item_id != item.id() {
        return Err(InvoiceError::RenderMismatch(format!(
          "row {} is out of order",
          index + 1
        )));
      }
      if row.amount != money(item.amount()) {
        return Err(InvoiceError::RenderMismatch(format!(
          "row {} shows {} but amounts to {}",
          row.number,
          row.amount,
          money(item.amount())
        )));
      }
    }

    let expected =
      InvoiceTotals::recompute(&snapshot.items, &snapshot.tax_rate, &snapshot.discount)?;
    let checks = [
      ("subtotal", &self.subtotal, expected.subtotal),
      ("tax", &self.tax_amount, expected.tax_amount),
      ("discount", &self.discount_amount, expected.discount_amount),
      ("total", &self.total, expected.total),
    ];
    for (label, shown, value) in checks {
      if *shown != money(value) {
        return Err(InvoiceError::RenderMismatch(format!(
          "{} shows {} but should be {}",
          label,
          shown,
          money(value)
        )));
      }
    }

    if self.show_discount != (expected.discount_amount > Decimal::ZERO) {
      return Err(InvoiceError::RenderMismatch(
        "discount line visibility does not match the discount amount".to_string(),
      ));
    }

    Ok(())
  }
}

fn non_blank(value: &Option<String>) -> Option<String> {
  value
    .as_deref()
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .map(str::to_string)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::entities::{DocumentDefaults, InvoiceDocument, LineItem};
  use crate::domain::invoice::value_objects::{
    Discount, DiscountMode, Quantity, TaxRate, UnitPrice,
  };
  use chrono::{NaiveDate, Utc};
  use rust_decimal_macros::dec;

  fn snapshot_with(discount: Discount) -> InvoiceSnapshot {
    let defaults = DocumentDefaults {
      invoice_number_prefix: "INV-".to_string(),
      tax_rate: TaxRate::new(dec!(10)).unwrap(),
      payment_instructions: "Pay soon".to_string(),
      thank_you_note: String::new(),
    };
    let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut doc = InvoiceDocument::new(&defaults, today, Utc::now());
    let items = vec![
      LineItem::new(
        today,
        "ORD-001".to_string(),
        "Website Development".to_string(),
        Quantity::new(dec!(1)).unwrap(),
        UnitPrice::new(dec!(75000)).unwrap(),
      ),
      LineItem::new(
        today,
        "ORD-002".to_string(),
        "Logo Design".to_string(),
        Quantity::new(dec!(2)).unwrap(),
        UnitPrice::new(dec!(12500)).unwrap(),
      ),
    ];
    doc.absorb(items).unwrap();
    doc.set_discount(discount).unwrap();
    doc.snapshot(Utc::now())
  }

  fn profile() -> BusinessProfile {
    BusinessProfile {
      name: "Acme Studio".to_string(),
      upi_handle: Some("acme@upi".to_string()),
      bank_details: Some("Bank: Example\nA/C: 123".to_string()),
      seal_url: Some("https://cdn.example.com/seal.png".to_string()),
      ..BusinessProfile::placeholder()
    }
  }

  #[test]
  fn test_format_money() {
    assert_eq!(format_money("₹", dec!(105000)), "₹105000.00");
    assert_eq!(format_money("₹", dec!(0.005)), "₹0.01");
    assert_eq!(format_money("₹", dec!(-50)), "-₹50.00");
    assert_eq!(format_money("$", dec!(-0.001)), "$0.00");
  }

  #[test]
  fn test_export_filename_replaces_separators() {
    assert_eq!(export_filename("INV-42"), "Invoice-INV-42.pdf");
    assert_eq!(export_filename("2024/07\\A"), "Invoice-2024-07-A.pdf");
  }

  #[test]
  fn test_layout_margins() {
    let layout = PageLayout::a4_portrait();
    assert_eq!(layout.page_size, "A4");
    assert!(!layout.landscape);
    assert_eq!(
      (
        layout.margin_top_mm,
        layout.margin_right_mm,
        layout.margin_bottom_mm,
        layout.margin_left_mm
      ),
      (10, 10, 16, 10)
    );
  }

  #[test]
  fn test_view_numbers_rows_and_formats_totals() {
    let snapshot = snapshot_with(Discount::new(DiscountMode::Percentage, dec!(5)).unwrap());
    let view = InvoiceView::build(
      &snapshot,
      &profile(),
      &Session::authenticated(Uuid::new_v4()),
      "₹",
      ViewImages::linked(&profile()),
    );

    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[0].number, 1);
    assert_eq!(view.rows[1].number, 2);
    assert_eq!(view.rows[1].quantity, "2");
    assert_eq!(view.rows[1].amount, "₹25000.00");
    assert_eq!(view.subtotal, "₹100000.00");
    assert_eq!(view.tax_amount, "₹10000.00");
    assert_eq!(view.discount_amount, "₹5000.00");
    assert!(view.show_discount);
    assert_eq!(view.total, "₹105000.00");
    assert_eq!(view.tax_rate, "10");
    assert_eq!(view.thank_you_note, None);
    assert_eq!(
      view.business.seal_src.as_deref(),
      Some("https://cdn.example.com/seal.png")
    );
    assert_eq!(view.upi_handle.as_deref(), Some("acme@upi"));
    view.verify_against(&snapshot).unwrap();
  }

  #[test]
  fn test_discount_line_hidden_when_zero() {
    let snapshot = snapshot_with(Discount::none());
    let view = InvoiceView::build(
      &snapshot,
      &profile(),
      &Session::Guest,
      "₹",
      ViewImages::default(),
    );
    assert!(!view.show_discount);
    assert_eq!(view.total, "₹110000.00");
  }

  #[test]
  fn test_guest_view_hides_confidential_fields() {
    let snapshot = snapshot_with(Discount::none());
    let view = InvoiceView::build(
      &snapshot,
      &profile(),
      &Session::Guest,
      "₹",
      ViewImages::default(),
    );
    assert_eq!(view.upi_handle, None);
    assert_eq!(view.bank_details, None);
  }

  #[test]
  fn test_verify_detects_tampered_view() {
    let snapshot = snapshot_with(Discount::none());
    let mut view = InvoiceView::build(
      &snapshot,
      &profile(),
      &Session::Guest,
      "₹",
      ViewImages::default(),
    );
    view.total = "₹1.00".to_string();
    assert!(matches!(
      view.verify_against(&snapshot),
      Err(InvoiceError::RenderMismatch(_))
    ));

    let mut view = InvoiceView::build(
      &snapshot,
      &profile(),
      &Session::Guest,
      "₹",
      ViewImages::default(),
    );
    view.rows.swap(0, 1);
    assert!(view.verify_against(&snapshot).is_err());
  }

  #[test]
  fn test_embedded_images_are_data_uris() {
    let asset = ImageAsset {
      content_type: "image/png".to_string(),
      bytes: vec![1, 2, 3],
    };
    let images = ViewImages::embedded(Some(&asset), None);
    assert_eq!(images.seal_src.as_deref(), Some("data:image/png;base64,AQID"));
    assert_eq!(images.signature_src, None);
  }
}
