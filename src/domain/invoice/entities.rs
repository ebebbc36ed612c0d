use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::business::BusinessProfile;

use super::errors::InvoiceError;
use super::import::ImportError;
use super::ports::ItemSource;
use super::value_objects::{
  CustomerEmail, CustomerName, Discount, InvoiceNumber, Quantity, TaxRate, UnitPrice,
  ValueObjectError,
};

// Customer - Reusable client information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
  pub id: Uuid,
  pub owner_id: Uuid,
  pub name: CustomerName,
  pub email: Option<CustomerEmail>,
  pub address: Option<String>,
  pub phone: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Customer {
  pub fn new(
    owner_id: Uuid,
    name: CustomerName,
    email: Option<CustomerEmail>,
    address: Option<String>,
    phone: Option<String>,
  ) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      owner_id,
      name,
      email,
      address: non_blank(address),
      phone: non_blank(phone),
      created_at: now,
      updated_at: now,
    }
  }

  pub fn update(
    &mut self,
    name: CustomerName,
    email: Option<CustomerEmail>,
    address: Option<String>,
    phone: Option<String>,
  ) {
    self.name = name;
    self.email = email;
    self.address = non_blank(address);
    self.phone = non_blank(phone);
    self.updated_at = Utc::now();
  }
}

fn non_blank(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
}

/// Customer details as printed on an invoice. `customer_id` is `None` for
/// inline (guest) customers that were never saved.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomerSnapshot {
  #[serde(default)]
  pub customer_id: Option<Uuid>,
  pub name: String,
  #[serde(default)]
  pub email: Option<String>,
  #[serde(default)]
  pub address: Option<String>,
  #[serde(default)]
  pub phone: Option<String>,
}

impl From<&Customer> for CustomerSnapshot {
  fn from(customer: &Customer) -> Self {
    Self {
      customer_id: Some(customer.id),
      name: customer.name.value().to_string(),
      email: customer.email.as_ref().map(|e| e.value().to_string()),
      address: customer.address.clone(),
      phone: customer.phone.clone(),
    }
  }
}

/// One billable row. `amount` is cached and only ever written together with
/// quantity and unit price, so it always equals `quantity * unit_price`.
/// Both factors are bounded (see [`Quantity::MAX`] and [`UnitPrice::MAX`]),
/// so the product cannot overflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LineItemRecord")]
pub struct LineItem {
  id: Uuid,
  date: NaiveDate,
  reference_id: String,
  description: String,
  quantity: Quantity,
  unit_price: UnitPrice,
  amount: Decimal,
}

/// Wire shape of a line item; any incoming `amount` is ignored.
#[derive(Deserialize)]
struct LineItemRecord {
  #[serde(default = "Uuid::new_v4")]
  id: Uuid,
  date: NaiveDate,
  #[serde(default)]
  reference_id: String,
  #[serde(default)]
  description: String,
  quantity: Quantity,
  unit_price: UnitPrice,
}

impl From<LineItemRecord> for LineItem {
  fn from(record: LineItemRecord) -> Self {
    let mut item = LineItem::new(
      record.date,
      record.reference_id,
      record.description,
      record.quantity,
      record.unit_price,
    );
    item.id = record.id;
    item
  }
}

/// Partial update for a line item. `None` leaves the field untouched; zero is a
/// value like any other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LineItemPatch {
  pub date: Option<NaiveDate>,
  pub reference_id: Option<String>,
  pub description: Option<String>,
  pub quantity: Option<Quantity>,
  pub unit_price: Option<UnitPrice>,
}

impl LineItem {
  pub fn new(
    date: NaiveDate,
    reference_id: String,
    description: String,
    quantity: Quantity,
    unit_price: UnitPrice,
  ) -> Self {
    Self {
      id: Uuid::new_v4(),
      date,
      reference_id: reference_id.trim().to_string(),
      description: description.trim().to_string(),
      quantity,
      unit_price,
      amount: quantity.value() * unit_price.value(),
    }
  }

  /// Manually added row: empty description, one unit at zero price.
  pub fn blank(date: NaiveDate) -> Self {
    Self::new(
      date,
      String::new(),
      String::new(),
      Quantity::ONE,
      UnitPrice::ZERO,
    )
  }

  pub fn apply(&mut self, patch: LineItemPatch) {
    if let Some(date) = patch.date {
      self.date = date;
    }
    if let Some(reference_id) = patch.reference_id {
      self.reference_id = reference_id.trim().to_string();
    }
    if let Some(description) = patch.description {
      self.description = description.trim().to_string();
    }
    if patch.quantity.is_some() || patch.unit_price.is_some() {
      self.quantity = patch.quantity.unwrap_or(self.quantity);
      self.unit_price = patch.unit_price.unwrap_or(self.unit_price);
      self.amount = self.quantity.value() * self.unit_price.value();
    }
  }

  pub fn id(&self) -> Uuid {
    self.id
  }

  pub fn date(&self) -> NaiveDate {
    self.date
  }

  pub fn reference_id(&self) -> &str {
    &self.reference_id
  }

  pub fn description(&self) -> &str {
    &self.description
  }

  pub fn quantity(&self) -> Quantity {
    self.quantity
  }

  pub fn unit_price(&self) -> UnitPrice {
    self.unit_price
  }

  pub fn amount(&self) -> Decimal {
    self.amount
  }
}

// Invoice Totals - derived, never edited directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvoiceTotals {
  pub subtotal: Decimal,
  pub tax_amount: Decimal,
  pub discount_amount: Decimal,
  pub total: Decimal,
}

impl InvoiceTotals {
  /// Pure derivation from the four inputs. No sign checks: a fixed discount
  /// larger than subtotal plus tax yields a negative total. Fails only when a
  /// figure leaves the range of `Decimal`.
  pub fn recompute(
    items: &[LineItem],
    tax_rate: &TaxRate,
    discount: &Discount,
  ) -> Result<Self, ValueObjectError> {
    let subtotal = items
      .iter()
      .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.amount()))
      .ok_or_else(|| out_of_range("subtotal"))?;
    let tax_amount = subtotal
      .checked_mul(tax_rate.as_multiplier())
      .ok_or_else(|| out_of_range("tax"))?;
    let discount_amount = discount.amount_for(subtotal)?;
    let total = subtotal
      .checked_add(tax_amount)
      .and_then(|gross| gross.checked_sub(discount_amount))
      .ok_or_else(|| out_of_range("total"))?;

    Ok(Self {
      subtotal,
      tax_amount,
      discount_amount,
      total,
    })
  }
}

fn out_of_range(figure: &str) -> ValueObjectError {
  ValueObjectError::AmountOutOfRange(format!("the invoice {} is too large", figure))
}

/// Values a fresh document starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDefaults {
  pub invoice_number_prefix: String,
  pub tax_rate: TaxRate,
  pub payment_instructions: String,
  pub thank_you_note: String,
}

impl DocumentDefaults {
  /// Footer texts from the business profile win when they are filled in.
  pub fn with_profile(mut self, profile: &BusinessProfile) -> Self {
    if let Some(text) = profile.payment_instructions.as_deref() {
      if !text.trim().is_empty() {
        self.payment_instructions = text.to_string();
      }
    }
    if let Some(text) = profile.thank_you_note.as_deref() {
      if !text.trim().is_empty() {
        self.thank_you_note = text.to_string();
      }
    }
    self
  }
}

// Invoice Document - the aggregate being edited
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceDocument {
  id: Uuid,
  invoice_number: InvoiceNumber,
  date: NaiveDate,
  customer: Option<CustomerSnapshot>,
  items: Vec<LineItem>,
  tax_rate: TaxRate,
  discount: Discount,
  totals: InvoiceTotals,
  payment_instructions: String,
  thank_you_note: String,
}

impl InvoiceDocument {
  pub fn new(defaults: &DocumentDefaults, today: NaiveDate, now: DateTime<Utc>) -> Self {
    Self {
      id: Uuid::new_v4(),
      invoice_number: InvoiceNumber::generate(&defaults.invoice_number_prefix, now),
      date: today,
      customer: None,
      items: Vec::new(),
      tax_rate: defaults.tax_rate,
      discount: Discount::none(),
      totals: InvoiceTotals::default(),
      payment_instructions: defaults.payment_instructions.clone(),
      thank_you_note: defaults.thank_you_note.clone(),
    }
  }

  /// Rebuild a document from previously captured parts. Totals are always
  /// recomputed, never trusted.
  #[allow(clippy::too_many_arguments)]
  pub fn restore(
    id: Uuid,
    invoice_number: InvoiceNumber,
    date: NaiveDate,
    customer: Option<CustomerSnapshot>,
    items: Vec<LineItem>,
    tax_rate: TaxRate,
    discount: Discount,
    payment_instructions: String,
    thank_you_note: String,
  ) -> Result<Self, ValueObjectError> {
    let totals = InvoiceTotals::recompute(&items, &tax_rate, &discount)?;
    Ok(Self {
      id,
      invoice_number,
      date,
      customer,
      items,
      tax_rate,
      discount,
      totals,
      payment_instructions,
      thank_you_note,
    })
  }

  /// Open a saved record as a new editable document.
  pub fn reopen(saved: &SavedInvoice) -> Result<Self, ValueObjectError> {
    let items = saved
      .items
      .iter()
      .map(|item| {
        LineItem::new(
          item.date,
          item.reference_id.clone(),
          item.description.clone(),
          item.quantity,
          item.unit_price,
        )
      })
      .collect();

    Self::restore(
      Uuid::new_v4(),
      saved.invoice_number.clone(),
      saved.date,
      saved.customer.clone(),
      items,
      saved.tax_rate,
      saved.discount,
      saved.payment_instructions.clone(),
      saved.thank_you_note.clone(),
    )
  }

  fn recompute(&mut self) -> Result<(), ValueObjectError> {
    self.totals = InvoiceTotals::recompute(&self.items, &self.tax_rate, &self.discount)?;
    Ok(())
  }

  pub fn id(&self) -> Uuid {
    self.id
  }

  pub fn invoice_number(&self) -> &InvoiceNumber {
    &self.invoice_number
  }

  pub fn date(&self) -> NaiveDate {
    self.date
  }

  pub fn customer(&self) -> Option<&CustomerSnapshot> {
    self.customer.as_ref()
  }

  pub fn items(&self) -> &[LineItem] {
    &self.items
  }

  pub fn tax_rate(&self) -> TaxRate {
    self.tax_rate
  }

  pub fn discount(&self) -> Discount {
    self.discount
  }

  pub fn totals(&self) -> &InvoiceTotals {
    &self.totals
  }

  pub fn payment_instructions(&self) -> &str {
    &self.payment_instructions
  }

  pub fn thank_you_note(&self) -> &str {
    &self.thank_you_note
  }

  pub fn set_invoice_number(&mut self, invoice_number: InvoiceNumber) {
    self.invoice_number = invoice_number;
  }

  pub fn set_date(&mut self, date: NaiveDate) {
    self.date = date;
  }

  pub fn set_customer(&mut self, customer: Option<CustomerSnapshot>) {
    self.customer = customer;
  }

  pub fn set_tax_rate(&mut self, tax_rate: TaxRate) -> Result<(), ValueObjectError> {
    self.totals = InvoiceTotals::recompute(&self.items, &tax_rate, &self.discount)?;
    self.tax_rate = tax_rate;
    Ok(())
  }

  pub fn set_discount(&mut self, discount: Discount) -> Result<(), ValueObjectError> {
    self.totals = InvoiceTotals::recompute(&self.items, &self.tax_rate, &discount)?;
    self.discount = discount;
    Ok(())
  }

  pub fn set_payment_instructions(&mut self, text: String) {
    self.payment_instructions = text;
  }

  pub fn set_thank_you_note(&mut self, text: String) {
    self.thank_you_note = text;
  }

  pub fn add_blank_item(&mut self, today: NaiveDate) -> Uuid {
    let item = LineItem::blank(today);
    let id = item.id;
    // A zero amount leaves every total unchanged.
    self.items.push(item);
    id
  }

  pub fn add_item(&mut self, item: LineItem) -> Result<Uuid, ValueObjectError> {
    let id = item.id;
    self.items.push(item);
    if let Err(e) = self.recompute() {
      self.items.pop();
      return Err(e);
    }
    Ok(id)
  }

  pub fn update_item(&mut self, id: Uuid, patch: LineItemPatch) -> Result<&LineItem, InvoiceError> {
    let index = self
      .items
      .iter()
      .position(|item| item.id == id)
      .ok_or(InvoiceError::LineItemNotFound(id))?;

    let previous = self.items[index].clone();
    self.items[index].apply(patch);
    if let Err(e) = self.recompute() {
      self.items[index] = previous;
      return Err(e.into());
    }
    Ok(&self.items[index])
  }

  pub fn remove_item(&mut self, id: Uuid) -> Result<LineItem, InvoiceError> {
    let index = self
      .items
      .iter()
      .position(|item| item.id == id)
      .ok_or(InvoiceError::LineItemNotFound(id))?;

    let removed = self.items.remove(index);
    if let Err(e) = self.recompute() {
      self.items.insert(index, removed);
      return Err(e.into());
    }
    Ok(removed)
  }

  /// Append a fully materialized batch, preserving its order. All or
  /// nothing: when the new totals are out of range the batch is dropped.
  pub fn absorb(&mut self, items: Vec<LineItem>) -> Result<usize, ValueObjectError> {
    let count = items.len();
    let previous_len = self.items.len();
    self.items.extend(items);
    if let Err(e) = self.recompute() {
      self.items.truncate(previous_len);
      return Err(e);
    }
    Ok(count)
  }

  /// Read a batch from `source` and absorb it. On error the document is
  /// left exactly as it was.
  pub fn import(
    &mut self,
    source: &dyn ItemSource,
    input: &[u8],
    today: NaiveDate,
  ) -> Result<usize, ImportError> {
    let items = source.read_items(input, today)?;
    self
      .absorb(items)
      .map_err(|e| ImportError::OutOfRange(e.to_string()))
  }

  pub fn snapshot(&self, taken_at: DateTime<Utc>) -> InvoiceSnapshot {
    InvoiceSnapshot {
      document_id: self.id,
      invoice_number: self.invoice_number.clone(),
      date: self.date,
      customer: self.customer.clone(),
      items: self.items.clone(),
      tax_rate: self.tax_rate,
      discount: self.discount,
      totals: self.totals,
      payment_instructions: self.payment_instructions.clone(),
      thank_you_note: self.thank_you_note.clone(),
      taken_at,
    }
  }
}

/// Immutable copy of a document at a point in time. Export and save work on
/// snapshots so later edits never leak into an in-flight operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceSnapshot {
  pub document_id: Uuid,
  pub invoice_number: InvoiceNumber,
  pub date: NaiveDate,
  pub customer: Option<CustomerSnapshot>,
  pub items: Vec<LineItem>,
  pub tax_rate: TaxRate,
  pub discount: Discount,
  pub totals: InvoiceTotals,
  pub payment_instructions: String,
  pub thank_you_note: String,
  pub taken_at: DateTime<Utc>,
}

// Saved Invoice - persisted snapshot, never updated in place
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedInvoice {
  pub id: Uuid,
  pub owner_id: Uuid,
  pub invoice_number: InvoiceNumber,
  pub date: NaiveDate,
  pub customer: Option<CustomerSnapshot>,
  pub items: Vec<LineItem>,
  pub tax_rate: TaxRate,
  pub discount: Discount,
  pub totals: InvoiceTotals,
  pub payment_instructions: String,
  pub thank_you_note: String,
  pub business_name: String,
  pub business_address: Option<String>,
  pub business_phone: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl SavedInvoice {
  pub fn from_snapshot(
    owner_id: Uuid,
    snapshot: &InvoiceSnapshot,
    profile: &BusinessProfile,
    now: DateTime<Utc>,
  ) -> Self {
    Self {
      id: Uuid::new_v4(),
      owner_id,
      invoice_number: snapshot.invoice_number.clone(),
      date: snapshot.date,
      customer: snapshot.customer.clone(),
      items: snapshot.items.clone(),
      tax_rate: snapshot.tax_rate,
      discount: snapshot.discount,
      totals: snapshot.totals,
      payment_instructions: snapshot.payment_instructions.clone(),
      thank_you_note: snapshot.thank_you_note.clone(),
      business_name: profile.name.clone(),
      business_address: profile.address.clone(),
      business_phone: profile.phone.clone(),
      created_at: now,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::value_objects::DiscountMode;
  use chrono::TimeZone;
  use rust_decimal_macros::dec;

  fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn defaults() -> DocumentDefaults {
    DocumentDefaults {
      invoice_number_prefix: "INV-".to_string(),
      tax_rate: TaxRate::new(dec!(10)).unwrap(),
      payment_instructions: "Payment due within 30 days. Thank you for your business!".to_string(),
      thank_you_note: "Thank you for choosing our services.".to_string(),
    }
  }

  fn item(qty: Decimal, price: Decimal) -> LineItem {
    LineItem::new(
      day(2024, 1, 1),
      String::new(),
      "Work".to_string(),
      Quantity::new(qty).unwrap(),
      UnitPrice::new(price).unwrap(),
    )
  }

  fn new_document() -> InvoiceDocument {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    InvoiceDocument::new(&defaults(), day(2024, 1, 1), now)
  }

  #[test]
  fn test_new_document_defaults() {
    let doc = new_document();
    assert!(doc.invoice_number().value().starts_with("INV-"));
    assert_eq!(doc.tax_rate().value(), dec!(10));
    assert_eq!(doc.discount(), Discount::none());
    assert_eq!(doc.totals(), &InvoiceTotals::default());
    assert_eq!(
      doc.payment_instructions(),
      "Payment due within 30 days. Thank you for your business!"
    );
  }

  #[test]
  fn test_defaults_take_profile_footer() {
    let profile = BusinessProfile {
      payment_instructions: Some("Pay by transfer".to_string()),
      thank_you_note: Some("  ".to_string()),
      ..BusinessProfile::placeholder()
    };
    let defaults = defaults().with_profile(&profile);
    assert_eq!(defaults.payment_instructions, "Pay by transfer");
    assert_eq!(
      defaults.thank_you_note,
      "Thank you for choosing our services."
    );
  }

  #[test]
  fn test_scenario_percentage_discount() {
    let mut doc = new_document();
    doc.absorb(vec![item(dec!(1), dec!(75000)), item(dec!(2), dec!(12500))]).unwrap();
    doc.set_discount(Discount::new(DiscountMode::Percentage, dec!(5)).unwrap()).unwrap();

    let totals = doc.totals();
    assert_eq!(totals.subtotal, dec!(100000));
    assert_eq!(totals.tax_amount, dec!(10000));
    assert_eq!(totals.discount_amount, dec!(5000));
    assert_eq!(totals.total, dec!(105000));
  }

  #[test]
  fn test_empty_document_totals() {
    let mut doc = new_document();
    doc.set_discount(Discount::new(DiscountMode::Fixed, dec!(50)).unwrap()).unwrap();
    assert_eq!(doc.totals().subtotal, dec!(0));
    assert_eq!(doc.totals().tax_amount, dec!(0));
    assert_eq!(doc.totals().discount_amount, dec!(50));
    assert_eq!(doc.totals().total, dec!(-50));
  }

  #[test]
  fn test_recompute_is_idempotent() {
    let items = vec![item(dec!(3), dec!(19.99)), item(dec!(0), dec!(500))];
    let tax = TaxRate::new(dec!(18)).unwrap();
    let discount = Discount::new(DiscountMode::Fixed, dec!(7.5)).unwrap();
    let first = InvoiceTotals::recompute(&items, &tax, &discount).unwrap();
    let second = InvoiceTotals::recompute(&items, &tax, &discount).unwrap();
    assert_eq!(first, second);
  }

  fn largest_item() -> LineItem {
    item(Quantity::MAX, UnitPrice::MAX)
  }

  #[test]
  fn test_largest_line_amount_is_exact() {
    assert_eq!(largest_item().amount(), dec!(1000000000000000000000));
  }

  #[test]
  fn test_recompute_reports_out_of_range_totals() {
    let items = vec![largest_item(), largest_item()];
    let huge_tax = TaxRate::new(Decimal::MAX).unwrap();
    let result = InvoiceTotals::recompute(&items, &huge_tax, &Discount::none());
    assert!(matches!(result, Err(ValueObjectError::AmountOutOfRange(_))));

    let huge_discount = Discount::new(DiscountMode::Percentage, Decimal::MAX).unwrap();
    let tax = TaxRate::new(dec!(10)).unwrap();
    let result = InvoiceTotals::recompute(&items, &tax, &huge_discount);
    assert!(matches!(result, Err(ValueObjectError::AmountOutOfRange(_))));
  }

  #[test]
  fn test_out_of_range_mutations_leave_document_untouched() {
    let mut doc = new_document();
    doc.add_item(largest_item()).unwrap();
    let before = doc.clone();

    let result = doc.set_tax_rate(TaxRate::new(Decimal::MAX).unwrap());
    assert!(matches!(result, Err(ValueObjectError::AmountOutOfRange(_))));
    assert_eq!(doc, before);

    let result = doc.set_discount(Discount::new(DiscountMode::Percentage, Decimal::MAX).unwrap());
    assert!(result.is_err());
    assert_eq!(doc, before);
  }

  #[test]
  fn test_out_of_range_batch_is_dropped_whole() {
    let mut doc = new_document();
    doc.add_item(item(dec!(1), dec!(100))).unwrap();
    // Tax this high only fits while the subtotal stays small.
    doc
      .set_tax_rate(TaxRate::new(dec!(1000000000000000000000)).unwrap())
      .unwrap();
    let before = doc.clone();

    let result = doc.absorb(vec![item(dec!(1), dec!(5)), largest_item()]);
    assert!(matches!(result, Err(ValueObjectError::AmountOutOfRange(_))));
    assert_eq!(doc.items().len(), 1);
    assert_eq!(doc, before);

    let result = doc.add_item(largest_item());
    assert!(result.is_err());
    assert_eq!(doc, before);
  }

  #[test]
  fn test_subtotal_tracks_mutations() {
    let mut doc = new_document();
    let a = doc.add_item(item(dec!(2), dec!(10))).unwrap();
    let b = doc.add_blank_item(day(2024, 1, 2));
    doc
      .update_item(
        b,
        LineItemPatch {
          unit_price: Some(UnitPrice::new(dec!(4.5)).unwrap()),
          ..Default::default()
        },
      )
      .unwrap();
    doc
      .update_item(
        a,
        LineItemPatch {
          quantity: Some(Quantity::new(dec!(0)).unwrap()),
          ..Default::default()
        },
      )
      .unwrap();

    for line in doc.items() {
      assert_eq!(line.amount(), line.quantity().value() * line.unit_price().value());
    }
    let sum: Decimal = doc.items().iter().map(LineItem::amount).sum();
    assert_eq!(doc.totals().subtotal, sum);
    assert_eq!(doc.totals().subtotal, dec!(4.5));

    doc.remove_item(b).unwrap();
    assert_eq!(doc.totals().subtotal, dec!(0));
  }

  #[test]
  fn test_update_returns_consistent_item() {
    let mut doc = new_document();
    let id = doc.add_item(item(dec!(1), dec!(100))).unwrap();
    let updated = doc
      .update_item(
        id,
        LineItemPatch {
          quantity: Some(Quantity::new(dec!(3)).unwrap()),
          description: Some("  Consulting ".to_string()),
          ..Default::default()
        },
      )
      .unwrap();
    assert_eq!(updated.amount(), dec!(300));
    assert_eq!(updated.description(), "Consulting");
    assert_eq!(doc.totals().subtotal, dec!(300));
  }

  #[test]
  fn test_update_unknown_item_leaves_document_untouched() {
    let mut doc = new_document();
    doc.add_item(item(dec!(1), dec!(100))).unwrap();
    let before = doc.clone();
    let result = doc.update_item(
      Uuid::new_v4(),
      LineItemPatch {
        quantity: Some(Quantity::new(dec!(9)).unwrap()),
        ..Default::default()
      },
    );
    assert!(matches!(result, Err(InvoiceError::LineItemNotFound(_))));
    assert_eq!(doc, before);
  }

  #[test]
  fn test_tax_change_recomputes_synchronously() {
    let mut doc = new_document();
    doc.add_item(item(dec!(1), dec!(200))).unwrap();
    doc.set_tax_rate(TaxRate::new(dec!(0)).unwrap()).unwrap();
    assert_eq!(doc.totals().total, dec!(200));
  }

  #[test]
  fn test_snapshot_is_detached_from_later_edits() {
    let mut doc = new_document();
    let id = doc.add_item(item(dec!(1), dec!(100))).unwrap();
    let snapshot = doc.snapshot(Utc::now());
    doc
      .update_item(
        id,
        LineItemPatch {
          quantity: Some(Quantity::new(dec!(5)).unwrap()),
          ..Default::default()
        },
      )
      .unwrap();
    assert_eq!(snapshot.totals.subtotal, dec!(100));
    assert_eq!(snapshot.items[0].amount(), dec!(100));
  }

  #[test]
  fn test_line_item_deserialize_ignores_amount() {
    let json = r#"{
      "date": "2024-01-01",
      "description": "Logo Design",
      "quantity": "2",
      "unit_price": "12500",
      "amount": "1"
    }"#;
    let item: LineItem = serde_json::from_str(json).unwrap();
    assert_eq!(item.amount(), dec!(25000));
    assert_eq!(item.reference_id(), "");
  }

  #[test]
  fn test_line_item_deserialize_rejects_oversized_numbers() {
    let json = r#"{"date":"2024-01-01","description":"x",
      "quantity":"79228162514264337593543950335","unit_price":"2"}"#;
    assert!(serde_json::from_str::<LineItem>(json).is_err());

    let json = r#"{"date":"2024-01-01","description":"x",
      "quantity":"2","unit_price":"79228162514264337593543950335"}"#;
    assert!(serde_json::from_str::<LineItem>(json).is_err());
  }

  #[test]
  fn test_line_item_deserialize_rejects_negative_price() {
    let json = r#"{"date":"2024-01-01","description":"x","quantity":"1","unit_price":"-3"}"#;
    assert!(serde_json::from_str::<LineItem>(json).is_err());
  }

  #[test]
  fn test_reopen_recomputes_from_items() {
    let mut doc = new_document();
    doc.add_item(item(dec!(2), dec!(50))).unwrap();
    let snapshot = doc.snapshot(Utc::now());
    let saved = SavedInvoice::from_snapshot(
      Uuid::new_v4(),
      &snapshot,
      &BusinessProfile::placeholder(),
      Utc::now(),
    );
    let reopened = InvoiceDocument::reopen(&saved).unwrap();
    assert_ne!(reopened.id(), doc.id());
    assert_eq!(reopened.invoice_number(), doc.invoice_number());
    assert_eq!(reopened.totals(), doc.totals());
    assert_ne!(reopened.items()[0].id(), doc.items()[0].id());
  }

  #[test]
  fn test_customer_snapshot_from_saved_customer() {
    let customer = Customer::new(
      Uuid::new_v4(),
      CustomerName::new("Acme".to_string()).unwrap(),
      None,
      Some("  ".to_string()),
      Some("555-0100".to_string()),
    );
    let snapshot = CustomerSnapshot::from(&customer);
    assert_eq!(snapshot.customer_id, Some(customer.id));
    assert_eq!(snapshot.address, None);
    assert_eq!(snapshot.phone.as_deref(), Some("555-0100"));
  }
}
