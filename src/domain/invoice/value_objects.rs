use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::ValidateEmail;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid invoice number: {0}")]
  InvalidInvoiceNumber(String),
  #[error("Invalid quantity: {0}")]
  InvalidQuantity(String),
  #[error("Invalid unit price: {0}")]
  InvalidUnitPrice(String),
  #[error("Invalid tax rate: {0}")]
  InvalidTaxRate(String),
  #[error("Invalid discount: {0}")]
  InvalidDiscount(String),
  #[error("Invalid customer name: {0}")]
  InvalidCustomerName(String),
  #[error("Invalid email: {0}")]
  InvalidEmail(String),
  #[error("Amount out of range: {0}")]
  AmountOutOfRange(String),
}

// Invoice Number - User-editable, not globally unique
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidInvoiceNumber(
        "Invoice number cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 100 {
      return Err(ValueObjectError::InvalidInvoiceNumber(
        "Invoice number cannot exceed 100 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  /// `<prefix><unix millis>`, e.g. `INV-1714557600000`.
  pub fn generate(prefix: &str, now: DateTime<Utc>) -> Self {
    Self(format!("{}{}", prefix, now.timestamp_millis()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl TryFrom<String> for InvoiceNumber {
  type Error = ValueObjectError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<InvoiceNumber> for String {
  fn from(value: InvoiceNumber) -> Self {
    value.0
  }
}

impl fmt::Display for InvoiceNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Quantity - non-negative, zero is a legitimate value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Quantity(Decimal);

impl Quantity {
  pub const ONE: Quantity = Quantity(Decimal::ONE);
  /// Upper bound; together with [`UnitPrice::MAX`] it keeps every line amount
  /// far inside the range of `Decimal`.
  pub const MAX: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value.is_sign_negative() && !value.is_zero() {
      return Err(ValueObjectError::InvalidQuantity(
        "Quantity cannot be negative".to_string(),
      ));
    }
    if value > Self::MAX {
      return Err(ValueObjectError::InvalidQuantity(format!(
        "Quantity cannot exceed {}",
        Self::MAX
      )));
    }
    Ok(Self(value.abs()))
  }

  pub fn value(&self) -> Decimal {
    self.0
  }
}

impl TryFrom<Decimal> for Quantity {
  type Error = ValueObjectError;

  fn try_from(value: Decimal) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<Quantity> for Decimal {
  fn from(value: Quantity) -> Self {
    value.0
  }
}

// Unit Price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct UnitPrice(Decimal);

impl UnitPrice {
  pub const ZERO: UnitPrice = UnitPrice(Decimal::ZERO);
  /// 10^12, split into the low and middle 32-bit words.
  pub const MAX: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value.is_sign_negative() && !value.is_zero() {
      return Err(ValueObjectError::InvalidUnitPrice(
        "Unit price cannot be negative".to_string(),
      ));
    }
    if value > Self::MAX {
      return Err(ValueObjectError::InvalidUnitPrice(format!(
        "Unit price cannot exceed {}",
        Self::MAX
      )));
    }
    Ok(Self(value.abs()))
  }

  pub fn value(&self) -> Decimal {
    self.0
  }
}

impl TryFrom<Decimal> for UnitPrice {
  type Error = ValueObjectError;

  fn try_from(value: Decimal) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<UnitPrice> for Decimal {
  fn from(value: UnitPrice) -> Self {
    value.0
  }
}

// Tax Rate - percentage applied to the subtotal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct TaxRate(Decimal);

impl TaxRate {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value < Decimal::ZERO {
      return Err(ValueObjectError::InvalidTaxRate(
        "Tax rate cannot be negative".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> Decimal {
    self.0
  }

  /// Rate as a fraction, e.g. 10% becomes 0.1.
  pub fn as_multiplier(&self) -> Decimal {
    self.0 / Decimal::ONE_HUNDRED
  }
}

impl TryFrom<Decimal> for TaxRate {
  type Error = ValueObjectError;

  fn try_from(value: Decimal) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<TaxRate> for Decimal {
  fn from(value: TaxRate) -> Self {
    value.0
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountMode {
  Percentage,
  Fixed,
}

impl DiscountMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      DiscountMode::Percentage => "percentage",
      DiscountMode::Fixed => "fixed",
    }
  }
}

impl FromStr for DiscountMode {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "percentage" | "percent" => Ok(DiscountMode::Percentage),
      "fixed" | "amount" => Ok(DiscountMode::Fixed),
      _ => Err(ValueObjectError::InvalidDiscount(format!(
        "Unknown discount mode: {}",
        s
      ))),
    }
  }
}

// Discount - either a percentage of the subtotal or a fixed amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDiscount")]
pub struct Discount {
  mode: DiscountMode,
  value: Decimal,
}

#[derive(Deserialize)]
struct RawDiscount {
  mode: DiscountMode,
  value: Decimal,
}

impl TryFrom<RawDiscount> for Discount {
  type Error = ValueObjectError;

  fn try_from(raw: RawDiscount) -> Result<Self, Self::Error> {
    Self::new(raw.mode, raw.value)
  }
}

impl Discount {
  pub fn new(mode: DiscountMode, value: Decimal) -> Result<Self, ValueObjectError> {
    if value < Decimal::ZERO {
      return Err(ValueObjectError::InvalidDiscount(
        "Discount cannot be negative".to_string(),
      ));
    }
    Ok(Self { mode, value })
  }

  pub fn none() -> Self {
    Self {
      mode: DiscountMode::Percentage,
      value: Decimal::ZERO,
    }
  }

  pub fn mode(&self) -> DiscountMode {
    self.mode
  }

  pub fn value(&self) -> Decimal {
    self.value
  }

  /// Discount amount for a given subtotal. A fixed discount is not capped.
  pub fn amount_for(&self, subtotal: Decimal) -> Result<Decimal, ValueObjectError> {
    match self.mode {
      DiscountMode::Percentage => subtotal
        .checked_mul(self.value / Decimal::ONE_HUNDRED)
        .ok_or_else(|| ValueObjectError::AmountOutOfRange("discount".to_string())),
      DiscountMode::Fixed => Ok(self.value),
    }
  }
}

impl Default for Discount {
  fn default() -> Self {
    Self::none()
  }
}

// Customer Name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerName(String);

impl CustomerName {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidCustomerName(
        "Customer name cannot be empty".to_string(),
      ));
    }
    if trimmed.chars().count() > 255 {
      return Err(ValueObjectError::InvalidCustomerName(
        "Customer name cannot exceed 255 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// Customer Email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerEmail(String);

impl CustomerEmail {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim().to_lowercase();
    if !trimmed.validate_email() {
      return Err(ValueObjectError::InvalidEmail(format!(
        "'{}' is not a valid email address",
        value.trim()
      )));
    }
    Ok(Self(trimmed))
  }

  /// Blank input means "no email".
  pub fn parse_optional(value: Option<String>) -> Result<Option<Self>, ValueObjectError> {
    match value {
      Some(v) if !v.trim().is_empty() => Self::new(v).map(Some),
      _ => Ok(None),
    }
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;
  use rust_decimal_macros::dec;

  #[test]
  fn test_invoice_number_rejects_blank() {
    assert!(InvoiceNumber::new("   ".to_string()).is_err());
    assert_eq!(
      InvoiceNumber::new(" INV-7 ".to_string()).unwrap().value(),
      "INV-7"
    );
  }

  #[test]
  fn test_invoice_number_generate_uses_millis() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
    let number = InvoiceNumber::generate("INV-", now);
    assert_eq!(number.value(), format!("INV-{}", now.timestamp_millis()));
  }

  #[test]
  fn test_quantity_allows_zero_rejects_negative() {
    assert_eq!(Quantity::new(dec!(0)).unwrap().value(), dec!(0));
    assert_eq!(Quantity::new(dec!(2.5)).unwrap().value(), dec!(2.5));
    assert!(Quantity::new(dec!(-1)).is_err());
  }

  #[test]
  fn test_quantity_and_price_upper_bounds() {
    assert_eq!(Quantity::MAX, dec!(1000000000));
    assert_eq!(UnitPrice::MAX, dec!(1000000000000));
    assert!(Quantity::new(Quantity::MAX).is_ok());
    assert!(UnitPrice::new(UnitPrice::MAX).is_ok());
    assert!(matches!(
      Quantity::new(Decimal::MAX),
      Err(ValueObjectError::InvalidQuantity(_))
    ));
    assert!(matches!(
      UnitPrice::new(dec!(1000000000000.01)),
      Err(ValueObjectError::InvalidUnitPrice(_))
    ));
  }

  #[test]
  fn test_unit_price_rejects_negative() {
    assert!(UnitPrice::new(dec!(-0.01)).is_err());
    assert!(UnitPrice::new(dec!(75000)).is_ok());
  }

  #[test]
  fn test_tax_rate_multiplier() {
    let rate = TaxRate::new(dec!(10)).unwrap();
    assert_eq!(rate.as_multiplier(), dec!(0.1));
    assert!(TaxRate::new(dec!(-5)).is_err());
  }

  #[test]
  fn test_discount_amounts() {
    let pct = Discount::new(DiscountMode::Percentage, dec!(5)).unwrap();
    assert_eq!(pct.amount_for(dec!(100000)).unwrap(), dec!(5000));

    let fixed = Discount::new(DiscountMode::Fixed, dec!(250)).unwrap();
    assert_eq!(fixed.amount_for(dec!(100)).unwrap(), dec!(250));

    let huge = Discount::new(DiscountMode::Percentage, Decimal::MAX).unwrap();
    assert!(matches!(
      huge.amount_for(dec!(1000)),
      Err(ValueObjectError::AmountOutOfRange(_))
    ));

    assert!(Discount::new(DiscountMode::Fixed, dec!(-1)).is_err());
  }

  #[test]
  fn test_discount_mode_from_str() {
    assert_eq!(
      DiscountMode::from_str("Percentage").unwrap(),
      DiscountMode::Percentage
    );
    assert_eq!(DiscountMode::from_str("fixed").unwrap(), DiscountMode::Fixed);
    assert!(DiscountMode::from_str("bogus").is_err());
  }

  #[test]
  fn test_discount_deserialize_validates() {
    let ok: Discount = serde_json::from_str(r#"{"mode":"fixed","value":"10"}"#).unwrap();
    assert_eq!(ok.value(), dec!(10));
    let bad: Result<Discount, _> = serde_json::from_str(r#"{"mode":"fixed","value":"-10"}"#);
    assert!(bad.is_err());
  }

  #[test]
  fn test_customer_email_optional() {
    assert_eq!(CustomerEmail::parse_optional(None).unwrap(), None);
    assert_eq!(
      CustomerEmail::parse_optional(Some("  ".to_string())).unwrap(),
      None
    );
    assert!(CustomerEmail::parse_optional(Some("not-an-email".to_string())).is_err());
    assert_eq!(
      CustomerEmail::new("Ada@Example.com".to_string())
        .unwrap()
        .value(),
      "ada@example.com"
    );
  }
}
