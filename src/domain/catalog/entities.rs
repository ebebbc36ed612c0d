use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::invoice::{LineItem, Quantity, UnitPrice};

use super::errors::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
  InStock,
  LowStock,
  OutOfStock,
}

impl StockStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      StockStatus::InStock => "in_stock",
      StockStatus::LowStock => "low_stock",
      StockStatus::OutOfStock => "out_of_stock",
    }
  }
}

/// Stock filter for catalog listings. `Low` covers everything at or below the
/// reorder level, empty shelves included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockFilter {
  Low,
  Out,
}

impl StockFilter {
  pub fn matches(&self, product: &Product) -> bool {
    match self {
      StockFilter::Low => product.current_stock <= product.min_stock_level,
      StockFilter::Out => product.current_stock <= 0,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
  /// Exact category, ignoring case.
  pub category: Option<String>,
  pub stock: Option<StockFilter>,
}

impl ProductFilter {
  pub fn matches(&self, product: &Product) -> bool {
    let category_ok = match self.category.as_deref().map(str::trim) {
      None | Some("") => true,
      Some(wanted) => product
        .category
        .as_deref()
        .is_some_and(|c| c.eq_ignore_ascii_case(wanted)),
    };
    category_ok && self.stock.is_none_or(|stock| stock.matches(product))
  }
}

// Product - catalog entry that can be picked onto an invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
  pub id: Uuid,
  pub owner_id: Uuid,
  pub name: String,
  pub sku: Option<String>,
  pub description: Option<String>,
  pub category: Option<String>,
  pub unit: String,
  pub unit_price: UnitPrice,
  pub cost_price: Option<UnitPrice>,
  pub current_stock: i32,
  pub min_stock_level: i32,
  pub max_stock_level: Option<i32>,
  pub is_active: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Product {
  pub fn new(owner_id: Uuid, data: ProductData) -> Result<Self, CatalogError> {
    let now = Utc::now();
    let mut product = Self {
      id: Uuid::new_v4(),
      owner_id,
      name: String::new(),
      sku: None,
      description: None,
      category: None,
      unit: String::new(),
      unit_price: UnitPrice::ZERO,
      cost_price: None,
      current_stock: 0,
      min_stock_level: 0,
      max_stock_level: None,
      is_active: true,
      created_at: now,
      updated_at: now,
    };
    product.apply(data)?;
    product.updated_at = now;
    Ok(product)
  }

  pub fn update(&mut self, data: ProductData) -> Result<(), CatalogError> {
    self.apply(data)
  }

  fn apply(&mut self, data: ProductData) -> Result<(), CatalogError> {
    data.validate()?;
    self.name = data.name.trim().to_string();
    self.sku = clean(data.sku);
    self.description = clean(data.description);
    self.category = clean(data.category);
    self.unit = clean(data.unit).unwrap_or_else(|| "pcs".to_string());
    self.unit_price = UnitPrice::new(data.unit_price)?;
    self.cost_price = data.cost_price.map(UnitPrice::new).transpose()?;
    self.current_stock = data.current_stock;
    self.min_stock_level = data.min_stock_level;
    self.max_stock_level = data.max_stock_level;
    self.is_active = data.is_active;
    self.updated_at = Utc::now();
    Ok(())
  }

  pub fn stock_status(&self) -> StockStatus {
    if self.current_stock <= 0 {
      StockStatus::OutOfStock
    } else if self.current_stock <= self.min_stock_level {
      StockStatus::LowStock
    } else {
      StockStatus::InStock
    }
  }

  /// Turn `quantity` units of this product into a line item. Stock is only
  /// checked, never decremented.
  pub fn pick(&self, quantity: Decimal, date: NaiveDate) -> Result<LineItem, CatalogError> {
    if !self.is_active {
      return Err(CatalogError::Inactive(self.name.clone()));
    }
    if quantity <= Decimal::ZERO {
      return Err(CatalogError::InvalidQuantity(
        "Quantity must be greater than zero".to_string(),
      ));
    }
    if quantity > Decimal::from(self.current_stock.max(0)) {
      return Err(CatalogError::InsufficientStock {
        requested: quantity,
        available: self.current_stock.max(0),
      });
    }

    let description = match self.description.as_deref() {
      Some(text) if !text.trim().is_empty() => format!("{} - {}", self.name, text.trim()),
      _ => self.name.clone(),
    };

    Ok(LineItem::new(
      date,
      self.sku.clone().unwrap_or_default(),
      description,
      Quantity::new(quantity)?,
      self.unit_price,
    ))
  }
}

/// Editable product fields as submitted by the owner.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductData {
  pub name: String,
  pub sku: Option<String>,
  pub description: Option<String>,
  pub category: Option<String>,
  pub unit: Option<String>,
  pub unit_price: Decimal,
  pub cost_price: Option<Decimal>,
  #[serde(default)]
  pub current_stock: i32,
  #[serde(default)]
  pub min_stock_level: i32,
  pub max_stock_level: Option<i32>,
  #[serde(default = "default_active")]
  pub is_active: bool,
}

fn default_active() -> bool {
  true
}

impl ProductData {
  fn validate(&self) -> Result<(), CatalogError> {
    if self.name.trim().is_empty() {
      return Err(CatalogError::Validation(
        "Product name cannot be empty".to_string(),
      ));
    }
    if self.current_stock < 0 {
      return Err(CatalogError::Validation(
        "Current stock cannot be negative".to_string(),
      ));
    }
    if self.min_stock_level < 0 {
      return Err(CatalogError::Validation(
        "Minimum stock level cannot be negative".to_string(),
      ));
    }
    if let Some(max) = self.max_stock_level {
      if max < self.min_stock_level {
        return Err(CatalogError::Validation(
          "Maximum stock level cannot be below the minimum".to_string(),
        ));
      }
    }
    Ok(())
  }
}

fn clean(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
}

#[cfg(test)]
pub(crate) fn sample_data(name: &str, stock: i32, min: i32) -> ProductData {
  ProductData {
    name: name.to_string(),
    sku: Some("SKU-1".to_string()),
    description: None,
    category: None,
    unit: None,
    unit_price: Decimal::from(250),
    cost_price: None,
    current_stock: stock,
    min_stock_level: min,
    max_stock_level: None,
    is_active: true,
  }
}
