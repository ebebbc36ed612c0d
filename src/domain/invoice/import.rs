//! Shared contract for bulk line-item import.
//!
//! Every source adapter (delimited text, positional text, spreadsheet) turns
//! its input into rows of [`Cell`]s plus a [`ColumnMap`], then hands them to
//! [`collect_rows`]. [`materialize`] applies the one set of defaulting and
//! validation rules and returns either every row as a [`LineItem`] or the
//! first error.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::entities::LineItem;
use super::value_objects::{Quantity, UnitPrice};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
  #[error("Missing required columns: {}", .0.join(", "))]
  MissingColumns(Vec<String>),

  #[error("Row {row}: description is required")]
  MissingDescription { row: usize },

  #[error("Row {row}, column '{column}': {message}")]
  InvalidField {
    row: usize,
    column: String,
    message: String,
  },

  #[error("The file is empty")]
  EmptyInput,

  #[error("The file is not valid UTF-8 text")]
  Encoding,

  #[error("Could not read file: {0}")]
  Read(String),

  #[error("Unsupported import format: {0}")]
  UnsupportedFormat(String),

  #[error("Imported items are out of range: {0}")]
  OutOfRange(String),
}

impl ImportError {
  /// Errors caused by the bytes themselves rather than their content.
  pub fn is_io(&self) -> bool {
    matches!(self, ImportError::Encoding | ImportError::Read(_))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemColumn {
  Description,
  Quantity,
  UnitPrice,
  Date,
  OrderId,
  /// Only kept by bulk uploads; invoice imports ignore it.
  CustomerName,
}

impl ItemColumn {
  pub const REQUIRED: [ItemColumn; 3] = [
    ItemColumn::Description,
    ItemColumn::Quantity,
    ItemColumn::UnitPrice,
  ];

  pub fn canonical_name(&self) -> &'static str {
    match self {
      ItemColumn::Description => "description",
      ItemColumn::Quantity => "quantity",
      ItemColumn::UnitPrice => "unit_price",
      ItemColumn::Date => "date",
      ItemColumn::OrderId => "order_id",
      ItemColumn::CustomerName => "customer_name",
    }
  }

  /// Case-insensitive header lookup, synonyms included.
  pub fn match_header(header: &str) -> Option<ItemColumn> {
    let normalized = header.trim_start_matches('\u{feff}').trim().to_lowercase();
    match normalized.as_str() {
      "description" => Some(ItemColumn::Description),
      "quantity" | "qty" => Some(ItemColumn::Quantity),
      "unit_price" | "unit price" => Some(ItemColumn::UnitPrice),
      "date" => Some(ItemColumn::Date),
      "order_id" | "orderid" => Some(ItemColumn::OrderId),
      "customer_name" | "customer name" | "customer" => Some(ItemColumn::CustomerName),
      _ => None,
    }
  }
}

impl fmt::Display for ItemColumn {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.canonical_name())
  }
}

/// Where each known column lives in a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
  description: Option<usize>,
  quantity: Option<usize>,
  unit_price: Option<usize>,
  date: Option<usize>,
  order_id: Option<usize>,
  customer_name: Option<usize>,
}

impl ColumnMap {
  /// Build from a header row. The first header matching a column wins.
  /// All missing required columns are reported together.
  pub fn from_headers<'a, I>(headers: I) -> Result<Self, ImportError>
  where
    I: IntoIterator<Item = &'a str>,
  {
    let mut map = ColumnMap::default();
    for (index, header) in headers.into_iter().enumerate() {
      if let Some(column) = ItemColumn::match_header(header) {
        let slot = map.slot_mut(column);
        if slot.is_none() {
          *slot = Some(index);
        }
      }
    }

    let missing: Vec<String> = ItemColumn::REQUIRED
      .iter()
      .filter(|column| map.index_of(**column).is_none())
      .map(|column| column.canonical_name().to_string())
      .collect();

    if !missing.is_empty() {
      return Err(ImportError::MissingColumns(missing));
    }
    Ok(map)
  }

  /// Fixed order `sl_no, date, order_id, description, quantity, unit_price`.
  pub fn positional() -> Self {
    Self {
      date: Some(1),
      order_id: Some(2),
      description: Some(3),
      quantity: Some(4),
      unit_price: Some(5),
      customer_name: None,
    }
  }

  pub fn index_of(&self, column: ItemColumn) -> Option<usize> {
    match column {
      ItemColumn::Description => self.description,
      ItemColumn::Quantity => self.quantity,
      ItemColumn::UnitPrice => self.unit_price,
      ItemColumn::Date => self.date,
      ItemColumn::OrderId => self.order_id,
      ItemColumn::CustomerName => self.customer_name,
    }
  }

  fn slot_mut(&mut self, column: ItemColumn) -> &mut Option<usize> {
    match column {
      ItemColumn::Description => &mut self.description,
      ItemColumn::Quantity => &mut self.quantity,
      ItemColumn::UnitPrice => &mut self.unit_price,
      ItemColumn::Date => &mut self.date,
      ItemColumn::OrderId => &mut self.order_id,
      ItemColumn::CustomerName => &mut self.customer_name,
    }
  }
}

/// A single field as an adapter read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
  Empty,
  Text(String),
  Number(Decimal),
  Date(NaiveDate),
}

impl Cell {
  pub fn text(value: impl Into<String>) -> Self {
    let value = value.into();
    if value.trim().is_empty() {
      Cell::Empty
    } else {
      Cell::Text(value)
    }
  }

  pub fn is_empty(&self) -> bool {
    match self {
      Cell::Empty => true,
      Cell::Text(text) => text.trim().is_empty(),
      Cell::Number(_) | Cell::Date(_) => false,
    }
  }

  fn as_text(&self) -> Option<String> {
    match self {
      Cell::Empty => None,
      Cell::Text(text) => Some(text.trim().to_string()).filter(|t| !t.is_empty()),
      Cell::Number(number) => Some(number.normalize().to_string()),
      Cell::Date(date) => Some(date.format("%Y-%m-%d").to_string()),
    }
  }

  fn as_decimal(&self) -> Option<Decimal> {
    match self {
      Cell::Number(number) => Some(*number),
      Cell::Text(text) => parse_decimal(text),
      Cell::Empty | Cell::Date(_) => None,
    }
  }

  fn as_date(&self) -> Option<NaiveDate> {
    match self {
      Cell::Date(date) => Some(*date),
      Cell::Text(text) => parse_date(text),
      Cell::Empty | Cell::Number(_) => None,
    }
  }
}

/// Decimal from free text; `None` when blank or not a number.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
  let trimmed = text.trim();
  if trimmed.is_empty() {
    return None;
  }
  Decimal::from_str(trimmed)
    .or_else(|_| Decimal::from_scientific(trimmed))
    .ok()
}

/// ISO `YYYY-MM-DD`, optionally followed by a time part, or `YYYY/MM/DD`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
  let trimmed = text.trim();
  let date_part = trimmed.get(..10).unwrap_or(trimmed);
  NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
    .or_else(|_| NaiveDate::parse_from_str(date_part, "%Y/%m/%d"))
    .ok()
}

/// One data row with every field optional, before defaulting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedRow {
  pub row: usize,
  pub date: Option<NaiveDate>,
  pub order_id: Option<String>,
  pub description: Option<String>,
  pub quantity: Option<Decimal>,
  pub unit_price: Option<Decimal>,
  pub customer_name: Option<String>,
}

impl ImportedRow {
  pub fn from_cells(row: usize, cells: &[Cell], map: &ColumnMap) -> Self {
    let cell = |column: ItemColumn| map.index_of(column).and_then(|index| cells.get(index));

    Self {
      row,
      date: cell(ItemColumn::Date).and_then(Cell::as_date),
      order_id: cell(ItemColumn::OrderId).and_then(Cell::as_text),
      description: cell(ItemColumn::Description).and_then(Cell::as_text),
      quantity: cell(ItemColumn::Quantity).and_then(Cell::as_decimal),
      unit_price: cell(ItemColumn::UnitPrice).and_then(Cell::as_decimal),
      customer_name: cell(ItemColumn::CustomerName).and_then(Cell::as_text),
    }
  }

  /// Apply defaults (quantity 1, unit price 0, date today, empty order id)
  /// and validate.
  pub fn into_line_item(self, today: NaiveDate) -> Result<LineItem, ImportError> {
    let description = self
      .description
      .filter(|d| !d.trim().is_empty())
      .ok_or(ImportError::MissingDescription { row: self.row })?;

    let quantity = Quantity::new(self.quantity.unwrap_or(Decimal::ONE)).map_err(|e| {
      ImportError::InvalidField {
        row: self.row,
        column: ItemColumn::Quantity.to_string(),
        message: e.to_string(),
      }
    })?;

    let unit_price = UnitPrice::new(self.unit_price.unwrap_or(Decimal::ZERO)).map_err(|e| {
      ImportError::InvalidField {
        row: self.row,
        column: ItemColumn::UnitPrice.to_string(),
        message: e.to_string(),
      }
    })?;

    Ok(LineItem::new(
      self.date.unwrap_or(today),
      self.order_id.unwrap_or_default(),
      description,
      quantity,
      unit_price,
    ))
  }
}

/// Map raw records onto typed rows. Rows are numbered from 1 in input order;
/// rows whose cells are all blank are skipped but still counted.
pub fn collect_rows<I>(rows: I, map: &ColumnMap) -> Result<Vec<ImportedRow>, ImportError>
where
  I: IntoIterator<Item = Result<Vec<Cell>, ImportError>>,
{
  let mut collected = Vec::new();
  for (index, cells) in rows.into_iter().enumerate() {
    let cells = cells?;
    if cells.iter().all(Cell::is_empty) {
      continue;
    }
    collected.push(ImportedRow::from_cells(index + 1, &cells, map));
  }
  Ok(collected)
}

/// Convert typed rows into line items, all or nothing.
pub fn materialize(rows: Vec<ImportedRow>, today: NaiveDate) -> Result<Vec<LineItem>, ImportError> {
  rows.into_iter().map(|row| row.into_line_item(today)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
  /// Header-driven comma-separated text.
  Csv,
  /// Fixed-column comma-separated text, with or without a leading header
  /// row to skip.
  PositionalCsv { has_header: bool },
  /// First sheet of an `.xlsx` workbook.
  Spreadsheet,
}

impl ImportFormat {
  pub fn as_str(&self) -> &'static str {
    match self {
      ImportFormat::Csv => "csv",
      ImportFormat::PositionalCsv { has_header: true } => "positional",
      ImportFormat::PositionalCsv { has_header: false } => "positional-headerless",
      ImportFormat::Spreadsheet => "xlsx",
    }
  }

  /// Guess from an uploaded file name. Positional mode is never guessed.
  pub fn from_filename(name: &str) -> Option<Self> {
    let lower = name.to_lowercase();
    if lower.ends_with(".csv") || lower.ends_with(".txt") {
      Some(ImportFormat::Csv)
    } else if lower.ends_with(".xlsx") || lower.ends_with(".xls") {
      Some(ImportFormat::Spreadsheet)
    } else {
      None
    }
  }
}

impl FromStr for ImportFormat {
  type Err = ImportError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "csv" => Ok(ImportFormat::Csv),
      "positional" | "positional-csv" | "positional_csv" => {
        Ok(ImportFormat::PositionalCsv { has_header: true })
      }
      "positional-headerless" | "positional_headerless" => {
        Ok(ImportFormat::PositionalCsv { has_header: false })
      }
      "xlsx" | "spreadsheet" | "excel" => Ok(ImportFormat::Spreadsheet),
      other => Err(ImportError::UnsupportedFormat(other.to_string())),
    }
  }
}
