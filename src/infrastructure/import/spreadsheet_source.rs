use calamine::{Data, Reader, open_workbook_auto_from_rs};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::io::Cursor;

use crate::domain::invoice::import::collect_rows;
use crate::domain::invoice::{Cell, ColumnMap, ImportError, ImportFormat, ImportedRow, ItemSource};

/// Reads the first worksheet of an `.xlsx` workbook. The first row holds the
/// headers; numeric and date cells are taken as typed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetItemSource;

impl SpreadsheetItemSource {
  pub fn new() -> Self {
    Self
  }
}

fn to_cell(data: &Data) -> Cell {
  match data {
    Data::Empty => Cell::Empty,
    Data::String(text) => Cell::text(text.clone()),
    Data::Int(value) => Cell::Number(Decimal::from(*value)),
    Data::Float(value) => Decimal::from_f64(*value)
      .map(|d| Cell::Number(d.normalize()))
      .unwrap_or(Cell::Empty),
    Data::Bool(value) => Cell::text(value.to_string()),
    Data::DateTime(value) => value
      .as_datetime()
      .map(|dt| Cell::Date(dt.date()))
      .unwrap_or(Cell::Empty),
    Data::DateTimeIso(text) => Cell::text(text.clone()),
    _ => Cell::Empty,
  }
}

impl ItemSource for SpreadsheetItemSource {
  fn format(&self) -> ImportFormat {
    ImportFormat::Spreadsheet
  }

  fn read_rows(&self, input: &[u8]) -> Result<Vec<ImportedRow>, ImportError> {
    if input.is_empty() {
      return Err(ImportError::EmptyInput);
    }

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(input.to_vec()))
      .map_err(|e| ImportError::Read(e.to_string()))?;
    let range = workbook
      .worksheet_range_at(0)
      .ok_or(ImportError::EmptyInput)?
      .map_err(|e| ImportError::Read(e.to_string()))?;

    let mut rows = range.rows();
    let header: Vec<String> = rows
      .next()
      .ok_or(ImportError::EmptyInput)?
      .iter()
      .map(|cell| cell.to_string())
      .collect();
    let map = ColumnMap::from_headers(header.iter().map(String::as_str))?;

    let data_rows = rows.map(|row| Ok(row.iter().map(to_cell).collect()));
    collect_rows(data_rows, &map)
  }
}
