use crate::domain::invoice::import::collect_rows;
use crate::domain::invoice::{ColumnMap, ImportError, ImportFormat, ImportedRow, ItemSource};

use super::{csv_reader, decode_utf8, read_error, record_cells};

/// Compatibility import with a fixed column order
/// (`sl_no, date, order_id, description, quantity, unit_price`).
/// Header text, when present, is skipped without being inspected.
#[derive(Debug, Clone, Copy)]
pub struct PositionalCsvItemSource {
  has_header: bool,
}

impl PositionalCsvItemSource {
  pub fn new(has_header: bool) -> Self {
    Self { has_header }
  }
}

impl Default for PositionalCsvItemSource {
  fn default() -> Self {
    Self::new(true)
  }
}

impl ItemSource for PositionalCsvItemSource {
  fn format(&self) -> ImportFormat {
    ImportFormat::PositionalCsv {
      has_header: self.has_header,
    }
  }

  fn read_rows(&self, input: &[u8]) -> Result<Vec<ImportedRow>, ImportError> {
    let text = decode_utf8(input)?;
    let mut reader = csv_reader(&text);
    let skip = usize::from(self.has_header);

    let rows = reader
      .records()
      .skip(skip)
      .map(|record| record.map(|r| record_cells(&r)).map_err(read_error));
    collect_rows(rows, &ColumnMap::positional())
  }
}
