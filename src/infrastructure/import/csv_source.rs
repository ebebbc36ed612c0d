use crate::domain::invoice::import::collect_rows;
use crate::domain::invoice::{ColumnMap, ImportError, ImportFormat, ImportedRow, ItemSource};

use super::{csv_reader, decode_utf8, read_error, record_cells};

/// Header-driven comma-separated import: the first record names the columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvItemSource;

impl CsvItemSource {
  pub fn new() -> Self {
    Self
  }
}

impl ItemSource for CsvItemSource {
  fn format(&self) -> ImportFormat {
    ImportFormat::Csv
  }

  fn read_rows(&self, input: &[u8]) -> Result<Vec<ImportedRow>, ImportError> {
    let text = decode_utf8(input)?;
    let mut reader = csv_reader(&text);
    let mut records = reader.records();

    let header = records
      .next()
      .ok_or(ImportError::EmptyInput)?
      .map_err(read_error)?;
    let map = ColumnMap::from_headers(header.iter())?;

    let rows = records.map(|record| record.map(|r| record_cells(&r)).map_err(read_error));
    collect_rows(rows, &map)
  }
}
