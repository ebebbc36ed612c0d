mod csv_source;
mod positional_source;
mod spreadsheet_source;
pub mod templates;

pub use csv_source::CsvItemSource;
pub use positional_source::PositionalCsvItemSource;
pub use spreadsheet_source::SpreadsheetItemSource;
pub use templates::{TemplateFile, template_for};

use std::borrow::Cow;

use crate::domain::invoice::{Cell, ImportError};

/// Decode uploaded text as UTF-8, dropping a leading byte-order mark.
pub(crate) fn decode_utf8(input: &[u8]) -> Result<Cow<'_, str>, ImportError> {
  let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(input);
  if had_errors {
    return Err(ImportError::Encoding);
  }
  Ok(text)
}

pub(crate) fn record_cells(record: &csv::StringRecord) -> Vec<Cell> {
  record.iter().map(Cell::text).collect()
}

pub(crate) fn csv_reader(text: &str) -> csv::Reader<&[u8]> {
  csv::ReaderBuilder::new()
    .has_headers(false)
    .flexible(true)
    .trim(csv::Trim::All)
    .from_reader(text.as_bytes())
}

pub(crate) fn read_error(error: csv::Error) -> ImportError {
  ImportError::Read(error.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_decode_strips_bom() {
    let input = b"\xEF\xBB\xBFdescription";
    assert_eq!(decode_utf8(input).unwrap(), "description");
  }

  #[test]
  fn test_decode_rejects_invalid_utf8() {
    assert_eq!(
      decode_utf8(&[0x64, 0xFF, 0xFE, 0x65]).unwrap_err(),
      ImportError::Encoding
    );
  }
}
