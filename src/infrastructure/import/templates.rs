//! Downloadable sample files, one per import format. Each parses back into
//! exactly its sample rows with the matching source.

use rust_xlsxwriter::{Workbook, XlsxError};

use crate::domain::invoice::{ImportError, ImportFormat};

/// `(description, quantity, unit_price, order_id, date, customer_name)`
const SAMPLE_ROWS: [(&str, f64, &str, &str, &str, &str); 3] = [
  ("Website Development", 1.0, "75000.00", "ORD-001", "2024-01-01", "John Doe"),
  ("Logo Design", 2.0, "12500.00", "ORD-002", "2024-01-02", "Jane Smith"),
  ("Consulting Services", 4.0, "7500.00", "ORD-003", "2024-01-03", "John Doe"),
];

/// `customer_name` is only read by bulk uploads; invoice imports skip it.
const HEADER_COLUMNS: [&str; 6] = [
  "description",
  "quantity",
  "unit_price",
  "order_id",
  "date",
  "customer_name",
];

pub struct TemplateFile {
  pub filename: &'static str,
  pub content_type: &'static str,
  pub bytes: Vec<u8>,
}

pub fn template_for(format: ImportFormat) -> Result<TemplateFile, ImportError> {
  match format {
    ImportFormat::Csv => Ok(TemplateFile {
      filename: "invoice_items_template.csv",
      content_type: "text/csv; charset=utf-8",
      bytes: csv_template().into_bytes(),
    }),
    ImportFormat::PositionalCsv { has_header: true } => Ok(TemplateFile {
      filename: "invoice_items_positional_template.csv",
      content_type: "text/csv; charset=utf-8",
      bytes: positional_csv_template(true).into_bytes(),
    }),
    ImportFormat::PositionalCsv { has_header: false } => Ok(TemplateFile {
      filename: "invoice_items_positional_headerless_template.csv",
      content_type: "text/csv; charset=utf-8",
      bytes: positional_csv_template(false).into_bytes(),
    }),
    ImportFormat::Spreadsheet => Ok(TemplateFile {
      filename: "invoice_items_template.xlsx",
      content_type: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
      bytes: spreadsheet_template().map_err(|e| ImportError::Read(e.to_string()))?,
    }),
  }
}

pub fn csv_template() -> String {
  let mut out = HEADER_COLUMNS.join(",");
  out.push('\n');
  for (description, quantity, price, order_id, date, customer) in SAMPLE_ROWS {
    out.push_str(&format!(
      "{},{},{},{},{},{}\n",
      description, quantity, price, order_id, date, customer
    ));
  }
  out
}

/// The headerless variant starts straight at the first sample row, since the
/// matching source reads every line as data.
pub fn positional_csv_template(has_header: bool) -> String {
  let mut out = if has_header {
    String::from("sl_no,date,order_id,description,quantity,unit_price\n")
  } else {
    String::new()
  };
  for (index, (description, quantity, price, order_id, date, _)) in SAMPLE_ROWS.iter().enumerate() {
    out.push_str(&format!(
      "{},{},{},{},{},{}\n",
      index + 1,
      date,
      order_id,
      description,
      quantity,
      price
    ));
  }
  out
}

pub fn spreadsheet_template() -> Result<Vec<u8>, XlsxError> {
  let mut workbook = Workbook::new();
  let sheet = workbook.add_worksheet();
  sheet.set_name("Items")?;

  for (col, header) in HEADER_COLUMNS.iter().enumerate() {
    sheet.write_string(0, col as u16, *header)?;
  }
  for (index, (description, quantity, price, order_id, date, customer)) in
    SAMPLE_ROWS.iter().enumerate()
  {
    let row = index as u32 + 1;
    let price: f64 = price.parse().unwrap_or_default();
    sheet.write_string(row, 0, *description)?;
    sheet.write_number(row, 1, *quantity)?;
    sheet.write_number(row, 2, price)?;
    sheet.write_string(row, 3, *order_id)?;
    sheet.write_string(row, 4, *date)?;
    sheet.write_string(row, 5, *customer)?;
  }

  workbook.save_to_buffer()
}
