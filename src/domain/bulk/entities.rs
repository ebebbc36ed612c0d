use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::invoice::{ImportError, ImportedRow, Quantity, UnitPrice};

/// One stored row of an uploaded batch. Rows follow the same defaulting and
/// validation rules as items imported into an invoice, and additionally keep
/// the customer they were billed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkItem {
  pub id: Uuid,
  pub owner_id: Uuid,
  pub batch_id: Uuid,
  /// 1-based row number in the uploaded file, blank rows counted.
  pub row: usize,
  pub date: NaiveDate,
  pub order_id: String,
  pub description: String,
  pub quantity: Quantity,
  pub unit_price: UnitPrice,
  pub amount: Decimal,
  pub customer_name: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl BulkItem {
  pub fn from_row(
    owner_id: Uuid,
    batch_id: Uuid,
    row: ImportedRow,
    today: NaiveDate,
    created_at: DateTime<Utc>,
  ) -> Result<Self, ImportError> {
    let number = row.row;
    let customer_name = row.customer_name.clone();
    let item = row.into_line_item(today)?;

    Ok(Self {
      id: Uuid::new_v4(),
      owner_id,
      batch_id,
      row: number,
      date: item.date(),
      order_id: item.reference_id().to_string(),
      description: item.description().to_string(),
      quantity: item.quantity(),
      unit_price: item.unit_price(),
      amount: item.amount(),
      customer_name,
      created_at,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkBatchSummary {
  pub batch_id: Uuid,
  pub item_count: usize,
  pub total_amount: Decimal,
  pub created_at: DateTime<Utc>,
}

impl BulkBatchSummary {
  /// Summarize items that all belong to one batch. `None` for an empty slice
  /// or a total beyond the decimal range.
  pub fn of(items: &[BulkItem]) -> Option<Self> {
    let first = items.first()?;
    let total_amount = items
      .iter()
      .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.amount))?;
    Some(Self {
      batch_id: first.batch_id,
      item_count: items.len(),
      total_amount,
      created_at: first.created_at,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::Cell;
  use crate::domain::invoice::ColumnMap;
  use crate::domain::invoice::import::collect_rows;
  use rust_decimal_macros::dec;

  fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
  }

  fn rows(lines: &[&[&str]]) -> Vec<ImportedRow> {
    let map = ColumnMap::from_headers([
      "date",
      "order_id",
      "description",
      "quantity",
      "unit_price",
      "customer_name",
    ])
    .unwrap();
    let cells = lines.iter().map(|fields| {
      let cells: Vec<Cell> = fields.iter().map(|f| Cell::text(*f)).collect();
      Ok::<_, ImportError>(cells)
    });
    collect_rows(cells, &map).unwrap()
  }

  #[test]
  fn test_from_row_keeps_customer_and_applies_defaults() {
    let owner = Uuid::new_v4();
    let batch = Uuid::new_v4();
    let mut parsed = rows(&[
      &["2024-01-01", "ORD-001", "Website Development", "1", "1500.00", "John Doe"],
      &["", "", "Logo Design", "", "250", ""],
    ])
    .into_iter();

    let first =
      BulkItem::from_row(owner, batch, parsed.next().unwrap(), today(), Utc::now()).unwrap();
    assert_eq!(first.customer_name.as_deref(), Some("John Doe"));
    assert_eq!(first.order_id, "ORD-001");
    assert_eq!(first.amount, dec!(1500));
    assert_eq!(first.row, 1);

    let second =
      BulkItem::from_row(owner, batch, parsed.next().unwrap(), today(), Utc::now()).unwrap();
    assert_eq!(second.customer_name, None);
    assert_eq!(second.date, today());
    assert_eq!(second.quantity.value(), dec!(1));
    assert_eq!(second.amount, dec!(250));
  }

  #[test]
  fn test_from_row_reports_the_row() {
    let row = rows(&[
      &["", "", "", "", "", ""],
      &["2024-01-01", "X", "", "1", "1", "Acme"],
    ])
    .pop()
    .unwrap();
    let err =
      BulkItem::from_row(Uuid::new_v4(), Uuid::new_v4(), row, today(), Utc::now()).unwrap_err();
    assert_eq!(err, ImportError::MissingDescription { row: 2 });
  }

  #[test]
  fn test_summary_totals_batch() {
    let owner = Uuid::new_v4();
    let batch = Uuid::new_v4();
    let items: Vec<BulkItem> = rows(&[
      &["2024-01-01", "ORD-001", "Website Development", "1", "1500.00", "John Doe"],
      &["2024-01-02", "ORD-002", "Logo Design", "2", "250.00", "Jane Smith"],
    ])
    .into_iter()
    .map(|row| BulkItem::from_row(owner, batch, row, today(), Utc::now()).unwrap())
    .collect();

    let summary = BulkBatchSummary::of(&items).unwrap();
    assert_eq!(summary.batch_id, batch);
    assert_eq!(summary.item_count, 2);
    assert_eq!(summary.total_amount, dec!(2000));
    assert!(BulkBatchSummary::of(&[]).is_none());
  }
}
