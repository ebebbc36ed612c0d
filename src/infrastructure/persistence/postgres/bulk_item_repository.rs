use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::bulk::{BulkBatchSummary, BulkItem, BulkItemRepository, BulkUploadError};
use crate::domain::invoice::{Quantity, UnitPrice};

const COLUMNS: &str = "id, owner_id, batch_id, row_number, date, order_id, description, quantity, \
  unit_price, amount, customer_name, created_at";

#[derive(Debug, FromRow)]
struct BulkItemRow {
  id: Uuid,
  owner_id: Uuid,
  batch_id: Uuid,
  row_number: i32,
  date: NaiveDate,
  order_id: String,
  description: String,
  quantity: Decimal,
  unit_price: Decimal,
  amount: Decimal,
  customer_name: Option<String>,
  created_at: DateTime<Utc>,
}

impl TryFrom<BulkItemRow> for BulkItem {
  type Error = BulkUploadError;

  fn try_from(row: BulkItemRow) -> Result<Self, Self::Error> {
    Ok(BulkItem {
      id: row.id,
      owner_id: row.owner_id,
      batch_id: row.batch_id,
      row: usize::try_from(row.row_number).unwrap_or_default(),
      date: row.date,
      order_id: row.order_id,
      description: row.description,
      quantity: Quantity::new(row.quantity)?,
      unit_price: UnitPrice::new(row.unit_price)?,
      amount: row.amount,
      customer_name: row.customer_name,
      created_at: row.created_at,
    })
  }
}

#[derive(Debug, FromRow)]
struct BatchSummaryRow {
  batch_id: Uuid,
  item_count: i64,
  total_amount: Decimal,
  created_at: DateTime<Utc>,
}

impl From<BatchSummaryRow> for BulkBatchSummary {
  fn from(row: BatchSummaryRow) -> Self {
    Self {
      batch_id: row.batch_id,
      item_count: usize::try_from(row.item_count).unwrap_or_default(),
      total_amount: row.total_amount,
      created_at: row.created_at,
    }
  }
}

pub struct PostgresBulkItemRepository {
  pool: PgPool,
}

impl PostgresBulkItemRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl BulkItemRepository for PostgresBulkItemRepository {
  async fn insert_batch(&self, items: Vec<BulkItem>) -> Result<Vec<BulkItem>, BulkUploadError> {
    let mut tx = self.pool.begin().await?;

    for item in &items {
      sqlx::query(
        r#"
            INSERT INTO bulk_invoice_items (
                id, owner_id, batch_id, row_number, date, order_id, description,
                quantity, unit_price, amount, customer_name, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
      )
      .bind(item.id)
      .bind(item.owner_id)
      .bind(item.batch_id)
      .bind(i32::try_from(item.row).unwrap_or(i32::MAX))
      .bind(item.date)
      .bind(&item.order_id)
      .bind(&item.description)
      .bind(item.quantity.value())
      .bind(item.unit_price.value())
      .bind(item.amount)
      .bind(&item.customer_name)
      .bind(item.created_at)
      .execute(&mut *tx)
      .await?;
    }

    tx.commit().await?;
    Ok(items)
  }

  async fn find_batch(
    &self,
    owner_id: Uuid,
    batch_id: Uuid,
  ) -> Result<Vec<BulkItem>, BulkUploadError> {
    let sql = format!(
      r#"
            SELECT {}
            FROM bulk_invoice_items
            WHERE owner_id = $1 AND batch_id = $2
            ORDER BY row_number ASC
            "#,
      COLUMNS
    );
    let rows = sqlx::query_as::<_, BulkItemRow>(&sql)
      .bind(owner_id)
      .bind(batch_id)
      .fetch_all(&self.pool)
      .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn list_batches(&self, owner_id: Uuid) -> Result<Vec<BulkBatchSummary>, BulkUploadError> {
    let rows = sqlx::query_as::<_, BatchSummaryRow>(
      r#"
            SELECT batch_id, COUNT(*) AS item_count, SUM(amount) AS total_amount,
                   MIN(created_at) AS created_at
            FROM bulk_invoice_items
            WHERE owner_id = $1
            GROUP BY batch_id
            ORDER BY MIN(created_at) DESC
            "#,
    )
    .bind(owner_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(BulkBatchSummary::from).collect())
  }

  async fn delete_batch(&self, owner_id: Uuid, batch_id: Uuid) -> Result<u64, BulkUploadError> {
    let result = sqlx::query("DELETE FROM bulk_invoice_items WHERE owner_id = $1 AND batch_id = $2")
      .bind(owner_id)
      .bind(batch_id)
      .execute(&self.pool)
      .await?;

    Ok(result.rows_affected())
  }
}
