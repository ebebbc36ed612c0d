use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Session;
use crate::domain::bulk::{BulkItem, BulkUploadError, BulkUploadService};

#[derive(Debug, Clone, Serialize)]
pub struct BulkItemDto {
  pub id: Uuid,
  pub row: usize,
  pub date: NaiveDate,
  pub order_id: String,
  pub description: String,
  pub quantity: Decimal,
  pub unit_price: Decimal,
  pub amount: Decimal,
  pub customer_name: Option<String>,
}

impl From<BulkItem> for BulkItemDto {
  fn from(item: BulkItem) -> Self {
    Self {
      id: item.id,
      row: item.row,
      date: item.date,
      order_id: item.order_id,
      description: item.description,
      quantity: item.quantity.value(),
      unit_price: item.unit_price.value(),
      amount: item.amount,
      customer_name: item.customer_name,
    }
  }
}

#[derive(Debug)]
pub struct GetBatchCommand {
  pub session: Session,
  pub batch_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct GetBatchResponse {
  pub batch_id: Uuid,
  pub items: Vec<BulkItemDto>,
}

pub struct GetBatchUseCase {
  bulk_service: Arc<BulkUploadService>,
}

impl GetBatchUseCase {
  pub fn new(bulk_service: Arc<BulkUploadService>) -> Self {
    Self { bulk_service }
  }

  pub async fn execute(
    &self,
    command: GetBatchCommand,
  ) -> Result<GetBatchResponse, BulkUploadError> {
    let items = self
      .bulk_service
      .get_batch(&command.session, command.batch_id)
      .await?;

    Ok(GetBatchResponse {
      batch_id: command.batch_id,
      items: items.into_iter().map(BulkItemDto::from).collect(),
    })
  }
}
