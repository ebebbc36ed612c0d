use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Session;
use crate::domain::catalog::CatalogService;
use crate::domain::invoice::{InvoiceDocument, InvoiceError};

use super::draft::{DocumentFactory, InvoiceDraft};

#[derive(Debug)]
pub struct PickCatalogItemCommand {
  pub session: Session,
  pub draft: InvoiceDraft,
  pub product_id: Uuid,
  pub quantity: Decimal,
  pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct PickCatalogItemResponse {
  pub item_id: Uuid,
  pub document: InvoiceDocument,
}

pub struct PickCatalogItemUseCase {
  factory: Arc<DocumentFactory>,
  catalog_service: Arc<CatalogService>,
}

impl PickCatalogItemUseCase {
  pub fn new(factory: Arc<DocumentFactory>, catalog_service: Arc<CatalogService>) -> Self {
    Self {
      factory,
      catalog_service,
    }
  }

  pub async fn execute(
    &self,
    command: PickCatalogItemCommand,
  ) -> Result<PickCatalogItemResponse, InvoiceError> {
    let mut document = self
      .factory
      .from_draft(&command.session, command.draft)
      .await?;

    let date = command.date.unwrap_or_else(|| Utc::now().date_naive());
    let item = self
      .catalog_service
      .pick(&command.session, command.product_id, command.quantity, date)
      .await?;
    let item_id = document.add_item(item)?;

    tracing::debug!(
      "Picked product {} x{} onto invoice {}",
      command.product_id,
      command.quantity,
      document.invoice_number().value()
    );

    Ok(PickCatalogItemResponse { item_id, document })
  }
}
