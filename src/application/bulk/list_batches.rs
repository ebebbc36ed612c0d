use serde::Serialize;
use std::sync::Arc;

use crate::domain::Session;
use crate::domain::bulk::{BulkBatchSummary, BulkUploadError, BulkUploadService};

#[derive(Debug)]
pub struct ListBatchesCommand {
  pub session: Session,
}

#[derive(Debug, Serialize)]
pub struct ListBatchesResponse {
  pub batches: Vec<BulkBatchSummary>,
}

pub struct ListBatchesUseCase {
  bulk_service: Arc<BulkUploadService>,
}

impl ListBatchesUseCase {
  pub fn new(bulk_service: Arc<BulkUploadService>) -> Self {
    Self { bulk_service }
  }

  pub async fn execute(
    &self,
    command: ListBatchesCommand,
  ) -> Result<ListBatchesResponse, BulkUploadError> {
    let batches = self.bulk_service.list_batches(&command.session).await?;
    Ok(ListBatchesResponse { batches })
  }
}
