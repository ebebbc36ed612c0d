use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Session;
use crate::domain::bulk::{BulkUploadError, BulkUploadService};

#[derive(Debug)]
pub struct DeleteBatchCommand {
  pub session: Session,
  pub batch_id: Uuid,
}

pub struct DeleteBatchUseCase {
  bulk_service: Arc<BulkUploadService>,
}

impl DeleteBatchUseCase {
  pub fn new(bulk_service: Arc<BulkUploadService>) -> Self {
    Self { bulk_service }
  }

  pub async fn execute(&self, command: DeleteBatchCommand) -> Result<(), BulkUploadError> {
    self
      .bulk_service
      .delete_batch(&command.session, command.batch_id)
      .await?;

    tracing::info!("Deleted bulk batch {}", command.batch_id);
    Ok(())
  }
}
