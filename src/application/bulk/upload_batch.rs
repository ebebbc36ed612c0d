use chrono::Utc;
use std::sync::Arc;

use crate::domain::Session;
use crate::domain::bulk::{BulkBatchSummary, BulkUploadError, BulkUploadService};
use crate::domain::invoice::{ImportError, ImportFormat, ItemSource};

#[derive(Debug)]
pub struct UploadBatchCommand {
  pub session: Session,
  pub format: ImportFormat,
  pub content: Vec<u8>,
}

/// Same sources as invoice imports, but the rows land in a stored batch
/// instead of a draft.
pub struct UploadBatchUseCase {
  bulk_service: Arc<BulkUploadService>,
  sources: Vec<Arc<dyn ItemSource>>,
}

impl UploadBatchUseCase {
  pub fn new(bulk_service: Arc<BulkUploadService>, sources: Vec<Arc<dyn ItemSource>>) -> Self {
    Self {
      bulk_service,
      sources,
    }
  }

  pub async fn execute(
    &self,
    command: UploadBatchCommand,
  ) -> Result<BulkBatchSummary, BulkUploadError> {
    let source = self
      .sources
      .iter()
      .find(|source| source.format() == command.format)
      .ok_or_else(|| ImportError::UnsupportedFormat(command.format.as_str().to_string()))?;

    let today = Utc::now().date_naive();
    self
      .bulk_service
      .upload(&command.session, source.as_ref(), &command.content, today)
      .await
      .inspect_err(|e| tracing::warn!("Rejected {} bulk upload: {}", command.format.as_str(), e))
  }
}
