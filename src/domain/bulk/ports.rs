use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{BulkBatchSummary, BulkItem};
use super::errors::BulkUploadError;

#[async_trait]
pub trait BulkItemRepository: Send + Sync {
  /// Stores every item or none of them.
  async fn insert_batch(&self, items: Vec<BulkItem>) -> Result<Vec<BulkItem>, BulkUploadError>;
  /// Items of one batch in upload order.
  async fn find_batch(&self, owner_id: Uuid, batch_id: Uuid)
  -> Result<Vec<BulkItem>, BulkUploadError>;
  /// Newest batch first.
  async fn list_batches(&self, owner_id: Uuid) -> Result<Vec<BulkBatchSummary>, BulkUploadError>;
  /// Returns how many items were removed.
  async fn delete_batch(&self, owner_id: Uuid, batch_id: Uuid) -> Result<u64, BulkUploadError>;
}
