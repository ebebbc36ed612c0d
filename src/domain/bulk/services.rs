use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{ImportError, ItemSource};
use crate::domain::session::Session;

use super::entities::{BulkBatchSummary, BulkItem};
use super::errors::BulkUploadError;
use super::ports::BulkItemRepository;

/// Stores uploaded rows as batches under a fresh batch id, for later
/// invoicing. A batch is all or nothing: one bad row and nothing is stored.
pub struct BulkUploadService {
  bulk_repo: Arc<dyn BulkItemRepository>,
}

impl BulkUploadService {
  pub fn new(bulk_repo: Arc<dyn BulkItemRepository>) -> Self {
    Self { bulk_repo }
  }

  fn owner(session: &Session) -> Result<Uuid, BulkUploadError> {
    session.user_id().ok_or(BulkUploadError::AuthenticationRequired)
  }

  pub async fn upload(
    &self,
    session: &Session,
    source: &dyn ItemSource,
    input: &[u8],
    today: NaiveDate,
  ) -> Result<BulkBatchSummary, BulkUploadError> {
    let owner_id = Self::owner(session)?;
    let batch_id = Uuid::new_v4();
    let created_at = Utc::now();

    let items = source
      .read_rows(input)?
      .into_iter()
      .map(|row| BulkItem::from_row(owner_id, batch_id, row, today, created_at))
      .collect::<Result<Vec<_>, _>>()?;

    let summary = BulkBatchSummary::of(&items).ok_or_else(|| {
      if items.is_empty() {
        BulkUploadError::EmptyBatch
      } else {
        ImportError::OutOfRange("the batch total is too large".to_string()).into()
      }
    })?;

    self.bulk_repo.insert_batch(items).await?;
    tracing::info!(
      "Stored bulk batch {} with {} items",
      summary.batch_id,
      summary.item_count
    );
    Ok(summary)
  }

  pub async fn list_batches(
    &self,
    session: &Session,
  ) -> Result<Vec<BulkBatchSummary>, BulkUploadError> {
    let owner_id = Self::owner(session)?;
    self.bulk_repo.list_batches(owner_id).await
  }

  pub async fn get_batch(
    &self,
    session: &Session,
    batch_id: Uuid,
  ) -> Result<Vec<BulkItem>, BulkUploadError> {
    let owner_id = Self::owner(session)?;
    let items = self.bulk_repo.find_batch(owner_id, batch_id).await?;
    if items.is_empty() {
      return Err(BulkUploadError::BatchNotFound(batch_id));
    }
    Ok(items)
  }

  pub async fn delete_batch(
    &self,
    session: &Session,
    batch_id: Uuid,
  ) -> Result<(), BulkUploadError> {
    let owner_id = Self::owner(session)?;
    match self.bulk_repo.delete_batch(owner_id, batch_id).await? {
      0 => Err(BulkUploadError::BatchNotFound(batch_id)),
      _ => Ok(()),
    }
  }
}


#[cfg(test)]
mod tests {
  use super::fakes::InMemoryBulkItems;
  use super::*;
  use crate::infrastructure::import::CsvItemSource;
  use rust_decimal_macros::dec;

  const UPLOAD: &str = "date,order_id,description,quantity,unit_price,customer_name\n\
                        2024-01-01,ORD-001,Website Development,1,1500.00,John Doe\n\
                        2024-01-02,ORD-002,Logo Design,2,250.00,Jane Smith\n";

  fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
  }

  fn service() -> (BulkUploadService, Arc<InMemoryBulkItems>) {
    let repo = Arc::new(InMemoryBulkItems::default());
    (BulkUploadService::new(repo.clone()), repo)
  }

  #[tokio::test]
  async fn test_upload_stores_batch_with_customers() {
    let (service, repo) = service();
    let session = Session::authenticated(Uuid::new_v4());

    let summary = service
      .upload(&session, &CsvItemSource, UPLOAD.as_bytes(), today())
      .await
      .unwrap();
    assert_eq!(summary.item_count, 2);
    assert_eq!(summary.total_amount, dec!(2000));

    let items = service.get_batch(&session, summary.batch_id).await.unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i.batch_id == summary.batch_id));
    assert_eq!(items[0].customer_name.as_deref(), Some("John Doe"));
    assert_eq!(items[1].customer_name.as_deref(), Some("Jane Smith"));
    assert_eq!(repo.items.lock().unwrap().len(), 2);
  }

  #[tokio::test]
  async fn test_each_upload_gets_its_own_batch() {
    let (service, _) = service();
    let session = Session::authenticated(Uuid::new_v4());

    let first = service
      .upload(&session, &CsvItemSource, UPLOAD.as_bytes(), today())
      .await
      .unwrap();
    let second = service
      .upload(&session, &CsvItemSource, UPLOAD.as_bytes(), today())
      .await
      .unwrap();
    assert_ne!(first.batch_id, second.batch_id);

    let batches = service.list_batches(&session).await.unwrap();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].batch_id, second.batch_id);

    let other = Session::authenticated(Uuid::new_v4());
    assert!(service.list_batches(&other).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_bad_row_stores_nothing() {
    let (service, repo) = service();
    let session = Session::authenticated(Uuid::new_v4());
    let input = "description,quantity,unit_price,customer_name\nGood,1,10,Acme\n,1,10,Acme\n";

    let err = service
      .upload(&session, &CsvItemSource, input.as_bytes(), today())
      .await
      .unwrap_err();
    assert!(matches!(
      err,
      BulkUploadError::Import(ImportError::MissingDescription { row: 2 })
    ));
    assert!(repo.items.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_header_only_upload_is_empty_batch() {
    let (service, repo) = service();
    let session = Session::authenticated(Uuid::new_v4());

    let err = service
      .upload(&session, &CsvItemSource, b"description,quantity,unit_price\n", today())
      .await
      .unwrap_err();
    assert!(matches!(err, BulkUploadError::EmptyBatch));
    assert!(repo.items.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_guest_cannot_upload() {
    let (service, _) = service();
    assert!(matches!(
      service
        .upload(&Session::Guest, &CsvItemSource, UPLOAD.as_bytes(), today())
        .await,
      Err(BulkUploadError::AuthenticationRequired)
    ));
  }

  #[tokio::test]
  async fn test_delete_batch_is_owner_scoped() {
    let (service, _) = service();
    let session = Session::authenticated(Uuid::new_v4());
    let summary = service
      .upload(&session, &CsvItemSource, UPLOAD.as_bytes(), today())
      .await
      .unwrap();

    let other = Session::authenticated(Uuid::new_v4());
    assert!(matches!(
      service.delete_batch(&other, summary.batch_id).await,
      Err(BulkUploadError::BatchNotFound(_))
    ));

    service.delete_batch(&session, summary.batch_id).await.unwrap();
    assert!(matches!(
      service.get_batch(&session, summary.batch_id).await,
      Err(BulkUploadError::BatchNotFound(_))
    ));
  }
}
