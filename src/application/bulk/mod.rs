pub mod delete_batch;
pub mod get_batch;
pub mod list_batches;
pub mod upload_batch;

pub use delete_batch::{DeleteBatchCommand, DeleteBatchUseCase};
pub use get_batch::{BulkItemDto, GetBatchCommand, GetBatchResponse, GetBatchUseCase};
pub use list_batches::{ListBatchesCommand, ListBatchesResponse, ListBatchesUseCase};
pub use upload_batch::{UploadBatchCommand, UploadBatchUseCase};
