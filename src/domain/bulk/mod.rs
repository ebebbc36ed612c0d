pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;

pub use entities::{BulkBatchSummary, BulkItem};
pub use errors::BulkUploadError;
pub use ports::BulkItemRepository;
pub use services::BulkUploadService;
