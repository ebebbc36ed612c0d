use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, web};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
  adapters::http::{
    dtos::{BulkUploadRequest, ImportQuery},
    errors::ApiError,
    middleware::SessionExt,
  },
  application::bulk::{
    DeleteBatchCommand, DeleteBatchUseCase, GetBatchCommand, GetBatchUseCase, ListBatchesCommand,
    ListBatchesUseCase, UploadBatchCommand, UploadBatchUseCase,
  },
  domain::invoice::{ImportError, ImportFormat},
};

use super::imports::{body_content, read_upload};
use super::success;

/// Store an uploaded batch from a JSON body
/// POST /api/bulk-uploads
pub async fn upload_batch_handler(
  request: web::Json<BulkUploadRequest>,
  use_case: web::Data<Arc<UploadBatchUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let request = request.into_inner();
  let command = UploadBatchCommand {
    session: http_req.session(),
    format: ImportFormat::from_str(&request.format)?,
    content: body_content(request.content, request.content_base64)?,
  };

  let summary = use_case.execute(command).await?;
  Ok(HttpResponse::Created().json(summary))
}

/// Store an uploaded batch from a multipart file
/// POST /api/bulk-uploads/upload
pub async fn upload_batch_file_handler(
  query: web::Query<ImportQuery>,
  payload: Multipart,
  use_case: web::Data<Arc<UploadBatchUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let upload = read_upload(payload).await?;
  let format = upload.resolve_format(query.into_inner().format)?;

  let command = UploadBatchCommand {
    session: http_req.session(),
    format,
    content: upload.content.ok_or(ImportError::EmptyInput)?,
  };

  let summary = use_case.execute(command).await?;
  Ok(HttpResponse::Created().json(summary))
}

/// GET /api/bulk-uploads
pub async fn list_batches_handler(
  use_case: web::Data<Arc<ListBatchesUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(ListBatchesCommand {
      session: http_req.session(),
    })
    .await?;
  Ok(HttpResponse::Ok().json(response))
}

/// GET /api/bulk-uploads/{batch_id}
pub async fn get_batch_handler(
  batch_id: web::Path<Uuid>,
  use_case: web::Data<Arc<GetBatchUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(GetBatchCommand {
      session: http_req.session(),
      batch_id: batch_id.into_inner(),
    })
    .await?;
  Ok(HttpResponse::Ok().json(response))
}

/// DELETE /api/bulk-uploads/{batch_id}
pub async fn delete_batch_handler(
  batch_id: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteBatchUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  use_case
    .execute(DeleteBatchCommand {
      session: http_req.session(),
      batch_id: batch_id.into_inner(),
    })
    .await?;
  Ok(success("Batch deleted"))
}
