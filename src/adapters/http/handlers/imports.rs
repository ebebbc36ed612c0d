use actix_multipart::Multipart;
use actix_web::{
  HttpRequest, HttpResponse,
  http::header::{ContentDisposition, DispositionParam, DispositionType},
  web,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use futures_util::StreamExt;
use std::str::FromStr;
use std::sync::Arc;

use crate::{
  adapters::http::{
    dtos::{ImportQuery, ImportRequest},
    errors::ApiError,
    middleware::SessionExt,
  },
  application::invoice::{ImportItemsCommand, ImportItemsUseCase, InvoiceDraft},
  domain::invoice::{ImportError, ImportFormat},
  infrastructure::import::template_for,
};

/// Uploads bigger than this are refused before parsing.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Import line items from a JSON body
/// POST /api/invoices/import
pub async fn import_items_handler(
  request: web::Json<ImportRequest>,
  use_case: web::Data<Arc<ImportItemsUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let request = request.into_inner();
  let format = ImportFormat::from_str(&request.format)?;
  let content = body_content(request.content, request.content_base64)?;

  let command = ImportItemsCommand {
    session: http_req.session(),
    draft: request.draft,
    format,
    content,
  };

  let response = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(response))
}

/// Import line items from a multipart file upload
/// POST /api/invoices/import/upload
///
/// Parts: `file` (required), `draft` (JSON, optional) and `format`
/// (optional, otherwise taken from `?format=` or guessed from the file name).
pub async fn upload_items_handler(
  query: web::Query<ImportQuery>,
  payload: Multipart,
  use_case: web::Data<Arc<ImportItemsUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let upload = read_upload(payload).await?;
  let format = upload.resolve_format(query.into_inner().format)?;

  let command = ImportItemsCommand {
    session: http_req.session(),
    draft: upload.draft,
    format,
    content: upload.content.ok_or(ImportError::EmptyInput)?,
  };

  let response = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(response))
}

/// Download a starter file for one of the import formats
/// GET /api/import-templates/{format}
pub async fn download_template_handler(format: web::Path<String>) -> Result<HttpResponse, ApiError> {
  let format = ImportFormat::from_str(&format)?;
  let template = template_for(format).map_err(|e| ApiError::Internal(e.to_string()))?;

  Ok(
    HttpResponse::Ok()
      .content_type(template.content_type)
      .insert_header(ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(template.filename.to_string())],
      })
      .body(template.bytes),
  )
}

/// Text travels as-is in `content`, binary workbooks base64-encoded.
pub(crate) fn body_content(
  content: Option<String>,
  content_base64: Option<String>,
) -> Result<Vec<u8>, ApiError> {
  match (content, content_base64) {
    (Some(text), _) => Ok(text.into_bytes()),
    (None, Some(encoded)) => STANDARD
      .decode(encoded.trim())
      .map_err(|e| ApiError::Validation(format!("content_base64 is not valid base64: {}", e))),
    (None, None) => Err(ImportError::EmptyInput.into()),
  }
}

#[derive(Default)]
pub(crate) struct Upload {
  pub draft: InvoiceDraft,
  pub format: Option<String>,
  pub filename: Option<String>,
  pub content: Option<Vec<u8>>,
}

impl Upload {
  /// The `format` part wins over `?format=`; failing both, the file name decides.
  pub fn resolve_format(&self, query_format: Option<String>) -> Result<ImportFormat, ApiError> {
    match self.format.clone().or(query_format) {
      Some(format) => Ok(ImportFormat::from_str(&format)?),
      None => self
        .filename
        .as_deref()
        .and_then(ImportFormat::from_filename)
        .ok_or_else(|| {
          ImportError::UnsupportedFormat(self.filename.clone().unwrap_or_default()).into()
        }),
    }
  }
}

pub(crate) async fn read_upload(mut payload: Multipart) -> Result<Upload, ApiError> {
  let mut upload = Upload::default();

  while let Some(field) = payload.next().await {
    let mut field =
      field.map_err(|e| ApiError::Validation(format!("Malformed upload: {}", e)))?;
    let disposition = field.content_disposition().cloned();
    let name = disposition
      .as_ref()
      .and_then(|cd| cd.get_name())
      .unwrap_or_default()
      .to_string();

    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
      let chunk = chunk.map_err(|e| ApiError::Validation(format!("Malformed upload: {}", e)))?;
      if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
        return Err(ApiError::Validation(format!(
          "Upload exceeds {} MB",
          MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
      }
      bytes.extend_from_slice(&chunk);
    }

    match name.as_str() {
      "file" => {
        upload.filename = disposition
          .as_ref()
          .and_then(|cd| cd.get_filename())
          .map(str::to_string);
        upload.content = Some(bytes);
      }
      "draft" => {
        upload.draft = serde_json::from_slice(&bytes)
          .map_err(|e| ApiError::Validation(format!("Invalid draft: {}", e)))?;
      }
      "format" => {
        upload.format = Some(String::from_utf8_lossy(&bytes).trim().to_string());
      }
      other => tracing::debug!("Ignoring upload part '{}'", other),
    }
  }

  Ok(upload)
}
