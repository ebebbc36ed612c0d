use actix_web::{
  HttpRequest, HttpResponse,
  http::header::{ContentDisposition, DispositionParam, DispositionType},
  web,
};
use std::sync::Arc;

use crate::{
  adapters::http::{
    dtos::{DraftRequest, EditInvoiceRequest, PickItemRequest},
    errors::ApiError,
    middleware::SessionExt,
  },
  application::invoice::*,
};

/// Fresh document seeded from the configured and profile defaults
/// POST /api/invoices/new
pub async fn new_invoice_handler(
  use_case: web::Data<Arc<NewInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let command = NewInvoiceCommand {
    session: http_req.session(),
  };

  let response = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(response))
}

/// Apply edits and recompute amounts and totals
/// POST /api/invoices/edit
pub async fn edit_invoice_handler(
  request: web::Json<EditInvoiceRequest>,
  use_case: web::Data<Arc<EditInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let request = request.into_inner();
  let command = EditInvoiceCommand {
    session: http_req.session(),
    draft: request.draft,
    edits: request.edits,
  };

  let response = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(response))
}

/// Add a catalog product as a new line item
/// POST /api/invoices/items/pick
pub async fn pick_catalog_item_handler(
  request: web::Json<PickItemRequest>,
  use_case: web::Data<Arc<PickCatalogItemUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let request = request.into_inner();
  let command = PickCatalogItemCommand {
    session: http_req.session(),
    draft: request.draft,
    product_id: request.product_id,
    quantity: request.quantity,
    date: request.date,
  };

  let response = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(response))
}

/// On-screen HTML preview
/// POST /api/invoices/preview
pub async fn preview_invoice_handler(
  request: web::Json<DraftRequest>,
  use_case: web::Data<Arc<PreviewInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let command = PreviewInvoiceCommand {
    session: http_req.session(),
    draft: request.into_inner().draft,
  };

  let response = use_case.execute(command).await?;
  Ok(
    HttpResponse::Ok()
      .content_type("text/html; charset=utf-8")
      .body(response.html),
  )
}

/// Export the document as a PDF download
/// POST /api/invoices/export
pub async fn export_invoice_handler(
  request: web::Json<DraftRequest>,
  factory: web::Data<Arc<DocumentFactory>>,
  use_case: web::Data<Arc<ExportInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let session = http_req.session();
  let document = factory
    .from_draft(&session, request.into_inner().draft)
    .await?;

  // Snapshot now; anything the client changes later belongs to another export.
  let command = ExportInvoiceCommand::capture(session, &document);
  let response = use_case.execute(command).await?;

  Ok(
    HttpResponse::Ok()
      .content_type("application/pdf")
      .insert_header(ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(response.filename)],
      })
      .body(response.pdf),
  )
}

/// Persist the document as a new saved invoice
/// POST /api/invoices/save
pub async fn save_invoice_handler(
  request: web::Json<DraftRequest>,
  use_case: web::Data<Arc<SaveInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let command = SaveInvoiceCommand {
    session: http_req.session(),
    draft: request.into_inner().draft,
  };

  let response = use_case.execute(command).await?;
  Ok(HttpResponse::Created().json(response))
}
