use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
  adapters::http::{errors::ApiError, middleware::SessionExt},
  application::invoice::*,
};

use super::success;

/// List the user's saved invoices, newest first
/// GET /api/saved-invoices
pub async fn list_saved_invoices_handler(
  use_case: web::Data<Arc<ListSavedInvoicesUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let command = ListSavedInvoicesCommand {
    session: http_req.session(),
  };

  let response = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(response))
}

/// GET /api/saved-invoices/{id}
pub async fn get_saved_invoice_handler(
  saved_invoice_id: web::Path<Uuid>,
  use_case: web::Data<Arc<GetSavedInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let command = GetSavedInvoiceCommand {
    session: http_req.session(),
    saved_invoice_id: saved_invoice_id.into_inner(),
  };

  let saved = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(saved))
}

/// Load a saved invoice back into an editable document
/// POST /api/saved-invoices/{id}/reopen
pub async fn reopen_saved_invoice_handler(
  saved_invoice_id: web::Path<Uuid>,
  use_case: web::Data<Arc<ReopenSavedInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let command = ReopenSavedInvoiceCommand {
    session: http_req.session(),
    saved_invoice_id: saved_invoice_id.into_inner(),
  };

  let response = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(response))
}

/// DELETE /api/saved-invoices/{id}
pub async fn delete_saved_invoice_handler(
  saved_invoice_id: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteSavedInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let command = DeleteSavedInvoiceCommand {
    session: http_req.session(),
    saved_invoice_id: saved_invoice_id.into_inner(),
  };

  use_case.execute(command).await?;
  Ok(success("Invoice deleted"))
}
