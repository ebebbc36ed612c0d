pub mod bulk;
pub mod business;
pub mod catalog;
pub mod customers;
pub mod imports;
pub mod invoices;
pub mod saved_invoices;

use actix_web::HttpResponse;

use super::dtos::SuccessResponse;

/// Health check
/// GET /health
pub async fn health_check() -> &'static str {
  "OK"
}

pub(crate) fn success(message: impl Into<String>) -> HttpResponse {
  HttpResponse::Ok().json(SuccessResponse {
    message: message.into(),
  })
}
