use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::{
  adapters::http::{
    dtos::{CustomerRequest, SearchQuery},
    errors::ApiError,
    middleware::SessionExt,
  },
  application::invoice::*,
};

use super::success;

/// List customers, optionally filtered by name
/// GET /api/customers?q=
pub async fn list_customers_handler(
  query: web::Query<SearchQuery>,
  use_case: web::Data<Arc<ListCustomersUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let command = ListCustomersCommand {
    session: http_req.session(),
    query: query.into_inner().q,
  };

  let response = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(response))
}

/// POST /api/customers
pub async fn create_customer_handler(
  request: web::Json<CustomerRequest>,
  use_case: web::Data<Arc<CreateCustomerUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let command = CreateCustomerCommand {
    session: http_req.session(),
    fields: request.into_inner().into(),
  };

  let customer = use_case.execute(command).await?;
  Ok(HttpResponse::Created().json(customer))
}

/// GET /api/customers/{id}
pub async fn get_customer_handler(
  customer_id: web::Path<Uuid>,
  use_case: web::Data<Arc<GetCustomerUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let command = GetCustomerCommand {
    session: http_req.session(),
    customer_id: customer_id.into_inner(),
  };

  let customer = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(customer))
}

/// PUT /api/customers/{id}
pub async fn update_customer_handler(
  customer_id: web::Path<Uuid>,
  request: web::Json<CustomerRequest>,
  use_case: web::Data<Arc<UpdateCustomerUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let command = UpdateCustomerCommand {
    session: http_req.session(),
    customer_id: customer_id.into_inner(),
    fields: request.into_inner().into(),
  };

  let customer = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(customer))
}

/// DELETE /api/customers/{id}
pub async fn delete_customer_handler(
  customer_id: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteCustomerUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let command = DeleteCustomerCommand {
    session: http_req.session(),
    customer_id: customer_id.into_inner(),
  };

  use_case.execute(command).await?;
  Ok(success("Customer deleted"))
}
