use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::{
  adapters::http::{errors::ApiError, middleware::SessionExt},
  application::business::*,
  domain::business::BusinessProfileData,
};

/// Profile printed on the caller's documents
/// GET /api/business-profile
pub async fn get_business_profile_handler(
  use_case: web::Data<Arc<GetBusinessProfileUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let command = GetBusinessProfileCommand {
    session: http_req.session(),
  };

  let profile = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(profile))
}

/// PUT /api/business-profile
pub async fn update_business_profile_handler(
  request: web::Json<BusinessProfileData>,
  use_case: web::Data<Arc<UpdateBusinessProfileUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let command = UpdateBusinessProfileCommand {
    session: http_req.session(),
    data: request.into_inner(),
  };

  let profile = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(profile))
}
