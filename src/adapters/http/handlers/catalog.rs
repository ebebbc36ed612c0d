use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
  adapters::http::{dtos::ProductListQuery, errors::ApiError, middleware::SessionExt},
  application::catalog::*,
  domain::catalog::{ProductData, ProductFilter},
};

use super::success;

/// List active products, optionally filtered by text, category and stock
/// GET /api/products?q=&category=&stock=low|out
pub async fn list_products_handler(
  query: web::Query<ProductListQuery>,
  use_case: web::Data<Arc<ListProductsUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let query = query.into_inner();
  let command = ListProductsCommand {
    session: http_req.session(),
    query: query.q,
    filter: ProductFilter {
      category: query.category,
      stock: query.stock,
    },
  };

  let response = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(response))
}

/// GET /api/products/low-stock
pub async fn low_stock_products_handler(
  use_case: web::Data<Arc<LowStockProductsUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let command = LowStockProductsCommand {
    session: http_req.session(),
  };

  let response = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(response))
}

/// POST /api/products
pub async fn create_product_handler(
  request: web::Json<ProductData>,
  use_case: web::Data<Arc<CreateProductUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let command = CreateProductCommand {
    session: http_req.session(),
    data: request.into_inner(),
  };

  let product = use_case.execute(command).await?;
  Ok(HttpResponse::Created().json(product))
}

/// GET /api/products/{id}
pub async fn get_product_handler(
  product_id: web::Path<Uuid>,
  use_case: web::Data<Arc<GetProductUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let command = GetProductCommand {
    session: http_req.session(),
    product_id: product_id.into_inner(),
  };

  let product = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(product))
}

/// PUT /api/products/{id}
pub async fn update_product_handler(
  product_id: web::Path<Uuid>,
  request: web::Json<ProductData>,
  use_case: web::Data<Arc<UpdateProductUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let command = UpdateProductCommand {
    session: http_req.session(),
    product_id: product_id.into_inner(),
    data: request.into_inner(),
  };

  let product = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(product))
}

/// DELETE /api/products/{id}
pub async fn delete_product_handler(
  product_id: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteProductUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let command = DeleteProductCommand {
    session: http_req.session(),
    product_id: product_id.into_inner(),
  };

  use_case.execute(command).await?;
  Ok(success("Product deleted"))
}
