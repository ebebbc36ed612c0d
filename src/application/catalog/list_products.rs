use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Session;
use crate::domain::catalog::{CatalogError, CatalogService, Product, ProductFilter, StockStatus};

#[derive(Debug, Clone, Serialize)]
pub struct ProductDto {
  pub id: Uuid,
  pub name: String,
  pub sku: Option<String>,
  pub description: Option<String>,
  pub category: Option<String>,
  pub unit: String,
  pub unit_price: Decimal,
  pub cost_price: Option<Decimal>,
  pub current_stock: i32,
  pub min_stock_level: i32,
  pub max_stock_level: Option<i32>,
  pub is_active: bool,
  pub stock_status: StockStatus,
  pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductDto {
  fn from(product: Product) -> Self {
    let stock_status = product.stock_status();
    Self {
      id: product.id,
      name: product.name,
      sku: product.sku,
      description: product.description,
      category: product.category,
      unit: product.unit,
      unit_price: product.unit_price.value(),
      cost_price: product.cost_price.map(|p| p.value()),
      current_stock: product.current_stock,
      min_stock_level: product.min_stock_level,
      max_stock_level: product.max_stock_level,
      is_active: product.is_active,
      stock_status,
      updated_at: product.updated_at,
    }
  }
}

#[derive(Debug)]
pub struct ListProductsCommand {
  pub session: Session,
  /// Matches name, SKU or description; blank lists all active products.
  pub query: Option<String>,
  pub filter: ProductFilter,
}

#[derive(Debug, Serialize)]
pub struct ListProductsResponse {
  pub products: Vec<ProductDto>,
}

pub struct ListProductsUseCase {
  catalog_service: Arc<CatalogService>,
}

impl ListProductsUseCase {
  pub fn new(catalog_service: Arc<CatalogService>) -> Self {
    Self { catalog_service }
  }

  pub async fn execute(
    &self,
    command: ListProductsCommand,
  ) -> Result<ListProductsResponse, CatalogError> {
    let products = self
      .catalog_service
      .filter_products(&command.session, command.query.as_deref(), &command.filter)
      .await?;

    Ok(ListProductsResponse {
      products: products.into_iter().map(ProductDto::from).collect(),
    })
  }
}
