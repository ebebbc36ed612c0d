use std::sync::Arc;

use crate::domain::Session;
use crate::domain::catalog::{CatalogError, CatalogService};

use super::list_products::{ListProductsResponse, ProductDto};

#[derive(Debug)]
pub struct LowStockProductsCommand {
  pub session: Session,
}

/// Active products at or below their minimum stock level.
pub struct LowStockProductsUseCase {
  catalog_service: Arc<CatalogService>,
}

impl LowStockProductsUseCase {
  pub fn new(catalog_service: Arc<CatalogService>) -> Self {
    Self { catalog_service }
  }

  pub async fn execute(
    &self,
    command: LowStockProductsCommand,
  ) -> Result<ListProductsResponse, CatalogError> {
    let products = self
      .catalog_service
      .low_stock_products(&command.session)
      .await?;

    Ok(ListProductsResponse {
      products: products.into_iter().map(ProductDto::from).collect(),
    })
  }
}
