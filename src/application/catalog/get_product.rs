use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Session;
use crate::domain::catalog::{CatalogError, CatalogService};

use super::list_products::ProductDto;

#[derive(Debug)]
pub struct GetProductCommand {
  pub session: Session,
  pub product_id: Uuid,
}

pub struct GetProductUseCase {
  catalog_service: Arc<CatalogService>,
}

impl GetProductUseCase {
  pub fn new(catalog_service: Arc<CatalogService>) -> Self {
    Self { catalog_service }
  }

  pub async fn execute(&self, command: GetProductCommand) -> Result<ProductDto, CatalogError> {
    let product = self
      .catalog_service
      .get_product(&command.session, command.product_id)
      .await?;
    Ok(product.into())
  }
}
