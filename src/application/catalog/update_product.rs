use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Session;
use crate::domain::catalog::{CatalogError, CatalogService, ProductData};

use super::list_products::ProductDto;

#[derive(Debug)]
pub struct UpdateProductCommand {
  pub session: Session,
  pub product_id: Uuid,
  pub data: ProductData,
}

pub struct UpdateProductUseCase {
  catalog_service: Arc<CatalogService>,
}

impl UpdateProductUseCase {
  pub fn new(catalog_service: Arc<CatalogService>) -> Self {
    Self { catalog_service }
  }

  pub async fn execute(&self, command: UpdateProductCommand) -> Result<ProductDto, CatalogError> {
    let product = self
      .catalog_service
      .update_product(&command.session, command.product_id, command.data)
      .await?;
    Ok(product.into())
  }
}
