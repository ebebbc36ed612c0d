use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Session;
use crate::domain::catalog::{CatalogError, CatalogService};

#[derive(Debug)]
pub struct DeleteProductCommand {
  pub session: Session,
  pub product_id: Uuid,
}

pub struct DeleteProductUseCase {
  catalog_service: Arc<CatalogService>,
}

impl DeleteProductUseCase {
  pub fn new(catalog_service: Arc<CatalogService>) -> Self {
    Self { catalog_service }
  }

  pub async fn execute(&self, command: DeleteProductCommand) -> Result<(), CatalogError> {
    self
      .catalog_service
      .delete_product(&command.session, command.product_id)
      .await?;

    tracing::info!("Deleted product {}", command.product_id);
    Ok(())
  }
}
