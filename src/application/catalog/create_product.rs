use std::sync::Arc;

use crate::domain::Session;
use crate::domain::catalog::{CatalogError, CatalogService, ProductData};

use super::list_products::ProductDto;

#[derive(Debug)]
pub struct CreateProductCommand {
  pub session: Session,
  pub data: ProductData,
}

pub struct CreateProductUseCase {
  catalog_service: Arc<CatalogService>,
}

impl CreateProductUseCase {
  pub fn new(catalog_service: Arc<CatalogService>) -> Self {
    Self { catalog_service }
  }

  pub async fn execute(&self, command: CreateProductCommand) -> Result<ProductDto, CatalogError> {
    let product = self
      .catalog_service
      .create_product(&command.session, command.data)
      .await?;

    tracing::info!("Created product {} ({})", product.id, product.name);
    Ok(product.into())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::catalog::{
    DeleteProductCommand, DeleteProductUseCase, GetProductCommand, GetProductUseCase,
    ListProductsCommand, ListProductsUseCase, LowStockProductsCommand, LowStockProductsUseCase,
    UpdateProductCommand, UpdateProductUseCase,
  };
  use crate::domain::catalog::{ProductFilter, StockStatus};
  use crate::domain::catalog::entities::sample_data;
  use crate::domain::catalog::services::fakes::InMemoryProducts;
  use uuid::Uuid;

  fn service() -> Arc<CatalogService> {
    Arc::new(CatalogService::new(Arc::new(InMemoryProducts::default())))
  }

  #[tokio::test]
  async fn test_product_lifecycle() {
    let service = service();
    let session = Session::authenticated(Uuid::new_v4());

    let widget = CreateProductUseCase::new(service.clone())
      .execute(CreateProductCommand {
        session,
        data: sample_data("Widget", 10, 2),
      })
      .await
      .unwrap();
    assert_eq!(widget.stock_status, StockStatus::InStock);
    assert_eq!(widget.unit, "pcs");

    CreateProductUseCase::new(service.clone())
      .execute(CreateProductCommand {
        session,
        data: sample_data("Gadget", 2, 5),
      })
      .await
      .unwrap();

    let updated = UpdateProductUseCase::new(service.clone())
      .execute(UpdateProductCommand {
        session,
        product_id: widget.id,
        data: sample_data("Widget", 0, 2),
      })
      .await
      .unwrap();
    assert_eq!(updated.stock_status, StockStatus::OutOfStock);

    let low = LowStockProductsUseCase::new(service.clone())
      .execute(LowStockProductsCommand { session })
      .await
      .unwrap();
    assert_eq!(low.products.len(), 2);

    let listed = ListProductsUseCase::new(service.clone())
      .execute(ListProductsCommand {
        session,
        query: Some("gadg".to_string()),
        filter: ProductFilter::default(),
      })
      .await
      .unwrap();
    assert_eq!(listed.products.len(), 1);

    DeleteProductUseCase::new(service.clone())
      .execute(DeleteProductCommand {
        session,
        product_id: widget.id,
      })
      .await
      .unwrap();
    let gone = GetProductUseCase::new(service)
      .execute(GetProductCommand {
        session,
        product_id: widget.id,
      })
      .await;
    assert!(matches!(gone, Err(CatalogError::ProductNotFound(_))));
  }

  #[tokio::test]
  async fn test_negative_price_is_rejected() {
    let mut data = sample_data("Widget", 1, 0);
    data.unit_price = rust_decimal::Decimal::NEGATIVE_ONE;
    let result = CreateProductUseCase::new(service())
      .execute(CreateProductCommand {
        session: Session::authenticated(Uuid::new_v4()),
        data,
      })
      .await;
    assert!(result.is_err());
  }
}
