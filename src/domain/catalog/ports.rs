use async_trait::async_trait;
use uuid::Uuid;

use super::entities::Product;
use super::errors::CatalogError;

#[async_trait]
pub trait ProductRepository: Send + Sync {
  async fn create(&self, product: Product) -> Result<Product, CatalogError>;
  async fn update(&self, product: Product) -> Result<Product, CatalogError>;
  async fn delete(&self, id: Uuid) -> Result<(), CatalogError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, CatalogError>;
  async fn find_active_by_owner(&self, owner_id: Uuid) -> Result<Vec<Product>, CatalogError>;
  /// Active products whose name, SKU or description contains `query`, ignoring case.
  async fn search(&self, owner_id: Uuid, query: &str) -> Result<Vec<Product>, CatalogError>;
  async fn find_low_stock(&self, owner_id: Uuid) -> Result<Vec<Product>, CatalogError>;
}
