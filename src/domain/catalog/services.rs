use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::LineItem;
use crate::domain::session::Session;

use super::entities::{Product, ProductData, ProductFilter};
use super::errors::CatalogError;
use super::ports::ProductRepository;

pub struct CatalogService {
  product_repo: Arc<dyn ProductRepository>,
}

impl CatalogService {
  pub fn new(product_repo: Arc<dyn ProductRepository>) -> Self {
    Self { product_repo }
  }

  fn owner(session: &Session) -> Result<Uuid, CatalogError> {
    session.user_id().ok_or(CatalogError::AuthenticationRequired)
  }

  pub async fn create_product(
    &self,
    session: &Session,
    data: ProductData,
  ) -> Result<Product, CatalogError> {
    let owner_id = Self::owner(session)?;
    let product = Product::new(owner_id, data)?;
    self.product_repo.create(product).await
  }

  pub async fn update_product(
    &self,
    session: &Session,
    product_id: Uuid,
    data: ProductData,
  ) -> Result<Product, CatalogError> {
    let mut product = self.get_product(session, product_id).await?;
    product.update(data)?;
    self.product_repo.update(product).await
  }

  pub async fn delete_product(&self, session: &Session, product_id: Uuid) -> Result<(), CatalogError> {
    let product = self.get_product(session, product_id).await?;
    self.product_repo.delete(product.id).await
  }

  pub async fn get_product(
    &self,
    session: &Session,
    product_id: Uuid,
  ) -> Result<Product, CatalogError> {
    let owner_id = Self::owner(session)?;
    self
      .product_repo
      .find_by_id(product_id)
      .await?
      .filter(|product| product.owner_id == owner_id)
      .ok_or(CatalogError::ProductNotFound(product_id))
  }

  pub async fn list_products(&self, session: &Session) -> Result<Vec<Product>, CatalogError> {
    let owner_id = Self::owner(session)?;
    self.product_repo.find_active_by_owner(owner_id).await
  }

  pub async fn search_products(
    &self,
    session: &Session,
    query: &str,
  ) -> Result<Vec<Product>, CatalogError> {
    let owner_id = Self::owner(session)?;
    let query = query.trim();
    if query.is_empty() {
      return self.product_repo.find_active_by_owner(owner_id).await;
    }
    self.product_repo.search(owner_id, query).await
  }

  /// Text search narrowed by category and stock level.
  pub async fn filter_products(
    &self,
    session: &Session,
    query: Option<&str>,
    filter: &ProductFilter,
  ) -> Result<Vec<Product>, CatalogError> {
    let products = match query {
      Some(query) => self.search_products(session, query).await?,
      None => self.list_products(session).await?,
    };
    Ok(products.into_iter().filter(|p| filter.matches(p)).collect())
  }

  pub async fn low_stock_products(&self, session: &Session) -> Result<Vec<Product>, CatalogError> {
    let owner_id = Self::owner(session)?;
    self.product_repo.find_low_stock(owner_id).await
  }

  pub async fn pick(
    &self,
    session: &Session,
    product_id: Uuid,
    quantity: Decimal,
    date: NaiveDate,
  ) -> Result<LineItem, CatalogError> {
    let product = self.get_product(session, product_id).await?;
    product.pick(quantity, date)
  }
}

#[cfg(test)]
pub(crate) mod fakes {
  use super::*;
  use async_trait::async_trait;
  use std::sync::Mutex;

  #[derive(Default)]
  pub struct InMemoryProducts {
    pub products: Mutex<Vec<Product>>,
  }

  impl InMemoryProducts {
    fn owned_by(&self, owner_id: Uuid) -> Vec<Product> {
      let mut found: Vec<Product> = self
        .products
        .lock()
        .unwrap()
        .iter()
        .filter(|p| p.owner_id == owner_id && p.is_active)
        .cloned()
        .collect();
      found.sort_by(|a, b| a.name.cmp(&b.name));
      found
    }
  }

  #[async_trait]
  impl ProductRepository for InMemoryProducts {
    async fn create(&self, product: Product) -> Result<Product, CatalogError> {
      self.products.lock().unwrap().push(product.clone());
      Ok(product)
    }

    async fn update(&self, product: Product) -> Result<Product, CatalogError> {
      let mut products = self.products.lock().unwrap();
      let slot = products
        .iter_mut()
        .find(|p| p.id == product.id)
        .ok_or(CatalogError::ProductNotFound(product.id))?;
      *slot = product.clone();
      Ok(product)
    }

    async fn delete(&self, id: Uuid) -> Result<(), CatalogError> {
      self.products.lock().unwrap().retain(|p| p.id != id);
      Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, CatalogError> {
      Ok(
        self
          .products
          .lock()
          .unwrap()
          .iter()
          .find(|p| p.id == id)
          .cloned(),
      )
    }

    async fn find_active_by_owner(&self, owner_id: Uuid) -> Result<Vec<Product>, CatalogError> {
      Ok(self.owned_by(owner_id))
    }

    async fn search(&self, owner_id: Uuid, query: &str) -> Result<Vec<Product>, CatalogError> {
      let needle = query.to_lowercase();
      let contains = |field: &Option<String>| {
        field
          .as_deref()
          .is_some_and(|v| v.to_lowercase().contains(&needle))
      };
      Ok(
        self
          .owned_by(owner_id)
          .into_iter()
          .filter(|p| {
            p.name.to_lowercase().contains(&needle) || contains(&p.sku) || contains(&p.description)
          })
          .collect(),
      )
    }

    async fn find_low_stock(&self, owner_id: Uuid) -> Result<Vec<Product>, CatalogError> {
      Ok(
        self
          .owned_by(owner_id)
          .into_iter()
          .filter(|p| p.current_stock <= p.min_stock_level)
          .collect(),
      )
    }
  }
}

#[cfg(test)]
mod tests {
  use super::fakes::InMemoryProducts;
  use super::*;
  use crate::domain::catalog::StockFilter;
  use crate::domain::catalog::entities::sample_data;
  use rust_decimal_macros::dec;

  fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
  }

  #[tokio::test]
  async fn test_guest_has_no_catalog() {
    let service = CatalogService::new(Arc::new(InMemoryProducts::default()));
    assert!(matches!(
      service.list_products(&Session::Guest).await,
      Err(CatalogError::AuthenticationRequired)
    ));
  }

  #[tokio::test]
  async fn test_search_and_low_stock() {
    let service = CatalogService::new(Arc::new(InMemoryProducts::default()));
    let session = Session::authenticated(Uuid::new_v4());

    service
      .create_product(&session, sample_data("Printer Paper", 100, 10))
      .await
      .unwrap();
    let mut toner = sample_data("Toner", 2, 5);
    toner.sku = Some("TN-450".to_string());
    service.create_product(&session, toner).await.unwrap();

    let by_sku = service.search_products(&session, "tn-4").await.unwrap();
    assert_eq!(by_sku.len(), 1);
    assert_eq!(by_sku[0].name, "Toner");

    let low = service.low_stock_products(&session).await.unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].name, "Toner");

    let all = service.list_products(&session).await.unwrap();
    assert_eq!(all[0].name, "Printer Paper");
  }

  #[tokio::test]
  async fn test_filter_products_combines_search_category_and_stock() {
    let service = CatalogService::new(Arc::new(InMemoryProducts::default()));
    let session = Session::authenticated(Uuid::new_v4());

    for (name, stock, category) in [
      ("Printer Paper", 0, Some("Stationery")),
      ("Paper Clips", 50, Some("Stationery")),
      ("Paper Shredder", 1, Some("Equipment")),
      ("Desk", 0, None),
    ] {
      let mut data = sample_data(name, stock, 5);
      data.category = category.map(str::to_string);
      service.create_product(&session, data).await.unwrap();
    }

    let filter = ProductFilter {
      category: Some("Stationery".to_string()),
      stock: None,
    };
    let stationery = service
      .filter_products(&session, Some("paper"), &filter)
      .await
      .unwrap();
    let names: Vec<&str> = stationery.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Paper Clips", "Printer Paper"]);

    let filter = ProductFilter {
      category: None,
      stock: Some(StockFilter::Out),
    };
    let out = service.filter_products(&session, None, &filter).await.unwrap();
    let names: Vec<&str> = out.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Desk", "Printer Paper"]);
  }

  #[tokio::test]
  async fn test_pick_through_service() {
    let service = CatalogService::new(Arc::new(InMemoryProducts::default()));
    let session = Session::authenticated(Uuid::new_v4());
    let product = service
      .create_product(&session, sample_data("Toner", 3, 1))
      .await
      .unwrap();

    let item = service
      .pick(&session, product.id, dec!(2), today())
      .await
      .unwrap();
    assert_eq!(item.amount(), dec!(500));

    let other = Session::authenticated(Uuid::new_v4());
    assert!(matches!(
      service.pick(&other, product.id, dec!(1), today()).await,
      Err(CatalogError::ProductNotFound(_))
    ));
  }

  #[tokio::test]
  async fn test_update_and_delete() {
    let service = CatalogService::new(Arc::new(InMemoryProducts::default()));
    let session = Session::authenticated(Uuid::new_v4());
    let product = service
      .create_product(&session, sample_data("Toner", 3, 1))
      .await
      .unwrap();

    let mut data = sample_data("Toner XL", 8, 1);
    data.unit_price = dec!(300);
    let updated = service
      .update_product(&session, product.id, data)
      .await
      .unwrap();
    assert_eq!(updated.name, "Toner XL");
    assert_eq!(updated.unit_price.value(), dec!(300));

    service.delete_product(&session, product.id).await.unwrap();
    assert!(service.list_products(&session).await.unwrap().is_empty());
  }
}
