use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::catalog::{CatalogError, Product, ProductRepository};
use crate::domain::invoice::UnitPrice;

use super::customer_repository::escape_like;

const COLUMNS: &str = "id, owner_id, name, sku, description, category, unit, unit_price, \
  cost_price, current_stock, min_stock_level, max_stock_level, is_active, created_at, updated_at";

#[derive(Debug, FromRow)]
struct ProductRow {
  id: Uuid,
  owner_id: Uuid,
  name: String,
  sku: Option<String>,
  description: Option<String>,
  category: Option<String>,
  unit: String,
  unit_price: Decimal,
  cost_price: Option<Decimal>,
  current_stock: i32,
  min_stock_level: i32,
  max_stock_level: Option<i32>,
  is_active: bool,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
  type Error = CatalogError;

  fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
    Ok(Product {
      id: row.id,
      owner_id: row.owner_id,
      name: row.name,
      sku: row.sku,
      description: row.description,
      category: row.category,
      unit: row.unit,
      unit_price: UnitPrice::new(row.unit_price)?,
      cost_price: row.cost_price.map(UnitPrice::new).transpose()?,
      current_stock: row.current_stock,
      min_stock_level: row.min_stock_level,
      max_stock_level: row.max_stock_level,
      is_active: row.is_active,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

pub struct PostgresProductRepository {
  pool: PgPool,
}

impl PostgresProductRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  async fn fetch_many(&self, sql: &str, owner_id: Uuid) -> Result<Vec<Product>, CatalogError> {
    let rows = sqlx::query_as::<_, ProductRow>(sql)
      .bind(owner_id)
      .fetch_all(&self.pool)
      .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
  async fn create(&self, product: Product) -> Result<Product, CatalogError> {
    let sql = format!(
      r#"
            INSERT INTO products (
                id, owner_id, name, sku, description, category, unit, unit_price, cost_price,
                current_stock, min_stock_level, max_stock_level, is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {}
            "#,
      COLUMNS
    );

    let row = sqlx::query_as::<_, ProductRow>(&sql)
      .bind(product.id)
      .bind(product.owner_id)
      .bind(&product.name)
      .bind(&product.sku)
      .bind(&product.description)
      .bind(&product.category)
      .bind(&product.unit)
      .bind(product.unit_price.value())
      .bind(product.cost_price.map(|p| p.value()))
      .bind(product.current_stock)
      .bind(product.min_stock_level)
      .bind(product.max_stock_level)
      .bind(product.is_active)
      .bind(product.created_at)
      .bind(product.updated_at)
      .fetch_one(&self.pool)
      .await?;

    row.try_into()
  }

  async fn update(&self, product: Product) -> Result<Product, CatalogError> {
    let sql = format!(
      r#"
            UPDATE products
            SET name = $2, sku = $3, description = $4, category = $5, unit = $6,
                unit_price = $7, cost_price = $8, current_stock = $9, min_stock_level = $10,
                max_stock_level = $11, is_active = $12, updated_at = $13
            WHERE id = $1
            RETURNING {}
            "#,
      COLUMNS
    );

    let row = sqlx::query_as::<_, ProductRow>(&sql)
      .bind(product.id)
      .bind(&product.name)
      .bind(&product.sku)
      .bind(&product.description)
      .bind(&product.category)
      .bind(&product.unit)
      .bind(product.unit_price.value())
      .bind(product.cost_price.map(|p| p.value()))
      .bind(product.current_stock)
      .bind(product.min_stock_level)
      .bind(product.max_stock_level)
      .bind(product.is_active)
      .bind(product.updated_at)
      .fetch_optional(&self.pool)
      .await?
      .ok_or(CatalogError::ProductNotFound(product.id))?;

    row.try_into()
  }

  async fn delete(&self, id: Uuid) -> Result<(), CatalogError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(CatalogError::ProductNotFound(id));
    }
    Ok(())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, CatalogError> {
    let sql = format!("SELECT {} FROM products WHERE id = $1", COLUMNS);
    let row = sqlx::query_as::<_, ProductRow>(&sql)
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_active_by_owner(&self, owner_id: Uuid) -> Result<Vec<Product>, CatalogError> {
    let sql = format!(
      "SELECT {} FROM products WHERE owner_id = $1 AND is_active ORDER BY LOWER(name) ASC",
      COLUMNS
    );
    self.fetch_many(&sql, owner_id).await
  }

  async fn search(&self, owner_id: Uuid, query: &str) -> Result<Vec<Product>, CatalogError> {
    let sql = format!(
      r#"
            SELECT {}
            FROM products
            WHERE owner_id = $1 AND is_active
              AND (name ILIKE '%' || $2 || '%'
                OR sku ILIKE '%' || $2 || '%'
                OR description ILIKE '%' || $2 || '%')
            ORDER BY LOWER(name) ASC
            LIMIT 50
            "#,
      COLUMNS
    );
    let rows = sqlx::query_as::<_, ProductRow>(&sql)
      .bind(owner_id)
      .bind(escape_like(query))
      .fetch_all(&self.pool)
      .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn find_low_stock(&self, owner_id: Uuid) -> Result<Vec<Product>, CatalogError> {
    let sql = format!(
      r#"
            SELECT {}
            FROM products
            WHERE owner_id = $1 AND is_active AND current_stock <= min_stock_level
            ORDER BY current_stock ASC, LOWER(name) ASC
            "#,
      COLUMNS
    );
    self.fetch_many(&sql, owner_id).await
  }
}
