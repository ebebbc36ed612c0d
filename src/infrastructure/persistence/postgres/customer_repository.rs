use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::invoice::{
  Customer, CustomerEmail, CustomerName, CustomerRepository, InvoiceError,
};

#[derive(Debug, FromRow)]
struct CustomerRow {
  id: Uuid,
  owner_id: Uuid,
  name: String,
  email: Option<String>,
  address: Option<String>,
  phone: Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
  type Error = InvoiceError;

  fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
    Ok(Customer {
      id: row.id,
      owner_id: row.owner_id,
      name: CustomerName::new(row.name)?,
      email: CustomerEmail::parse_optional(row.email)?,
      address: row.address,
      phone: row.phone,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

pub struct PostgresCustomerRepository {
  pool: PgPool,
}

impl PostgresCustomerRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
  async fn create(&self, customer: Customer) -> Result<Customer, InvoiceError> {
    let row = sqlx::query_as::<_, CustomerRow>(
      r#"
            INSERT INTO customers (id, owner_id, name, email, address, phone, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, owner_id, name, email, address, phone, created_at, updated_at
            "#,
    )
    .bind(customer.id)
    .bind(customer.owner_id)
    .bind(customer.name.value())
    .bind(customer.email.as_ref().map(|e| e.value()))
    .bind(&customer.address)
    .bind(&customer.phone)
    .bind(customer.created_at)
    .bind(customer.updated_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn update(&self, customer: Customer) -> Result<Customer, InvoiceError> {
    let row = sqlx::query_as::<_, CustomerRow>(
      r#"
            UPDATE customers
            SET name = $2, email = $3, address = $4, phone = $5, updated_at = $6
            WHERE id = $1
            RETURNING id, owner_id, name, email, address, phone, created_at, updated_at
            "#,
    )
    .bind(customer.id)
    .bind(customer.name.value())
    .bind(customer.email.as_ref().map(|e| e.value()))
    .bind(&customer.address)
    .bind(&customer.phone)
    .bind(customer.updated_at)
    .fetch_optional(&self.pool)
    .await?
    .ok_or(InvoiceError::CustomerNotFound(customer.id))?;

    row.try_into()
  }

  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError> {
    let result = sqlx::query("DELETE FROM customers WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(InvoiceError::CustomerNotFound(id));
    }
    Ok(())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, InvoiceError> {
    let row = sqlx::query_as::<_, CustomerRow>(
      r#"
            SELECT id, owner_id, name, email, address, phone, created_at, updated_at
            FROM customers
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Customer>, InvoiceError> {
    let rows = sqlx::query_as::<_, CustomerRow>(
      r#"
            SELECT id, owner_id, name, email, address, phone, created_at, updated_at
            FROM customers
            WHERE owner_id = $1
            ORDER BY LOWER(name) ASC
            "#,
    )
    .bind(owner_id)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn search_by_name(
    &self,
    owner_id: Uuid,
    query: &str,
  ) -> Result<Vec<Customer>, InvoiceError> {
    let rows = sqlx::query_as::<_, CustomerRow>(
      r#"
            SELECT id, owner_id, name, email, address, phone, created_at, updated_at
            FROM customers
            WHERE owner_id = $1 AND name ILIKE '%' || $2 || '%'
            ORDER BY LOWER(name) ASC
            LIMIT 50
            "#,
    )
    .bind(owner_id)
    .bind(escape_like(query))
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }
}

/// Treat `%` and `_` in user input literally.
pub(crate) fn escape_like(query: &str) -> String {
  let mut escaped = String::with_capacity(query.len());
  for c in query.trim().chars() {
    if matches!(c, '%' | '_' | '\\') {
      escaped.push('\\');
    }
    escaped.push(c);
  }
  escaped
}
