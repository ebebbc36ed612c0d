use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::invoice::{
  CustomerSnapshot, Discount, DiscountMode, InvoiceError, InvoiceNumber, InvoiceTotals, LineItem,
  SavedInvoice, SavedInvoiceRepository, TaxRate,
};

const COLUMNS: &str = r#"
    id, owner_id, invoice_number, invoice_date,
    customer_id, customer_name, customer_email, customer_address, customer_phone,
    items, subtotal, tax_rate, tax_amount, discount_mode, discount_value, discount_amount, total,
    payment_instructions, thank_you_note, business_name, business_address, business_phone,
    created_at
"#;

#[derive(Debug, FromRow)]
struct SavedInvoiceRow {
  id: Uuid,
  owner_id: Uuid,
  invoice_number: String,
  invoice_date: NaiveDate,
  customer_id: Option<Uuid>,
  customer_name: Option<String>,
  customer_email: Option<String>,
  customer_address: Option<String>,
  customer_phone: Option<String>,
  items: Json<Vec<LineItem>>,
  subtotal: Decimal,
  tax_rate: Decimal,
  tax_amount: Decimal,
  discount_mode: String,
  discount_value: Decimal,
  discount_amount: Decimal,
  total: Decimal,
  payment_instructions: String,
  thank_you_note: String,
  business_name: String,
  business_address: Option<String>,
  business_phone: Option<String>,
  created_at: DateTime<Utc>,
}

impl TryFrom<SavedInvoiceRow> for SavedInvoice {
  type Error = InvoiceError;

  fn try_from(row: SavedInvoiceRow) -> Result<Self, Self::Error> {
    let customer = row.customer_name.map(|name| CustomerSnapshot {
      customer_id: row.customer_id,
      name,
      email: row.customer_email,
      address: row.customer_address,
      phone: row.customer_phone,
    });

    Ok(SavedInvoice {
      id: row.id,
      owner_id: row.owner_id,
      invoice_number: InvoiceNumber::new(row.invoice_number)?,
      date: row.invoice_date,
      customer,
      items: row.items.0,
      tax_rate: TaxRate::new(row.tax_rate)?,
      discount: Discount::new(DiscountMode::from_str(&row.discount_mode)?, row.discount_value)?,
      totals: InvoiceTotals {
        subtotal: row.subtotal,
        tax_amount: row.tax_amount,
        discount_amount: row.discount_amount,
        total: row.total,
      },
      payment_instructions: row.payment_instructions,
      thank_you_note: row.thank_you_note,
      business_name: row.business_name,
      business_address: row.business_address,
      business_phone: row.business_phone,
      created_at: row.created_at,
    })
  }
}

pub struct PostgresSavedInvoiceRepository {
  pool: PgPool,
}

impl PostgresSavedInvoiceRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl SavedInvoiceRepository for PostgresSavedInvoiceRepository {
  async fn create(&self, invoice: SavedInvoice) -> Result<SavedInvoice, InvoiceError> {
    let customer = invoice.customer.as_ref();
    let sql = format!(
      r#"
            INSERT INTO saved_invoices (
                id, owner_id, invoice_number, invoice_date,
                customer_id, customer_name, customer_email, customer_address, customer_phone,
                items, subtotal, tax_rate, tax_amount, discount_mode, discount_value,
                discount_amount, total, payment_instructions, thank_you_note,
                business_name, business_address, business_phone, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    $17, $18, $19, $20, $21, $22, $23)
            RETURNING {}
            "#,
      COLUMNS
    );

    let row = sqlx::query_as::<_, SavedInvoiceRow>(&sql)
      .bind(invoice.id)
      .bind(invoice.owner_id)
      .bind(invoice.invoice_number.value())
      .bind(invoice.date)
      .bind(customer.and_then(|c| c.customer_id))
      .bind(customer.map(|c| c.name.as_str()))
      .bind(customer.and_then(|c| c.email.as_deref()))
      .bind(customer.and_then(|c| c.address.as_deref()))
      .bind(customer.and_then(|c| c.phone.as_deref()))
      .bind(Json(&invoice.items))
      .bind(invoice.totals.subtotal)
      .bind(invoice.tax_rate.value())
      .bind(invoice.totals.tax_amount)
      .bind(invoice.discount.mode().as_str())
      .bind(invoice.discount.value())
      .bind(invoice.totals.discount_amount)
      .bind(invoice.totals.total)
      .bind(&invoice.payment_instructions)
      .bind(&invoice.thank_you_note)
      .bind(&invoice.business_name)
      .bind(&invoice.business_address)
      .bind(&invoice.business_phone)
      .bind(invoice.created_at)
      .fetch_one(&self.pool)
      .await?;

    row.try_into()
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<SavedInvoice>, InvoiceError> {
    let sql = format!("SELECT {} FROM saved_invoices WHERE id = $1", COLUMNS);
    let row = sqlx::query_as::<_, SavedInvoiceRow>(&sql)
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<SavedInvoice>, InvoiceError> {
    let sql = format!(
      "SELECT {} FROM saved_invoices WHERE owner_id = $1 ORDER BY created_at DESC",
      COLUMNS
    );
    let rows = sqlx::query_as::<_, SavedInvoiceRow>(&sql)
      .bind(owner_id)
      .fetch_all(&self.pool)
      .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError> {
    let result = sqlx::query("DELETE FROM saved_invoices WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(InvoiceError::InvoiceNotFound(id));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::business::BusinessProfile;
  use crate::domain::invoice::{DocumentDefaults, InvoiceDocument, Quantity, UnitPrice};
  use crate::infrastructure::persistence::postgres::test_support::setup_test_db;
  use rust_decimal_macros::dec;

  fn saved(owner_id: Uuid) -> SavedInvoice {
    let defaults = DocumentDefaults {
      invoice_number_prefix: "INV-".to_string(),
      tax_rate: TaxRate::new(dec!(10)).unwrap(),
      payment_instructions: "Pay soon".to_string(),
      thank_you_note: "Thanks".to_string(),
    };
    let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut doc = InvoiceDocument::new(&defaults, today, Utc::now());
    doc.set_customer(Some(CustomerSnapshot {
      customer_id: None,
      name: "Walk-in".to_string(),
      ..CustomerSnapshot::default()
    }));
    let items = vec![LineItem::new(
      today,
      "ORD-001".to_string(),
      "Website Development".to_string(),
      Quantity::new(dec!(1)).unwrap(),
      UnitPrice::new(dec!(75000)).unwrap(),
    )];
    doc.absorb(items).unwrap();
    doc.set_discount(Discount::new(DiscountMode::Fixed, dec!(500)).unwrap()).unwrap();

    SavedInvoice::from_snapshot(
      owner_id,
      &doc.snapshot(Utc::now()),
      &BusinessProfile::placeholder(),
      Utc::now(),
    )
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_round_trips_snapshot() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresSavedInvoiceRepository::new(pool);
    let record = saved(Uuid::new_v4());

    repo.create(record.clone()).await.unwrap();
    let found = repo.find_by_id(record.id).await.unwrap().unwrap();

    assert_eq!(found.items, record.items);
    assert_eq!(found.totals.total, dec!(82000));
    assert_eq!(found.discount.mode(), DiscountMode::Fixed);
    assert_eq!(found.customer.unwrap().name, "Walk-in");
    assert_eq!(found.business_name, BusinessProfile::PLACEHOLDER_NAME);
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_list_newest_first_and_delete() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresSavedInvoiceRepository::new(pool);
    let owner = Uuid::new_v4();

    let mut older = saved(owner);
    older.created_at = Utc::now() - chrono::Duration::hours(1);
    let newer = saved(owner);
    repo.create(older.clone()).await.unwrap();
    repo.create(newer.clone()).await.unwrap();

    let list = repo.find_by_owner(owner).await.unwrap();
    assert_eq!(list.iter().map(|i| i.id).collect::<Vec<_>>(), vec![newer.id, older.id]);

    repo.delete(newer.id).await.unwrap();
    assert!(repo.find_by_id(newer.id).await.unwrap().is_none());
    assert!(matches!(
      repo.delete(newer.id).await,
      Err(InvoiceError::InvoiceNotFound(_))
    ));
  }
}
