use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::business::{BusinessError, BusinessProfile, BusinessProfileRepository};

#[derive(Debug, FromRow)]
struct BusinessProfileRow {
  owner_id: Uuid,
  name: String,
  address: Option<String>,
  phone: Option<String>,
  email: Option<String>,
  payment_instructions: Option<String>,
  thank_you_note: Option<String>,
  seal_url: Option<String>,
  signature_url: Option<String>,
  upi_handle: Option<String>,
  bank_details: Option<String>,
  updated_at: DateTime<Utc>,
}

impl From<BusinessProfileRow> for BusinessProfile {
  fn from(row: BusinessProfileRow) -> Self {
    BusinessProfile {
      owner_id: Some(row.owner_id),
      name: row.name,
      address: row.address,
      phone: row.phone,
      email: row.email,
      payment_instructions: row.payment_instructions,
      thank_you_note: row.thank_you_note,
      seal_url: row.seal_url,
      signature_url: row.signature_url,
      upi_handle: row.upi_handle,
      bank_details: row.bank_details,
      updated_at: Some(row.updated_at),
    }
  }
}

pub struct PostgresBusinessProfileRepository {
  pool: PgPool,
}

impl PostgresBusinessProfileRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl BusinessProfileRepository for PostgresBusinessProfileRepository {
  async fn find_by_owner(&self, owner_id: Uuid) -> Result<Option<BusinessProfile>, BusinessError> {
    let row = sqlx::query_as::<_, BusinessProfileRow>(
      r#"
            SELECT owner_id, name, address, phone, email, payment_instructions, thank_you_note,
                   seal_url, signature_url, upi_handle, bank_details, updated_at
            FROM business_profiles
            WHERE owner_id = $1
            "#,
    )
    .bind(owner_id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn upsert(&self, profile: BusinessProfile) -> Result<BusinessProfile, BusinessError> {
    let owner_id = profile
      .owner_id
      .ok_or_else(|| BusinessError::Validation("profile has no owner".to_string()))?;

    let row = sqlx::query_as::<_, BusinessProfileRow>(
      r#"
            INSERT INTO business_profiles (
                owner_id, name, address, phone, email, payment_instructions, thank_you_note,
                seal_url, signature_url, upi_handle, bank_details, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, COALESCE($12, NOW()))
            ON CONFLICT (owner_id) DO UPDATE SET
                name = EXCLUDED.name,
                address = EXCLUDED.address,
                phone = EXCLUDED.phone,
                email = EXCLUDED.email,
                payment_instructions = EXCLUDED.payment_instructions,
                thank_you_note = EXCLUDED.thank_you_note,
                seal_url = EXCLUDED.seal_url,
                signature_url = EXCLUDED.signature_url,
                upi_handle = EXCLUDED.upi_handle,
                bank_details = EXCLUDED.bank_details,
                updated_at = EXCLUDED.updated_at
            RETURNING owner_id, name, address, phone, email, payment_instructions, thank_you_note,
                      seal_url, signature_url, upi_handle, bank_details, updated_at
            "#,
    )
    .bind(owner_id)
    .bind(&profile.name)
    .bind(&profile.address)
    .bind(&profile.phone)
    .bind(&profile.email)
    .bind(&profile.payment_instructions)
    .bind(&profile.thank_you_note)
    .bind(&profile.seal_url)
    .bind(&profile.signature_url)
    .bind(&profile.upi_handle)
    .bind(&profile.bank_details)
    .bind(profile.updated_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }
}
