use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::ValidateEmail;

use super::errors::BusinessError;

/// Letterhead, footer defaults and payment details of the invoicing business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessProfile {
  pub owner_id: Option<Uuid>,
  pub name: String,
  pub address: Option<String>,
  pub phone: Option<String>,
  pub email: Option<String>,
  pub payment_instructions: Option<String>,
  pub thank_you_note: Option<String>,
  pub seal_url: Option<String>,
  pub signature_url: Option<String>,
  pub upi_handle: Option<String>,
  pub bank_details: Option<String>,
  pub updated_at: Option<DateTime<Utc>>,
}

impl BusinessProfile {
  pub const PLACEHOLDER_NAME: &'static str = "Your Business Name";

  /// Profile used for guests and for users who have not filled one in yet.
  pub fn placeholder() -> Self {
    Self {
      owner_id: None,
      name: Self::PLACEHOLDER_NAME.to_string(),
      address: None,
      phone: None,
      email: None,
      payment_instructions: None,
      thank_you_note: None,
      seal_url: None,
      signature_url: None,
      upi_handle: None,
      bank_details: None,
      updated_at: None,
    }
  }

  pub fn from_data(owner_id: Uuid, data: BusinessProfileData) -> Result<Self, BusinessError> {
    data.validate()?;
    Ok(Self {
      owner_id: Some(owner_id),
      name: data.name.trim().to_string(),
      address: clean(data.address),
      phone: clean(data.phone),
      email: clean(data.email),
      payment_instructions: clean(data.payment_instructions),
      thank_you_note: clean(data.thank_you_note),
      seal_url: clean(data.seal_url),
      signature_url: clean(data.signature_url),
      upi_handle: clean(data.upi_handle),
      bank_details: clean(data.bank_details),
      updated_at: Some(Utc::now()),
    })
  }

  /// Referenced images, in the order they appear on the page.
  pub fn image_urls(&self) -> Vec<&str> {
    [self.seal_url.as_deref(), self.signature_url.as_deref()]
      .into_iter()
      .flatten()
      .collect()
  }
}

/// Editable profile fields as submitted by the owner.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusinessProfileData {
  pub name: String,
  pub address: Option<String>,
  pub phone: Option<String>,
  pub email: Option<String>,
  pub payment_instructions: Option<String>,
  pub thank_you_note: Option<String>,
  pub seal_url: Option<String>,
  pub signature_url: Option<String>,
  pub upi_handle: Option<String>,
  pub bank_details: Option<String>,
}

impl BusinessProfileData {
  fn validate(&self) -> Result<(), BusinessError> {
    if self.name.trim().is_empty() {
      return Err(BusinessError::Validation(
        "Business name cannot be empty".to_string(),
      ));
    }
    if self.name.trim().chars().count() > 255 {
      return Err(BusinessError::Validation(
        "Business name cannot exceed 255 characters".to_string(),
      ));
    }
    if let Some(email) = self.email.as_deref().map(str::trim) {
      if !email.is_empty() && !email.validate_email() {
        return Err(BusinessError::Validation(format!(
          "'{}' is not a valid email address",
          email
        )));
      }
    }
    Ok(())
  }
}

fn clean(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
}
