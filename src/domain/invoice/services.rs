use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::business::BusinessProfile;
use crate::domain::session::Session;

use super::entities::{Customer, InvoiceSnapshot, SavedInvoice};
use super::errors::InvoiceError;
use super::ports::{CustomerRepository, SavedInvoiceRepository};
use super::value_objects::{CustomerEmail, CustomerName};

/// Customer fields as entered by the user
pub struct CustomerData {
  pub name: CustomerName,
  pub email: Option<CustomerEmail>,
  pub address: Option<String>,
  pub phone: Option<String>,
}

pub struct InvoiceService {
  saved_invoice_repo: Arc<dyn SavedInvoiceRepository>,
  customer_repo: Arc<dyn CustomerRepository>,
}

impl InvoiceService {
  pub fn new(
    saved_invoice_repo: Arc<dyn SavedInvoiceRepository>,
    customer_repo: Arc<dyn CustomerRepository>,
  ) -> Self {
    Self {
      saved_invoice_repo,
      customer_repo,
    }
  }

  fn require_user(session: &Session, action: &str) -> Result<Uuid, InvoiceError> {
    session
      .user_id()
      .ok_or_else(|| InvoiceError::AuthenticationRequired(format!("sign in to {}", action)))
  }

  // Saved invoice operations

  /// Persist `snapshot` as a brand new record.
  pub async fn save_invoice(
    &self,
    session: &Session,
    snapshot: &InvoiceSnapshot,
    profile: &BusinessProfile,
  ) -> Result<SavedInvoice, InvoiceError> {
    let owner_id = Self::require_user(session, "save invoices")?;
    let record = SavedInvoice::from_snapshot(owner_id, snapshot, profile, Utc::now());
    self.saved_invoice_repo.create(record).await
  }

  pub async fn list_saved_invoices(
    &self,
    session: &Session,
  ) -> Result<Vec<SavedInvoice>, InvoiceError> {
    let owner_id = Self::require_user(session, "view saved invoices")?;
    self.saved_invoice_repo.find_by_owner(owner_id).await
  }

  pub async fn get_saved_invoice(
    &self,
    session: &Session,
    invoice_id: Uuid,
  ) -> Result<SavedInvoice, InvoiceError> {
    let owner_id = Self::require_user(session, "view saved invoices")?;
    let invoice = self
      .saved_invoice_repo
      .find_by_id(invoice_id)
      .await?
      .ok_or(InvoiceError::InvoiceNotFound(invoice_id))?;

    if invoice.owner_id != owner_id {
      return Err(InvoiceError::PermissionDenied(
        "invoice belongs to another user".to_string(),
      ));
    }
    Ok(invoice)
  }

  pub async fn delete_saved_invoice(
    &self,
    session: &Session,
    invoice_id: Uuid,
  ) -> Result<(), InvoiceError> {
    let invoice = self.get_saved_invoice(session, invoice_id).await?;
    self.saved_invoice_repo.delete(invoice.id).await
  }

  // Customer operations

  pub async fn create_customer(
    &self,
    session: &Session,
    data: CustomerData,
  ) -> Result<Customer, InvoiceError> {
    let owner_id = Self::require_user(session, "manage customers")?;
    let customer = Customer::new(owner_id, data.name, data.email, data.address, data.phone);
    self.customer_repo.create(customer).await
  }

  pub async fn update_customer(
    &self,
    session: &Session,
    customer_id: Uuid,
    data: CustomerData,
  ) -> Result<Customer, InvoiceError> {
    let mut customer = self.get_customer(session, customer_id).await?;
    customer.update(data.name, data.email, data.address, data.phone);
    self.customer_repo.update(customer).await
  }

  pub async fn delete_customer(
    &self,
    session: &Session,
    customer_id: Uuid,
  ) -> Result<(), InvoiceError> {
    let customer = self.get_customer(session, customer_id).await?;
    self.customer_repo.delete(customer.id).await
  }

  pub async fn get_customer(
    &self,
    session: &Session,
    customer_id: Uuid,
  ) -> Result<Customer, InvoiceError> {
    let owner_id = Self::require_user(session, "manage customers")?;
    let customer = self
      .customer_repo
      .find_by_id(customer_id)
      .await?
      .ok_or(InvoiceError::CustomerNotFound(customer_id))?;

    if customer.owner_id != owner_id {
      return Err(InvoiceError::CustomerNotFound(customer_id));
    }
    Ok(customer)
  }

  pub async fn list_customers(&self, session: &Session) -> Result<Vec<Customer>, InvoiceError> {
    let owner_id = Self::require_user(session, "manage customers")?;
    self.customer_repo.find_by_owner(owner_id).await
  }

  /// Case-insensitive name search; a blank query lists everything.
  pub async fn search_customers(
    &self,
    session: &Session,
    query: &str,
  ) -> Result<Vec<Customer>, InvoiceError> {
    let owner_id = Self::require_user(session, "manage customers")?;
    let query = query.trim();
    if query.is_empty() {
      return self.customer_repo.find_by_owner(owner_id).await;
    }
    self.customer_repo.search_by_name(owner_id, query).await
  }
}
