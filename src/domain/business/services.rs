use std::sync::Arc;

use crate::domain::session::Session;

use super::entities::{BusinessProfile, BusinessProfileData};
use super::errors::BusinessError;
use super::ports::BusinessProfileRepository;

pub struct BusinessService {
  profile_repo: Arc<dyn BusinessProfileRepository>,
}

impl BusinessService {
  pub fn new(profile_repo: Arc<dyn BusinessProfileRepository>) -> Self {
    Self { profile_repo }
  }

  /// Profile to print on documents for this session. Never fails for guests.
  pub async fn profile_for(&self, session: &Session) -> Result<BusinessProfile, BusinessError> {
    let Some(owner_id) = session.user_id() else {
      return Ok(BusinessProfile::placeholder());
    };

    let profile = self.profile_repo.find_by_owner(owner_id).await?;
    Ok(profile.unwrap_or_else(|| BusinessProfile {
      owner_id: Some(owner_id),
      ..BusinessProfile::placeholder()
    }))
  }

  pub async fn update_profile(
    &self,
    session: &Session,
    data: BusinessProfileData,
  ) -> Result<BusinessProfile, BusinessError> {
    let owner_id = session
      .user_id()
      .ok_or(BusinessError::AuthenticationRequired)?;

    let profile = BusinessProfile::from_data(owner_id, data)?;
    let saved = self.profile_repo.upsert(profile).await?;
    tracing::info!("Business profile updated for user {}", owner_id);
    Ok(saved)
  }
}
