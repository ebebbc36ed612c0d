use std::sync::Arc;

use crate::domain::Session;
use crate::domain::business::{
  BusinessError, BusinessProfile, BusinessProfileData, BusinessService,
};

#[derive(Debug)]
pub struct UpdateBusinessProfileCommand {
  pub session: Session,
  pub data: BusinessProfileData,
}

pub struct UpdateBusinessProfileUseCase {
  business_service: Arc<BusinessService>,
}

impl UpdateBusinessProfileUseCase {
  pub fn new(business_service: Arc<BusinessService>) -> Self {
    Self { business_service }
  }

  pub async fn execute(
    &self,
    command: UpdateBusinessProfileCommand,
  ) -> Result<BusinessProfile, BusinessError> {
    self
      .business_service
      .update_profile(&command.session, command.data)
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::business::{GetBusinessProfileCommand, GetBusinessProfileUseCase};
  use crate::domain::business::services::fakes::InMemoryProfiles;
  use uuid::Uuid;

  fn service() -> Arc<BusinessService> {
    Arc::new(BusinessService::new(Arc::new(InMemoryProfiles::default())))
  }

  #[tokio::test]
  async fn test_update_then_get() {
    let service = service();
    let session = Session::authenticated(Uuid::new_v4());

    let before = GetBusinessProfileUseCase::new(service.clone())
      .execute(GetBusinessProfileCommand { session })
      .await
      .unwrap();
    assert!(before.updated_at.is_none());

    UpdateBusinessProfileUseCase::new(service.clone())
      .execute(UpdateBusinessProfileCommand {
        session,
        data: BusinessProfileData {
          name: "Acme Studio".to_string(),
          upi_handle: Some("acme@upi".to_string()),
          ..Default::default()
        },
      })
      .await
      .unwrap();

    let after = GetBusinessProfileUseCase::new(service)
      .execute(GetBusinessProfileCommand { session })
      .await
      .unwrap();
    assert_eq!(after.name, "Acme Studio");
    assert_eq!(after.upi_handle.as_deref(), Some("acme@upi"));
  }

  #[tokio::test]
  async fn test_guest_cannot_update() {
    let result = UpdateBusinessProfileUseCase::new(service())
      .execute(UpdateBusinessProfileCommand {
        session: Session::Guest,
        data: BusinessProfileData {
          name: "Acme".to_string(),
          ..Default::default()
        },
      })
      .await;
    assert!(matches!(result, Err(BusinessError::AuthenticationRequired)));
  }
}
