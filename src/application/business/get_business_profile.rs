use std::sync::Arc;

use crate::domain::Session;
use crate::domain::business::{BusinessError, BusinessProfile, BusinessService};

#[derive(Debug)]
pub struct GetBusinessProfileCommand {
  pub session: Session,
}

pub struct GetBusinessProfileUseCase {
  business_service: Arc<BusinessService>,
}

impl GetBusinessProfileUseCase {
  pub fn new(business_service: Arc<BusinessService>) -> Self {
    Self { business_service }
  }

  /// Guests and users without a stored profile get the placeholder.
  pub async fn execute(
    &self,
    command: GetBusinessProfileCommand,
  ) -> Result<BusinessProfile, BusinessError> {
    self.business_service.profile_for(&command.session).await
  }
}
