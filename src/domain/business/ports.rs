use async_trait::async_trait;
use uuid::Uuid;

use super::entities::BusinessProfile;
use super::errors::BusinessError;

#[async_trait]
pub trait BusinessProfileRepository: Send + Sync {
  async fn find_by_owner(&self, owner_id: Uuid) -> Result<Option<BusinessProfile>, BusinessError>;
  async fn upsert(&self, profile: BusinessProfile) -> Result<BusinessProfile, BusinessError>;
}
