pub mod get_business_profile;
pub mod update_business_profile;

pub use get_business_profile::{GetBusinessProfileCommand, GetBusinessProfileUseCase};
pub use update_business_profile::{UpdateBusinessProfileCommand, UpdateBusinessProfileUseCase};
