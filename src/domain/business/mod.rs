pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;

pub use entities::{BusinessProfile, BusinessProfileData};
pub use errors::BusinessError;
pub use ports::BusinessProfileRepository;
pub use services::BusinessService;
