pub mod bulk;
pub mod business;
pub mod catalog;
pub mod invoice;
pub mod session;

pub use session::Session;
