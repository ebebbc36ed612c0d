pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;

pub use entities::{Product, ProductData, ProductFilter, StockFilter, StockStatus};
pub use errors::CatalogError;
pub use ports::ProductRepository;
pub use services::CatalogService;
