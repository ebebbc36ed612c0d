pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{ErrorResponse, SuccessResponse};
pub use errors::ApiError;
pub use handlers::health_check;
pub use middleware::{SessionExt, SessionMiddleware};
pub use routes::{
  InvoiceRouteDependencies, configure_bulk_routes, configure_business_routes,
  configure_catalog_routes, configure_customer_routes, configure_invoice_routes,
  configure_saved_invoice_routes, configure_template_routes,
};
