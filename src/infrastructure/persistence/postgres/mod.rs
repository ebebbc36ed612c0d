pub mod bulk_item_repository;
pub mod business_profile_repository;
pub mod customer_repository;
pub mod product_repository;
pub mod saved_invoice_repository;

#[cfg(test)]
pub(crate) mod test_support;

pub use bulk_item_repository::PostgresBulkItemRepository;
pub use business_profile_repository::PostgresBusinessProfileRepository;
pub use customer_repository::PostgresCustomerRepository;
pub use product_repository::PostgresProductRepository;
pub use saved_invoice_repository::PostgresSavedInvoiceRepository;
