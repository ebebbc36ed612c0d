pub mod create_product;
pub mod delete_product;
pub mod get_product;
pub mod list_products;
pub mod low_stock_products;
pub mod update_product;

pub use create_product::{CreateProductCommand, CreateProductUseCase};
pub use delete_product::{DeleteProductCommand, DeleteProductUseCase};
pub use get_product::{GetProductCommand, GetProductUseCase};
pub use list_products::{ListProductsCommand, ListProductsResponse, ListProductsUseCase, ProductDto};
pub use low_stock_products::{LowStockProductsCommand, LowStockProductsUseCase};
pub use update_product::{UpdateProductCommand, UpdateProductUseCase};
