use actix_web::web;
use std::sync::Arc;

use crate::application::bulk::{
  DeleteBatchUseCase, GetBatchUseCase, ListBatchesUseCase, UploadBatchUseCase,
};
use crate::application::business::{GetBusinessProfileUseCase, UpdateBusinessProfileUseCase};
use crate::application::catalog::{
  CreateProductUseCase, DeleteProductUseCase, GetProductUseCase, ListProductsUseCase,
  LowStockProductsUseCase, UpdateProductUseCase,
};
use crate::application::invoice::{
  CreateCustomerUseCase, DeleteCustomerUseCase, DeleteSavedInvoiceUseCase, DocumentFactory,
  EditInvoiceUseCase, ExportInvoiceUseCase, GetCustomerUseCase, GetSavedInvoiceUseCase,
  ImportItemsUseCase, ListCustomersUseCase, ListSavedInvoicesUseCase, NewInvoiceUseCase,
  PickCatalogItemUseCase, PreviewInvoiceUseCase, ReopenSavedInvoiceUseCase, SaveInvoiceUseCase,
  UpdateCustomerUseCase,
};

use super::handlers::{bulk, business, catalog, customers, imports, invoices, saved_invoices};

/// Everything the document editing endpoints need
#[derive(Clone)]
pub struct InvoiceRouteDependencies {
  pub factory: Arc<DocumentFactory>,
  pub new_invoice: Arc<NewInvoiceUseCase>,
  pub edit_invoice: Arc<EditInvoiceUseCase>,
  pub pick_catalog_item: Arc<PickCatalogItemUseCase>,
  pub import_items: Arc<ImportItemsUseCase>,
  pub preview_invoice: Arc<PreviewInvoiceUseCase>,
  pub export_invoice: Arc<ExportInvoiceUseCase>,
  pub save_invoice: Arc<SaveInvoiceUseCase>,
}

/// Configure document editing routes
///
/// The server keeps no document state: every request carries the client's
/// current draft and gets the recomputed document back.
///
/// # Routes
///
/// - POST /new - Blank document with defaults applied
/// - POST /edit - Apply edits and recompute totals
/// - POST /items/pick - Add a catalog product as a line item
/// - POST /import - Import items from a JSON body
/// - POST /import/upload - Import items from a multipart upload
/// - POST /preview - Render HTML preview
/// - POST /export - Download the PDF
/// - POST /save - Persist a saved invoice
pub fn configure_invoice_routes(cfg: &mut web::ServiceConfig, deps: InvoiceRouteDependencies) {
  cfg
    .app_data(web::Data::new(deps.factory))
    .app_data(web::Data::new(deps.new_invoice))
    .app_data(web::Data::new(deps.edit_invoice))
    .app_data(web::Data::new(deps.pick_catalog_item))
    .app_data(web::Data::new(deps.import_items))
    .app_data(web::Data::new(deps.preview_invoice))
    .app_data(web::Data::new(deps.export_invoice))
    .app_data(web::Data::new(deps.save_invoice))
    .route("/new", web::post().to(invoices::new_invoice_handler))
    .route("/edit", web::post().to(invoices::edit_invoice_handler))
    .route(
      "/items/pick",
      web::post().to(invoices::pick_catalog_item_handler),
    )
    .route("/import", web::post().to(imports::import_items_handler))
    .route(
      "/import/upload",
      web::post().to(imports::upload_items_handler),
    )
    .route("/preview", web::post().to(invoices::preview_invoice_handler))
    .route("/export", web::post().to(invoices::export_invoice_handler))
    .route("/save", web::post().to(invoices::save_invoice_handler));
}

/// Configure import template downloads
///
/// - GET /{format} - `csv`, `positional` or `xlsx`
pub fn configure_template_routes(cfg: &mut web::ServiceConfig) {
  cfg.route(
    "/{format}",
    web::get().to(imports::download_template_handler),
  );
}

/// Configure saved invoice routes
///
/// # Routes
///
/// - GET / - List saved invoices
/// - GET /{id} - Get one saved invoice
/// - POST /{id}/reopen - Load it into an editable document
/// - DELETE /{id} - Delete it
pub fn configure_saved_invoice_routes(
  cfg: &mut web::ServiceConfig,
  list_use_case: Arc<ListSavedInvoicesUseCase>,
  get_use_case: Arc<GetSavedInvoiceUseCase>,
  reopen_use_case: Arc<ReopenSavedInvoiceUseCase>,
  delete_use_case: Arc<DeleteSavedInvoiceUseCase>,
) {
  cfg
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(get_use_case))
    .app_data(web::Data::new(reopen_use_case))
    .app_data(web::Data::new(delete_use_case))
    .route(
      "",
      web::get().to(saved_invoices::list_saved_invoices_handler),
    )
    .route(
      "/{id}",
      web::get().to(saved_invoices::get_saved_invoice_handler),
    )
    .route(
      "/{id}/reopen",
      web::post().to(saved_invoices::reopen_saved_invoice_handler),
    )
    .route(
      "/{id}",
      web::delete().to(saved_invoices::delete_saved_invoice_handler),
    );
}

/// Configure customer routes
///
/// # Routes
///
/// - GET / - List customers (`?q=` filters by name)
/// - POST / - Create customer
/// - GET /{id} - Get customer
/// - PUT /{id} - Update customer
/// - DELETE /{id} - Delete customer
pub fn configure_customer_routes(
  cfg: &mut web::ServiceConfig,
  list_use_case: Arc<ListCustomersUseCase>,
  create_use_case: Arc<CreateCustomerUseCase>,
  get_use_case: Arc<GetCustomerUseCase>,
  update_use_case: Arc<UpdateCustomerUseCase>,
  delete_use_case: Arc<DeleteCustomerUseCase>,
) {
  cfg
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(create_use_case))
    .app_data(web::Data::new(get_use_case))
    .app_data(web::Data::new(update_use_case))
    .app_data(web::Data::new(delete_use_case))
    .route("", web::get().to(customers::list_customers_handler))
    .route("", web::post().to(customers::create_customer_handler))
    .route("/{id}", web::get().to(customers::get_customer_handler))
    .route("/{id}", web::put().to(customers::update_customer_handler))
    .route(
      "/{id}",
      web::delete().to(customers::delete_customer_handler),
    );
}

/// Configure catalog routes
///
/// # Routes
///
/// - GET / - List active products (`?q=` searches name, SKU and description,
///   `?category=` and `?stock=low|out` narrow the list)
/// - GET /low-stock - Products at or below their minimum level
/// - POST / - Create product
/// - GET /{id} - Get product
/// - PUT /{id} - Update product
/// - DELETE /{id} - Delete product
pub fn configure_catalog_routes(
  cfg: &mut web::ServiceConfig,
  list_use_case: Arc<ListProductsUseCase>,
  low_stock_use_case: Arc<LowStockProductsUseCase>,
  create_use_case: Arc<CreateProductUseCase>,
  get_use_case: Arc<GetProductUseCase>,
  update_use_case: Arc<UpdateProductUseCase>,
  delete_use_case: Arc<DeleteProductUseCase>,
) {
  cfg
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(low_stock_use_case))
    .app_data(web::Data::new(create_use_case))
    .app_data(web::Data::new(get_use_case))
    .app_data(web::Data::new(update_use_case))
    .app_data(web::Data::new(delete_use_case))
    .route("", web::get().to(catalog::list_products_handler))
    .route("", web::post().to(catalog::create_product_handler))
    .route(
      "/low-stock",
      web::get().to(catalog::low_stock_products_handler),
    )
    .route("/{id}", web::get().to(catalog::get_product_handler))
    .route("/{id}", web::put().to(catalog::update_product_handler))
    .route("/{id}", web::delete().to(catalog::delete_product_handler));
}

/// Configure bulk upload routes
///
/// # Routes
///
/// - POST / - Store a batch from a JSON body
/// - POST /upload - Store a batch from a multipart upload
/// - GET / - List stored batches, newest first
/// - GET /{batch_id} - Items of one batch
/// - DELETE /{batch_id} - Delete a batch
pub fn configure_bulk_routes(
  cfg: &mut web::ServiceConfig,
  upload_use_case: Arc<UploadBatchUseCase>,
  list_use_case: Arc<ListBatchesUseCase>,
  get_use_case: Arc<GetBatchUseCase>,
  delete_use_case: Arc<DeleteBatchUseCase>,
) {
  cfg
    .app_data(web::Data::new(upload_use_case))
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(get_use_case))
    .app_data(web::Data::new(delete_use_case))
    .route("", web::post().to(bulk::upload_batch_handler))
    .route("", web::get().to(bulk::list_batches_handler))
    .route("/upload", web::post().to(bulk::upload_batch_file_handler))
    .route("/{batch_id}", web::get().to(bulk::get_batch_handler))
    .route("/{batch_id}", web::delete().to(bulk::delete_batch_handler));
}

/// Configure business profile routes
///
/// - GET "" - Current profile (placeholder for guests)
/// - PUT "" - Create or replace the profile
pub fn configure_business_routes(
  cfg: &mut web::ServiceConfig,
  get_use_case: Arc<GetBusinessProfileUseCase>,
  update_use_case: Arc<UpdateBusinessProfileUseCase>,
) {
  cfg
    .app_data(web::Data::new(get_use_case))
    .app_data(web::Data::new(update_use_case))
    .route(
      "",
      web::get().to(business::get_business_profile_handler),
    )
    .route(
      "",
      web::put().to(business::update_business_profile_handler),
    );
}
