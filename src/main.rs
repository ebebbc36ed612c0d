use actix_web::{App, HttpServer, middleware::Logger, web};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use invoicer::{
  adapters::http::{
    InvoiceRouteDependencies, SessionMiddleware, configure_bulk_routes, configure_business_routes,
    configure_catalog_routes, configure_customer_routes, configure_invoice_routes,
    configure_saved_invoice_routes, configure_template_routes, health_check,
  },
  application::bulk::{DeleteBatchUseCase, GetBatchUseCase, ListBatchesUseCase, UploadBatchUseCase},
  application::business::{GetBusinessProfileUseCase, UpdateBusinessProfileUseCase},
  application::catalog::{
    CreateProductUseCase, DeleteProductUseCase, GetProductUseCase, ListProductsUseCase,
    LowStockProductsUseCase, UpdateProductUseCase,
  },
  application::invoice::{
    CreateCustomerUseCase, DeleteCustomerUseCase, DeleteSavedInvoiceUseCase, DocumentFactory,
    EditInvoiceUseCase, ExportInvoiceUseCase, GetCustomerUseCase, GetSavedInvoiceUseCase,
    ImportItemsUseCase, ListCustomersUseCase, ListSavedInvoicesUseCase, NewInvoiceUseCase,
    PickCatalogItemUseCase, PreviewInvoiceUseCase, ReopenSavedInvoiceUseCase, SaveInvoiceUseCase,
    UpdateCustomerUseCase,
  },
  domain::bulk::BulkUploadService,
  domain::business::BusinessService,
  domain::catalog::CatalogService,
  domain::invoice::{AssetLoader, InvoiceRenderer, InvoiceService, ItemSource, PdfGenerator},
  infrastructure::{
    assets::ImageAssetLoader,
    config::Config,
    import::{CsvItemSource, PositionalCsvItemSource, SpreadsheetItemSource},
    pdf::WkHtmlToPdfGenerator,
    persistence::postgres::{
      PostgresBulkItemRepository, PostgresBusinessProfileRepository, PostgresCustomerRepository,
      PostgresProductRepository, PostgresSavedInvoiceRepository,
    },
    rendering::TemplateEngine,
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "invoicer=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting invoicer");

  // Load configuration
  let config = Config::load().expect("Failed to load configuration");
  let document_defaults = config
    .invoice
    .document_defaults()
    .expect("Invalid [invoice] defaults in configuration");
  tracing::info!("Configuration loaded successfully");

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database: {}", config.database.url);

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        format!(
          "Could not connect to database. Is PostgreSQL running at {}?",
          config.database.url
        ),
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Database connection pool created");

  // Run database migrations
  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .expect("Failed to run database migrations");
  tracing::info!("Database migrations completed");

  // Initialize repositories
  let customer_repo = Arc::new(PostgresCustomerRepository::new(db_pool.clone()));
  let saved_invoice_repo = Arc::new(PostgresSavedInvoiceRepository::new(db_pool.clone()));
  let product_repo = Arc::new(PostgresProductRepository::new(db_pool.clone()));
  let profile_repo = Arc::new(PostgresBusinessProfileRepository::new(db_pool.clone()));
  let bulk_repo = Arc::new(PostgresBulkItemRepository::new(db_pool.clone()));

  // Initialize services
  let invoice_service = Arc::new(InvoiceService::new(saved_invoice_repo, customer_repo));
  let catalog_service = Arc::new(CatalogService::new(product_repo));
  let business_service = Arc::new(BusinessService::new(profile_repo));
  let bulk_service = Arc::new(BulkUploadService::new(bulk_repo));
  let factory = Arc::new(DocumentFactory::new(
    document_defaults,
    business_service.clone(),
  ));

  // Initialize rendering and export adapters
  let renderer: Arc<dyn InvoiceRenderer> =
    Arc::new(TemplateEngine::new().expect("Failed to initialize template engine"));
  tracing::info!("Template engine initialized");

  let wkhtmltopdf = WkHtmlToPdfGenerator::new(config.pdf.wkhtmltopdf_path.clone());
  if let Err(e) = wkhtmltopdf.verify_wkhtmltopdf_installed().await {
    // Editing and preview still work; only exports will fail.
    tracing::warn!("PDF export unavailable: {}", e);
  }
  let pdf_generator: Arc<dyn PdfGenerator> = Arc::new(wkhtmltopdf);
  tracing::info!("PDF generator initialized");

  let asset_loader: Arc<dyn AssetLoader> = Arc::new(
    ImageAssetLoader::new(config.assets.base_path(), config.assets.load_timeout())
      .expect("Failed to initialize image loader"),
  );

  let item_sources: Vec<Arc<dyn ItemSource>> = vec![
    Arc::new(CsvItemSource::new()),
    Arc::new(PositionalCsvItemSource::new(true)),
    Arc::new(PositionalCsvItemSource::new(false)),
    Arc::new(SpreadsheetItemSource::new()),
  ];

  let currency_symbol = config.render.currency_symbol.clone();

  // Initialize document use cases
  let invoice_routes = InvoiceRouteDependencies {
    factory: factory.clone(),
    new_invoice: Arc::new(NewInvoiceUseCase::new(factory.clone())),
    edit_invoice: Arc::new(EditInvoiceUseCase::new(
      factory.clone(),
      invoice_service.clone(),
    )),
    pick_catalog_item: Arc::new(PickCatalogItemUseCase::new(
      factory.clone(),
      catalog_service.clone(),
    )),
    import_items: Arc::new(ImportItemsUseCase::new(
      factory.clone(),
      item_sources.clone(),
    )),
    preview_invoice: Arc::new(PreviewInvoiceUseCase::new(
      factory.clone(),
      business_service.clone(),
      renderer.clone(),
      currency_symbol.clone(),
    )),
    export_invoice: Arc::new(ExportInvoiceUseCase::new(
      business_service.clone(),
      renderer,
      pdf_generator,
      asset_loader,
      currency_symbol,
    )),
    save_invoice: Arc::new(SaveInvoiceUseCase::new(
      factory,
      invoice_service.clone(),
      business_service.clone(),
    )),
  };

  // Initialize saved invoice use cases
  let list_saved_use_case = Arc::new(ListSavedInvoicesUseCase::new(invoice_service.clone()));
  let get_saved_use_case = Arc::new(GetSavedInvoiceUseCase::new(invoice_service.clone()));
  let reopen_saved_use_case = Arc::new(ReopenSavedInvoiceUseCase::new(invoice_service.clone()));
  let delete_saved_use_case = Arc::new(DeleteSavedInvoiceUseCase::new(invoice_service.clone()));

  // Initialize customer use cases
  let list_customers_use_case = Arc::new(ListCustomersUseCase::new(invoice_service.clone()));
  let create_customer_use_case = Arc::new(CreateCustomerUseCase::new(invoice_service.clone()));
  let get_customer_use_case = Arc::new(GetCustomerUseCase::new(invoice_service.clone()));
  let update_customer_use_case = Arc::new(UpdateCustomerUseCase::new(invoice_service.clone()));
  let delete_customer_use_case = Arc::new(DeleteCustomerUseCase::new(invoice_service));

  // Initialize catalog use cases
  let list_products_use_case = Arc::new(ListProductsUseCase::new(catalog_service.clone()));
  let low_stock_use_case = Arc::new(LowStockProductsUseCase::new(catalog_service.clone()));
  let create_product_use_case = Arc::new(CreateProductUseCase::new(catalog_service.clone()));
  let get_product_use_case = Arc::new(GetProductUseCase::new(catalog_service.clone()));
  let update_product_use_case = Arc::new(UpdateProductUseCase::new(catalog_service.clone()));
  let delete_product_use_case = Arc::new(DeleteProductUseCase::new(catalog_service));

  // Initialize bulk upload use cases
  let upload_batch_use_case = Arc::new(UploadBatchUseCase::new(bulk_service.clone(), item_sources));
  let list_batches_use_case = Arc::new(ListBatchesUseCase::new(bulk_service.clone()));
  let get_batch_use_case = Arc::new(GetBatchUseCase::new(bulk_service.clone()));
  let delete_batch_use_case = Arc::new(DeleteBatchUseCase::new(bulk_service));

  // Initialize business profile use cases
  let get_profile_use_case = Arc::new(GetBusinessProfileUseCase::new(business_service.clone()));
  let update_profile_use_case = Arc::new(UpdateBusinessProfileUseCase::new(business_service));

  let server_host = config.server.host.clone();
  let server_port = config.server.port;
  let user_header = config.session.user_header.clone();

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      // Resolve the caller's session from the upstream header
      .wrap(SessionMiddleware::new(user_header.clone()))
      // Add logging middleware
      .wrap(Logger::default())
      .service(web::scope("/api/invoices").configure(|cfg| {
        configure_invoice_routes(cfg, invoice_routes.clone());
      }))
      .service(web::scope("/api/import-templates").configure(configure_template_routes))
      .service(web::scope("/api/saved-invoices").configure(|cfg| {
        configure_saved_invoice_routes(
          cfg,
          list_saved_use_case.clone(),
          get_saved_use_case.clone(),
          reopen_saved_use_case.clone(),
          delete_saved_use_case.clone(),
        )
      }))
      .service(web::scope("/api/customers").configure(|cfg| {
        configure_customer_routes(
          cfg,
          list_customers_use_case.clone(),
          create_customer_use_case.clone(),
          get_customer_use_case.clone(),
          update_customer_use_case.clone(),
          delete_customer_use_case.clone(),
        )
      }))
      .service(web::scope("/api/products").configure(|cfg| {
        configure_catalog_routes(
          cfg,
          list_products_use_case.clone(),
          low_stock_use_case.clone(),
          create_product_use_case.clone(),
          get_product_use_case.clone(),
          update_product_use_case.clone(),
          delete_product_use_case.clone(),
        )
      }))
      .service(web::scope("/api/bulk-uploads").configure(|cfg| {
        configure_bulk_routes(
          cfg,
          upload_batch_use_case.clone(),
          list_batches_use_case.clone(),
          get_batch_use_case.clone(),
          delete_batch_use_case.clone(),
        )
      }))
      .service(web::scope("/api/business-profile").configure(|cfg| {
        configure_business_routes(
          cfg,
          get_profile_use_case.clone(),
          update_profile_use_case.clone(),
        )
      }))
      // Health check endpoint
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}
