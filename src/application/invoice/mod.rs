pub mod create_customer;
pub mod delete_customer;
pub mod delete_saved_invoice;
pub mod draft;
pub mod edit_invoice;
pub mod export_invoice;
pub mod get_customer;
pub mod get_saved_invoice;
pub mod import_items;
pub mod list_customers;
pub mod list_saved_invoices;
pub mod new_invoice;
pub mod pick_catalog_item;
pub mod preview_invoice;
pub mod reopen_saved_invoice;
pub mod save_invoice;
pub mod update_customer;

pub use create_customer::{CreateCustomerCommand, CreateCustomerUseCase, CustomerFields};
pub use delete_customer::{DeleteCustomerCommand, DeleteCustomerUseCase};
pub use delete_saved_invoice::{DeleteSavedInvoiceCommand, DeleteSavedInvoiceUseCase};
pub use draft::{DocumentFactory, InvoiceDraft};
pub use edit_invoice::{EditInvoiceCommand, EditInvoiceResponse, EditInvoiceUseCase, InvoiceEdit};
pub use export_invoice::{ExportInvoiceCommand, ExportInvoiceResponse, ExportInvoiceUseCase};
pub use get_customer::{GetCustomerCommand, GetCustomerUseCase};
pub use get_saved_invoice::{GetSavedInvoiceCommand, GetSavedInvoiceUseCase};
pub use import_items::{ImportItemsCommand, ImportItemsResponse, ImportItemsUseCase};
pub use list_customers::{
  CustomerDto, ListCustomersCommand, ListCustomersResponse, ListCustomersUseCase,
};
pub use list_saved_invoices::{
  ListSavedInvoicesCommand, ListSavedInvoicesResponse, ListSavedInvoicesUseCase,
  SavedInvoiceSummaryDto,
};
pub use new_invoice::{NewInvoiceCommand, NewInvoiceResponse, NewInvoiceUseCase};
pub use pick_catalog_item::{
  PickCatalogItemCommand, PickCatalogItemResponse, PickCatalogItemUseCase,
};
pub use preview_invoice::{PreviewInvoiceCommand, PreviewInvoiceResponse, PreviewInvoiceUseCase};
pub use reopen_saved_invoice::{
  ReopenSavedInvoiceCommand, ReopenSavedInvoiceResponse, ReopenSavedInvoiceUseCase,
};
pub use save_invoice::{SaveInvoiceCommand, SaveInvoiceResponse, SaveInvoiceUseCase};
pub use update_customer::{UpdateCustomerCommand, UpdateCustomerUseCase};
