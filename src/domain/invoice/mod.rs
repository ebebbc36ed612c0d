pub mod entities;
pub mod errors;
pub mod import;
pub mod ports;
pub mod rendering;
pub mod services;
pub mod value_objects;

pub use entities::{
  Customer, CustomerSnapshot, DocumentDefaults, InvoiceDocument, InvoiceSnapshot, InvoiceTotals,
  LineItem, LineItemPatch, SavedInvoice,
};
pub use errors::InvoiceError;
pub use import::{Cell, ColumnMap, ImportError, ImportFormat, ImportedRow, ItemColumn};
pub use ports::{
  AssetLoader, CustomerRepository, InvoiceRenderer, ItemSource, PdfGenerator,
  SavedInvoiceRepository,
};
pub use rendering::{
  ImageAsset, InvoiceView, PageLayout, RenderMode, ViewImages, export_filename, format_money,
};
pub use services::{CustomerData, InvoiceService};
pub use value_objects::{
  CustomerEmail, CustomerName, Discount, DiscountMode, InvoiceNumber, Quantity, TaxRate,
  UnitPrice, ValueObjectError,
};
