use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::Session;
use crate::domain::invoice::{ImportError, ImportFormat, InvoiceDocument, InvoiceError, ItemSource};

use super::draft::{DocumentFactory, InvoiceDraft};

#[derive(Debug)]
pub struct ImportItemsCommand {
  pub session: Session,
  pub draft: InvoiceDraft,
  pub format: ImportFormat,
  pub content: Vec<u8>,
}

#[derive(Debug, Serialize)]
pub struct ImportItemsResponse {
  pub imported: usize,
  pub document: InvoiceDocument,
}

/// Reads a whole batch with the source registered for the requested format
/// and appends it to the draft. A bad row rejects the batch.
pub struct ImportItemsUseCase {
  factory: Arc<DocumentFactory>,
  sources: Vec<Arc<dyn ItemSource>>,
}

impl ImportItemsUseCase {
  pub fn new(factory: Arc<DocumentFactory>, sources: Vec<Arc<dyn ItemSource>>) -> Self {
    Self { factory, sources }
  }

  fn source_for(&self, format: ImportFormat) -> Result<&Arc<dyn ItemSource>, ImportError> {
    self
      .sources
      .iter()
      .find(|source| source.format() == format)
      .ok_or_else(|| ImportError::UnsupportedFormat(format.as_str().to_string()))
  }

  pub async fn execute(
    &self,
    command: ImportItemsCommand,
  ) -> Result<ImportItemsResponse, InvoiceError> {
    let source = self.source_for(command.format)?;
    let mut document = self
      .factory
      .from_draft(&command.session, command.draft)
      .await?;

    let today = Utc::now().date_naive();
    let imported = document
      .import(source.as_ref(), &command.content, today)
      .map_err(|e| {
        tracing::warn!(
          "Rejected {} import for invoice {}: {}",
          command.format.as_str(),
          document.invoice_number().value(),
          e
        );
        e
      })?;

    tracing::info!(
      "Imported {} line items ({}) into invoice {}",
      imported,
      command.format.as_str(),
      document.invoice_number().value()
    );

    Ok(ImportItemsResponse { imported, document })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::test_support::{defaults, factory_with_profiles};
  use crate::domain::invoice::{LineItem, Quantity, UnitPrice};
  use crate::infrastructure::import::{CsvItemSource, PositionalCsvItemSource};
  use chrono::NaiveDate;
  use rust_decimal_macros::dec;

  fn use_case() -> ImportItemsUseCase {
    ImportItemsUseCase::new(
      Arc::new(factory_with_profiles(vec![])),
      vec![
        Arc::new(CsvItemSource),
        Arc::new(PositionalCsvItemSource::new(true)),
        Arc::new(PositionalCsvItemSource::new(false)),
      ],
    )
  }

  #[tokio::test]
  async fn test_import_appends_batch() {
    let csv = "description,qty,unit price\nWebsite Development,1,75000\nLogo Design,2,12500\n";
    let response = use_case()
      .execute(ImportItemsCommand {
        session: Session::Guest,
        draft: InvoiceDraft::default(),
        format: ImportFormat::Csv,
        content: csv.as_bytes().to_vec(),
      })
      .await
      .unwrap();

    assert_eq!(response.imported, 2);
    assert_eq!(response.document.totals().subtotal, dec!(100000));
  }

  #[tokio::test]
  async fn test_headerless_positional_source_is_selected() {
    let response = use_case()
      .execute(ImportItemsCommand {
        session: Session::Guest,
        draft: InvoiceDraft::default(),
        format: ImportFormat::PositionalCsv { has_header: false },
        content: b"1,2024-01-01,ORD-001,Website Development,1,75000\n".to_vec(),
      })
      .await
      .unwrap();

    assert_eq!(response.imported, 1);
    assert_eq!(response.document.items()[0].reference_id(), "ORD-001");
  }

  #[tokio::test]
  async fn test_bad_row_rejects_whole_batch() {
    let csv = "description,quantity,unit_price\nGood,1,10\n,1,10\n";
    let result = use_case()
      .execute(ImportItemsCommand {
        session: Session::Guest,
        draft: InvoiceDraft::default(),
        format: ImportFormat::Csv,
        content: csv.as_bytes().to_vec(),
      })
      .await;

    match result {
      Err(InvoiceError::Import(ImportError::MissingDescription { row })) => assert_eq!(row, 2),
      other => panic!("unexpected result: {:?}", other),
    }
  }

  fn populated_document() -> InvoiceDocument {
    let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut doc = InvoiceDocument::new(&defaults(), today, Utc::now());
    let items = vec![
      LineItem::new(
        today,
        "ORD-001".to_string(),
        "Website Development".to_string(),
        Quantity::new(dec!(1)).unwrap(),
        UnitPrice::new(dec!(75000)).unwrap(),
      ),
      LineItem::new(
        today,
        "ORD-002".to_string(),
        "Logo Design".to_string(),
        Quantity::new(dec!(2)).unwrap(),
        UnitPrice::new(dec!(12500)).unwrap(),
      ),
    ];
    doc.absorb(items).unwrap();
    doc
  }

  #[test]
  fn test_failed_batch_keeps_existing_items_and_totals() {
    let mut doc = populated_document();
    let before = doc.clone();
    let csv = "description,quantity,unit_price\nHosting,12,10\n   ,1,99\nSupport,1,500\n";

    let result = doc.import(&CsvItemSource, csv.as_bytes(), Utc::now().date_naive());

    assert_eq!(result, Err(ImportError::MissingDescription { row: 2 }));
    assert_eq!(doc.items().len(), 2);
    assert_eq!(doc.totals(), before.totals());
    assert_eq!(doc.totals().subtotal, dec!(100000));
    assert_eq!(doc, before);
  }

  #[test]
  fn test_successful_batch_appends_after_existing_items() {
    let mut doc = populated_document();
    let csv = "description,quantity,unit_price\nHosting,12,10\n";

    let imported = doc
      .import(&CsvItemSource, csv.as_bytes(), Utc::now().date_naive())
      .unwrap();

    assert_eq!(imported, 1);
    assert_eq!(doc.items().len(), 3);
    assert_eq!(doc.items()[2].description(), "Hosting");
    assert_eq!(doc.totals().subtotal, dec!(100120));
  }

  #[tokio::test]
  async fn test_rejected_import_returns_no_document() {
    let draft: InvoiceDraft = serde_json::from_str(
      r#"{"items": [{"date": "2024-01-01", "description": "Logo Design",
           "quantity": "2", "unit_price": "12500"}]}"#,
    )
    .unwrap();
    let csv = "description,quantity,unit_price\nGood,1,10\n,1,10\n";

    let result = use_case()
      .execute(ImportItemsCommand {
        session: Session::Guest,
        draft,
        format: ImportFormat::Csv,
        content: csv.as_bytes().to_vec(),
      })
      .await;

    assert!(matches!(
      result,
      Err(InvoiceError::Import(ImportError::MissingDescription { row: 2 }))
    ));
  }

  #[tokio::test]
  async fn test_unregistered_format() {
    let result = use_case()
      .execute(ImportItemsCommand {
        session: Session::Guest,
        draft: InvoiceDraft::default(),
        format: ImportFormat::Spreadsheet,
        content: vec![1],
      })
      .await;
    assert!(matches!(
      result,
      Err(InvoiceError::Import(ImportError::UnsupportedFormat(_)))
    ));
  }
}
