use std::sync::Arc;
use tera::{Context, Tera};

use crate::domain::invoice::{InvoiceError, InvoiceRenderer, InvoiceView, RenderMode};

const INVOICE_TEMPLATE: &str = "invoice.html.tera";

/// Tera-backed renderer. The invoice template is compiled into the binary so
/// preview and export never depend on the working directory.
#[derive(Clone)]
pub struct TemplateEngine {
  tera: Arc<Tera>,
}

impl TemplateEngine {
  pub fn new() -> Result<Self, tera::Error> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![".html.tera", ".html"]);
    tera.add_raw_template(
      INVOICE_TEMPLATE,
      include_str!("../../../templates/invoice.html.tera"),
    )?;

    Ok(Self {
      tera: Arc::new(tera),
    })
  }
}

impl InvoiceRenderer for TemplateEngine {
  fn render(&self, view: &InvoiceView, mode: RenderMode) -> Result<String, InvoiceError> {
    let mut context = Context::new();
    context.insert("invoice", view);
    context.insert("mode", &mode);

    self.tera.render(INVOICE_TEMPLATE, &context).map_err(|e| {
      tracing::error!("Failed to render invoice {}: {:?}", view.invoice_number, e);
      InvoiceError::Template(e.to_string())
    })
  }
}
