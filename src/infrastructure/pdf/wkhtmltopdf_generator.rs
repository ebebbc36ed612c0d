use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::domain::invoice::{InvoiceError, PageLayout, PdfGenerator};

/// Pipes the rendered HTML through `wkhtmltopdf` and returns the PDF bytes.
/// Nothing is written to disk.
pub struct WkHtmlToPdfGenerator {
  wkhtmltopdf_path: String,
}

impl WkHtmlToPdfGenerator {
  pub fn new(wkhtmltopdf_path: Option<String>) -> Self {
    let wkhtmltopdf_path = wkhtmltopdf_path.unwrap_or_else(|| "wkhtmltopdf".to_string());
    Self { wkhtmltopdf_path }
  }

  pub async fn verify_wkhtmltopdf_installed(&self) -> Result<(), InvoiceError> {
    let output = Command::new(&self.wkhtmltopdf_path)
      .arg("--version")
      .output()
      .await
      .map_err(|e| {
        InvoiceError::PdfGenerationFailed(format!(
          "wkhtmltopdf not found: {}. Please install wkhtmltopdf.",
          e
        ))
      })?;

    if !output.status.success() {
      return Err(InvoiceError::PdfGenerationFailed(
        "wkhtmltopdf is not working correctly".to_string(),
      ));
    }

    Ok(())
  }
}

/// Command line for one conversion, reading HTML from stdin and writing the
/// PDF to stdout.
fn build_args(layout: &PageLayout) -> Vec<String> {
  let mut args = vec![
    "--page-size".to_string(),
    layout.page_size.to_string(),
    "--orientation".to_string(),
    if layout.landscape { "Landscape" } else { "Portrait" }.to_string(),
  ];
  for (flag, mm) in [
    ("--margin-top", layout.margin_top_mm),
    ("--margin-right", layout.margin_right_mm),
    ("--margin-bottom", layout.margin_bottom_mm),
    ("--margin-left", layout.margin_left_mm),
  ] {
    args.push(flag.to_string());
    args.push(format!("{}mm", mm));
  }
  args.extend(
    ["--encoding", "utf-8", "--print-media-type", "--quiet", "-", "-"]
      .into_iter()
      .map(String::from),
  );
  args
}

#[async_trait]
impl PdfGenerator for WkHtmlToPdfGenerator {
  async fn generate_pdf(&self, html: &str, layout: &PageLayout) -> Result<Vec<u8>, InvoiceError> {
    let mut child = Command::new(&self.wkhtmltopdf_path)
      .args(build_args(layout))
      .stdin(Stdio::piped())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .kill_on_drop(true)
      .spawn()
      .map_err(|e| {
        InvoiceError::PdfGenerationFailed(format!("wkhtmltopdf execution failed: {}", e))
      })?;

    let mut stdin = child.stdin.take().ok_or_else(|| {
      InvoiceError::PdfGenerationFailed("wkhtmltopdf stdin unavailable".to_string())
    })?;
    let input = html.as_bytes().to_vec();
    // Feed stdin concurrently so a full stdout pipe cannot deadlock us.
    let writer = tokio::spawn(async move {
      let result = stdin.write_all(&input).await;
      drop(stdin);
      result
    });

    let output = child.wait_with_output().await.map_err(|e| {
      InvoiceError::PdfGenerationFailed(format!("wkhtmltopdf execution failed: {}", e))
    })?;

    writer
      .await
      .map_err(|e| InvoiceError::Internal(e.to_string()))?
      .map_err(|e| InvoiceError::PdfGenerationFailed(format!("writing HTML failed: {}", e)))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(InvoiceError::PdfGenerationFailed(format!(
        "wkhtmltopdf failed: {}",
        stderr.trim()
      )));
    }

    if !output.stdout.starts_with(b"%PDF") {
      return Err(InvoiceError::PdfGenerationFailed(
        "wkhtmltopdf produced no PDF output".to_string(),
      ));
    }

    tracing::debug!("Generated PDF of {} bytes", output.stdout.len());
    Ok(output.stdout)
  }
}
