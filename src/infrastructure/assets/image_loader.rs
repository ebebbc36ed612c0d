use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use crate::domain::invoice::{AssetLoader, ImageAsset, InvoiceError};

/// Fetches seal and signature images for embedding into exported PDFs.
///
/// `http(s)://` references are downloaded, `data:` URIs are decoded in place
/// and anything else is read from `base_dir`. Every load is bounded by
/// `timeout`.
pub struct ImageAssetLoader {
  client: reqwest::Client,
  base_dir: PathBuf,
  timeout: Duration,
}

impl ImageAssetLoader {
  pub fn new(base_dir: PathBuf, timeout: Duration) -> Result<Self, InvoiceError> {
    let client = reqwest::Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| InvoiceError::Internal(format!("Failed to build HTTP client: {}", e)))?;

    Ok(Self {
      client,
      base_dir,
      timeout,
    })
  }

  async fn fetch(&self, url: &str) -> Result<ImageAsset, String> {
    let response = self.client.get(url).send().await.map_err(|e| e.to_string())?;

    if !response.status().is_success() {
      return Err(format!("server answered {}", response.status()));
    }

    let header_type = response
      .headers()
      .get(reqwest::header::CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
      .filter(|v| v.starts_with("image/"));

    let bytes = response.bytes().await.map_err(|e| e.to_string())?;
    Ok(ImageAsset {
      content_type: header_type.unwrap_or_else(|| content_type_for(url).to_string()),
      bytes: bytes.to_vec(),
    })
  }

  async fn read_file(&self, reference: &str) -> Result<ImageAsset, String> {
    let path = resolve_local(&self.base_dir, reference)?;
    let bytes = tokio::fs::read(&path).await.map_err(|e| e.to_string())?;
    Ok(ImageAsset {
      content_type: content_type_for(reference).to_string(),
      bytes,
    })
  }
}

#[async_trait]
impl AssetLoader for ImageAssetLoader {
  async fn load(&self, url: &str) -> Result<ImageAsset, InvoiceError> {
    let reference = url.trim();
    let load = async {
      if reference.starts_with("http://") || reference.starts_with("https://") {
        self.fetch(reference).await
      } else if reference.starts_with("data:") {
        decode_data_uri(reference)
      } else {
        self.read_file(reference).await
      }
    };

    let result = match tokio::time::timeout(self.timeout, load).await {
      Ok(result) => result,
      Err(_) => Err(format!("timed out after {}s", self.timeout.as_secs())),
    };

    let asset = result.and_then(|asset| {
      if asset.bytes.is_empty() {
        Err("image is empty".to_string())
      } else {
        Ok(asset)
      }
    });

    asset.map_err(|reason| {
      tracing::warn!("Image asset {} failed to load: {}", reference, reason);
      InvoiceError::AssetLoadFailed {
        url: reference.to_string(),
        reason,
      }
    })
  }
}

/// Local references must stay inside `base_dir`.
fn resolve_local(base_dir: &Path, reference: &str) -> Result<PathBuf, String> {
  let relative = Path::new(reference.trim_start_matches('/'));
  if relative
    .components()
    .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
  {
    return Err("path escapes the asset directory".to_string());
  }
  Ok(base_dir.join(relative))
}

fn decode_data_uri(uri: &str) -> Result<ImageAsset, String> {
  let rest = &uri["data:".len()..];
  let (meta, payload) = rest
    .split_once(',')
    .ok_or_else(|| "malformed data URI".to_string())?;
  let content_type = meta
    .strip_suffix(";base64")
    .ok_or_else(|| "only base64 data URIs are supported".to_string())?;
  let bytes = STANDARD.decode(payload).map_err(|e| e.to_string())?;
  Ok(ImageAsset {
    content_type: if content_type.is_empty() {
      "application/octet-stream".to_string()
    } else {
      content_type.to_string()
    },
    bytes,
  })
}

fn content_type_for(reference: &str) -> &'static str {
  let path = reference.split(['?', '#']).next().unwrap_or(reference);
  let extension = path
    .rsplit_once('.')
    .map(|(_, ext)| ext.to_ascii_lowercase())
    .unwrap_or_default();
  match extension.as_str() {
    "png" => "image/png",
    "jpg" | "jpeg" => "image/jpeg",
    "gif" => "image/gif",
    "webp" => "image/webp",
    "svg" => "image/svg+xml",
    _ => "application/octet-stream",
  }
}
