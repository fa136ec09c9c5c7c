//! Remote PDF acquisition
//!
//! Fetches a PDF over HTTP(S) and parks it under the output root with a
//! UUID-based filename. The downloaded file is never cleaned up, matching
//! the original service: a failed extraction still leaves the artifact on
//! disk.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{ExtractError, Result};

/// Whether a source string should be treated as a remote URL.
///
/// Deliberately a prefix check only; anything else is handed to the
/// filesystem as a path.
pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Download a PDF from `url` into `output_root`, returning the written path.
///
/// Any failure (connection, non-success status, write) normalizes to
/// [`ExtractError::Download`]; there is no retry.
pub async fn download_pdf(
    client: &reqwest::Client,
    url: &str,
    output_root: &Path,
) -> Result<PathBuf> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ExtractError::Download(format!("{}: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ExtractError::Download(format!(
            "Status code: {}",
            status.as_u16()
        )));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| ExtractError::Download(format!("Failed to read response body: {}", e)))?;

    let pdf_path = output_root.join(format!("{}.pdf", Uuid::new_v4()));
    tokio::fs::write(&pdf_path, &body)
        .await
        .map_err(|e| ExtractError::Download(format!("Failed to write {}: {}", pdf_path.display(), e)))?;

    tracing::info!(url, path = %pdf_path.display(), bytes = body.len(), "Downloaded PDF");
    Ok(pdf_path)
}
