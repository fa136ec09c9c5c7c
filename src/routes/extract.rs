//! Figure extraction endpoint
//!
//! `POST /extract` accepts a source that is a remote URL, a local PDF path,
//! or a directory of PDFs, and dispatches accordingly: URLs are downloaded
//! first, directories go to the batch entry point, single files to the jar
//! invocation. All failures arrive as typed [`ExtractError`] values and map
//! onto 400/500 through its `status_code`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use crate::download::{download_pdf, is_url};
use crate::error::ExtractError;
use crate::state::AppState;
use crate::validate::{absolutize, has_pdf_extension};

/// Request body for `/extract`
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub source: Option<String>,
    /// Stats-file path; only meaningful for directory sources
    pub stat_file: Option<String>,
}

/// Create the extract router
pub fn router() -> Router<AppState> {
    Router::new().route("/extract", post(extract))
}

/// Extract figures from a PDF file, directory, or URL.
async fn extract(
    State(state): State<AppState>,
    body: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Response, ExtractError> {
    let Json(request) =
        body.map_err(|_| ExtractError::BadRequest("No data provided".to_string()))?;
    let source = request
        .source
        .ok_or_else(|| ExtractError::BadRequest("No source provided".to_string()))?;

    // URLs are fetched before any path validation; everything else is
    // treated as a local path without an existence pre-check.
    let pdf_path = if is_url(&source) {
        download_pdf(state.http(), &source, state.extractor().output_root()).await?
    } else {
        absolutize(&source)
    };

    if pdf_path.is_dir() {
        let report = state
            .extractor()
            .process_directory(&pdf_path, request.stat_file.as_deref())
            .await?;
        Ok(Json(report).into_response())
    } else if pdf_path.is_file() && has_pdf_extension(&pdf_path) {
        let report = state
            .extractor()
            .process_single(&pdf_path.display().to_string(), "300", false)
            .await?;
        Ok(Json(report).into_response())
    } else {
        Err(ExtractError::BadRequest(format!(
            "Invalid file or path: {}",
            pdf_path.display()
        )))
    }
}
