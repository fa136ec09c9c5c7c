//! Visualization endpoint
//!
//! `POST /visualize` only accepts local `.pdf` paths; URLs are rejected by
//! the file check, an asymmetry with `/extract` carried over from the
//! original service. The external tool is never invoked for a path that
//! fails the check.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::ExtractError;
use crate::extract::types::VisualizationReport;
use crate::state::AppState;
use crate::validate::{absolutize, has_pdf_extension};

/// Request body for `/visualize`
#[derive(Debug, Deserialize)]
pub struct VisualizeRequest {
    pub source: Option<String>,
    /// Render intermediate parsing steps as well
    #[serde(default)]
    pub intermediate: bool,
}

/// Create the visualize router
pub fn router() -> Router<AppState> {
    Router::new().route("/visualize", post(visualize))
}

async fn visualize(
    State(state): State<AppState>,
    body: Result<Json<VisualizeRequest>, JsonRejection>,
) -> Result<Json<VisualizationReport>, ExtractError> {
    let Json(request) =
        body.map_err(|_| ExtractError::BadRequest("No data provided".to_string()))?;
    let source = request
        .source
        .ok_or_else(|| ExtractError::BadRequest("No source provided".to_string()))?;

    let abs_path = absolutize(&source);
    if !(abs_path.is_file() && has_pdf_extension(&abs_path)) {
        return Err(ExtractError::BadRequest(format!(
            "Invalid file or path: {}",
            abs_path.display()
        )));
    }

    let report = state
        .extractor()
        .visualize(&abs_path.display().to_string(), request.intermediate)
        .await?;
    Ok(Json(report))
}
