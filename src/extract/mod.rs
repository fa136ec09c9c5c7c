//! Figure extraction service
//!
//! Owns the output directory tree and orchestrates the external pdffigures2
//! invocations: single-PDF extraction, directory batch runs, and
//! visualization. The tool itself is an opaque collaborator; this module
//! builds its command lines, enforces the concurrency bound, and reshapes
//! whatever lands on disk into response payloads.

pub mod tool;
pub mod types;

use std::path::{Path, PathBuf};

use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::config::{OutputConfig, ToolConfig};
use crate::error::{ExtractError, Result};
use crate::validate::{pdf_base_name, validate_pdf_path};

use tool::ToolCommand;
use types::{BatchReport, ExtractionReport, VisualizationReport};

pub use types::FigureMetadata;

/// Directories a single request writes into
#[derive(Debug)]
struct OutputDirs {
    /// Where the metadata sidecar `<base>.json` is looked up. The sidecar
    /// lands here rather than under `metadata/`, an asymmetry inherited
    /// from the original service.
    scan_root: PathBuf,
    figures: PathBuf,
    metadata: PathBuf,
}

/// Service wrapping the external extraction tool
pub struct FigureExtractor {
    output: OutputConfig,
    tool: ToolConfig,
    /// Admission control for subprocess runs; each permit is one live
    /// external-tool OS process.
    jobs: Semaphore,
}

impl FigureExtractor {
    /// Create the extractor and the shared output tree.
    ///
    /// `<root>/figures` and `<root>/metadata` are created up front and
    /// reused by flat-mode requests and batch runs.
    pub fn new(output: OutputConfig, tool: ToolConfig) -> Result<Self> {
        std::fs::create_dir_all(output.root.join("figures"))?;
        std::fs::create_dir_all(output.root.join("metadata"))?;
        tracing::info!(root = %output.root.display(), flat = output.flat, "Initialized output tree");

        let jobs = Semaphore::new(tool.max_concurrent_jobs.max(1));
        Ok(Self { output, tool, jobs })
    }

    /// The root under which downloaded PDFs are parked.
    pub fn output_root(&self) -> &Path {
        &self.output.root
    }

    /// Extract figures from one PDF.
    pub async fn process_single(
        &self,
        pdf_path: &str,
        dpi: &str,
        visualize: bool,
    ) -> Result<ExtractionReport> {
        let pdf_path = validate_pdf_path(pdf_path)?;
        let base = pdf_base_name(&pdf_path);
        let dirs = self.request_dirs()?;

        let command = ToolCommand::single_pdf(
            &self.tool,
            &pdf_path,
            &dirs.figures,
            &dirs.metadata,
            dpi,
            visualize,
        );
        self.run_tool(&command).await?;

        let figures = collect_figures(&dirs.figures, &base)?;
        if figures.is_empty() {
            // The tool exiting zero with no matching files is treated the
            // same as the tool failing outright; callers see one error kind
            // for both.
            tracing::error!(%base, "No figures were generated");
            return Err(ExtractError::NoFigures);
        }

        let metadata = load_metadata(&dirs.scan_root, &base)?;

        Ok(ExtractionReport {
            success: true,
            total_figures: figures.len(),
            figures,
            metadata,
            message: "Figures extracted successfully.".to_string(),
        })
    }

    /// Run the batch entry point over a directory of PDFs.
    ///
    /// Only the directory's existence is checked; batch output is not
    /// enumerated afterwards.
    pub async fn process_directory(
        &self,
        pdf_directory: &Path,
        stat_file: Option<&str>,
    ) -> Result<BatchReport> {
        if !pdf_directory.exists() {
            return Err(ExtractError::Validation(
                "Invalid PDF directory path.".to_string(),
            ));
        }

        // Batch always writes into the shared flat tree; per-request
        // isolation applies to single-file runs only.
        let figures = self.output.root.join("figures");
        let metadata = self.output.root.join("metadata");
        let command = ToolCommand::batch(&self.tool, pdf_directory, stat_file, &figures, &metadata);
        self.run_tool(&command).await?;

        Ok(BatchReport {
            success: true,
            message: "Batch processing completed successfully.".to_string(),
        })
    }

    /// Render the tool's parse of a PDF via its visualization entry point.
    pub async fn visualize(
        &self,
        pdf_path: &str,
        intermediate_steps: bool,
    ) -> Result<VisualizationReport> {
        let pdf_path = validate_pdf_path(pdf_path)?;

        let command = ToolCommand::visualization(&self.tool, &pdf_path, intermediate_steps);
        let output = self.run_tool(&command).await?;

        Ok(VisualizationReport {
            success: true,
            message: "Visualization completed successfully.".to_string(),
            output: output.stdout,
        })
    }

    async fn run_tool(&self, command: &ToolCommand) -> Result<tool::ToolOutput> {
        // The semaphore is never closed; map the unreachable error instead
        // of panicking.
        let _permit = self.jobs.acquire().await.map_err(|_| {
            ExtractError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "job queue closed",
            ))
        })?;
        command.run(self.tool.timeout_secs).await
    }

    /// Resolve the directories this request writes into, creating the
    /// per-request subtree unless flat mode is configured.
    fn request_dirs(&self) -> Result<OutputDirs> {
        if self.output.flat {
            return Ok(OutputDirs {
                scan_root: self.output.root.clone(),
                figures: self.output.root.join("figures"),
                metadata: self.output.root.join("metadata"),
            });
        }

        let request_root = self.output.root.join(Uuid::new_v4().to_string());
        let figures = request_root.join("figures");
        let metadata = request_root.join("metadata");
        std::fs::create_dir_all(&figures)?;
        std::fs::create_dir_all(&metadata)?;
        Ok(OutputDirs {
            scan_root: request_root,
            figures,
            metadata,
        })
    }
}

/// Filenames in `figures_dir` that start with the PDF base name and end in
/// `.png`, sorted for stable responses.
fn collect_figures(figures_dir: &Path, base: &str) -> Result<Vec<String>> {
    let mut figures = Vec::new();
    for entry in std::fs::read_dir(figures_dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with(base) && name.ends_with(".png") {
            figures.push(name);
        }
    }
    figures.sort();
    Ok(figures)
}

/// Load and reduce the metadata sidecar `<scan_root>/<base>.json`.
///
/// A missing sidecar is not fatal; the response just carries an empty
/// metadata list.
fn load_metadata(scan_root: &Path, base: &str) -> Result<Vec<FigureMetadata>> {
    let sidecar = scan_root.join(format!("{}.json", base));
    if !sidecar.exists() {
        tracing::warn!(path = %sidecar.display(), "Metadata file not found");
        return Ok(Vec::new());
    }

    let raw = std::fs::read_to_string(&sidecar)?;
    let entries: Vec<serde_json::Value> = serde_json::from_str(&raw)
        .map_err(|e| ExtractError::Metadata(format!("{}: {}", sidecar.display(), e)))?;
    Ok(types::reduce_metadata(&entries))
}
