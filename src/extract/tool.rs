//! External pdffigures2 invocations
//!
//! Three distinct invocation shapes exist upstream and are preserved as
//! distinct collaborators:
//!
//! - single-file extraction: direct `java -jar pdffigures2.jar ...`
//! - batch extraction: `sbt "runMain ...FigureExtractorBatchCli ..."`
//! - visualization: `sbt "runMain ...FigureExtractorVisualizationCli ..."`
//!
//! All commands are argument vectors handed straight to the OS; nothing is
//! ever interpreted by a shell, so metacharacters in paths stay inert.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::config::ToolConfig;
use crate::error::{ExtractError, Result};

const BATCH_MAIN: &str = "org.allenai.pdffigures2.FigureExtractorBatchCli";
const VISUALIZATION_MAIN: &str = "org.allenai.pdffigures2.FigureExtractorVisualizationCli";

/// Captured output of a finished tool run
#[derive(Debug)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// A fully-built external tool invocation, ready to run
#[derive(Debug)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ToolCommand {
    /// `java -jar <jar> <pdf> -m <figures>/ -d <metadata>/ --dpi <dpi> [-r]`
    pub fn single_pdf(
        tool: &ToolConfig,
        pdf_path: &Path,
        figures_dir: &Path,
        metadata_dir: &Path,
        dpi: &str,
        visualize: bool,
    ) -> Self {
        let mut args = vec![
            "-jar".to_string(),
            tool.jar_path.display().to_string(),
            pdf_path.display().to_string(),
            "-m".to_string(),
            dir_arg(figures_dir),
            "-d".to_string(),
            dir_arg(metadata_dir),
            "--dpi".to_string(),
            dpi.to_string(),
        ];
        if visualize {
            args.push("-r".to_string());
        }
        Self {
            program: tool.java_bin.clone(),
            args,
            cwd: None,
        }
    }

    /// Batch entry point, launched through sbt from the tool checkout.
    ///
    /// sbt receives the whole `runMain ...` command as one argument and does
    /// its own whitespace splitting; there is no shell in between.
    pub fn batch(
        tool: &ToolConfig,
        pdf_directory: &Path,
        stat_file: Option<&str>,
        figures_dir: &Path,
        metadata_dir: &Path,
    ) -> Self {
        let mut run_main = format!("runMain {} {}", BATCH_MAIN, pdf_directory.display());
        if let Some(stat) = stat_file {
            run_main.push_str(&format!(" -s {}", stat));
        }
        run_main.push_str(&format!(
            " -m {} -d {}",
            dir_arg(figures_dir),
            dir_arg(metadata_dir)
        ));

        Self {
            program: tool.sbt_bin.clone(),
            args: vec![run_main],
            cwd: Some(tool.sbt_project_dir.clone()),
        }
    }

    /// Visualization entry point, also sbt-mediated.
    pub fn visualization(tool: &ToolConfig, pdf_path: &Path, intermediate_steps: bool) -> Self {
        let mut run_main = format!("runMain {} {}", VISUALIZATION_MAIN, pdf_path.display());
        if intermediate_steps {
            run_main.push_str(" -s");
        }
        Self {
            program: tool.sbt_bin.clone(),
            args: vec![run_main],
            cwd: Some(tool.sbt_project_dir.clone()),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Run the command to completion, capturing stdout/stderr.
    ///
    /// Non-zero exit becomes [`ExtractError::ExternalTool`] with the exact
    /// exit code and captured stderr. The subprocess is killed if it
    /// outlives `timeout_secs`.
    pub async fn run(&self, timeout_secs: u64) -> Result<ToolOutput> {
        tracing::info!(program = %self.program, args = ?self.args, "Executing command");

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }

        let output = tokio::time::timeout(Duration::from_secs(timeout_secs), command.output())
            .await
            .map_err(|_| ExtractError::Timeout(timeout_secs))??;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        tracing::debug!(%stdout, "Command stdout");
        tracing::debug!(%stderr, "Command stderr");

        if !output.status.success() {
            // Exit code is absent when the process died to a signal.
            let code = output.status.code().unwrap_or(-1);
            return Err(ExtractError::ExternalTool { code, stderr });
        }

        Ok(ToolOutput { stdout, stderr })
    }
}

/// Directory argument with a guaranteed trailing slash; pdffigures2 treats
/// `-m`/`-d` values as filename prefixes, so the slash is load-bearing.
fn dir_arg(dir: &Path) -> String {
    let mut s = dir.display().to_string();
    if !s.ends_with('/') {
        s.push('/');
    }
    s
}
