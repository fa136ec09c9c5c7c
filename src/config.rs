//! Server configuration
//!
//! All settings are read from environment variables (a `.env` file is loaded
//! by `main` before this runs). Every knob has a default so the server starts
//! with an empty environment.

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: String, value: String },
}

/// Top-level configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub output: OutputConfig,
    pub tool: ToolConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

/// Output directory settings
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Root under which figures/, metadata/ and downloaded PDFs live
    pub root: PathBuf,
    /// When true, all requests share the flat figures/metadata tree exactly
    /// like the original service. Filenames derived from the PDF base name
    /// then race under concurrent requests. Default is one subtree per
    /// request.
    pub flat: bool,
}

/// External pdffigures2 tool settings
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Path to the assembled pdffigures2 jar (single-file extraction)
    pub jar_path: PathBuf,
    /// java binary used for the jar invocation
    pub java_bin: String,
    /// sbt binary used for the batch and visualization entry points
    pub sbt_bin: String,
    /// Working directory for sbt invocations (the pdffigures2 checkout)
    pub sbt_project_dir: PathBuf,
    /// Kill the subprocess after this many seconds
    pub timeout_secs: u64,
    /// Maximum concurrent external-tool invocations
    pub max_concurrent_jobs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                port: 5001,
            },
            output: OutputConfig {
                root: PathBuf::from("/pdffigures2/data/output"),
                flat: false,
            },
            tool: ToolConfig {
                jar_path: PathBuf::from("/pdffigures2/pdffigures2.jar"),
                java_bin: "java".to_string(),
                sbt_bin: "sbt".to_string(),
                sbt_project_dir: PathBuf::from("/pdffigures2"),
                timeout_secs: 300,
                max_concurrent_jobs: 4,
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let host = parse_var("SERVER_HOST", defaults.server.host)?;
        let port = parse_var("SERVER_PORT", defaults.server.port)?;
        let timeout_secs = parse_var("TOOL_TIMEOUT_SECS", defaults.tool.timeout_secs)?;
        let max_concurrent_jobs =
            parse_var("MAX_CONCURRENT_JOBS", defaults.tool.max_concurrent_jobs)?;
        let flat = parse_var("OUTPUT_FLAT", defaults.output.flat)?;

        Ok(Self {
            server: ServerConfig { host, port },
            output: OutputConfig {
                root: path_var("OUTPUT_DIR", defaults.output.root),
                flat,
            },
            tool: ToolConfig {
                jar_path: path_var("PDFFIGURES_JAR", defaults.tool.jar_path),
                java_bin: string_var("JAVA_BIN", defaults.tool.java_bin),
                sbt_bin: string_var("SBT_BIN", defaults.tool.sbt_bin),
                sbt_project_dir: path_var("SBT_PROJECT_DIR", defaults.tool.sbt_project_dir),
                timeout_secs,
                max_concurrent_jobs,
            },
        })
    }
}

fn string_var(var: &str, default: String) -> String {
    std::env::var(var).unwrap_or(default)
}

fn path_var(var: &str, default: PathBuf) -> PathBuf {
    std::env::var(var).map(PathBuf::from).unwrap_or(default)
}

fn parse_var<T: std::str::FromStr>(var: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_service() {
        let config = Config::default();
        assert_eq!(config.server.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.output.root, PathBuf::from("/pdffigures2/data/output"));
        assert_eq!(config.tool.java_bin, "java");
        assert!(!config.output.flat);
    }

    #[test]
    fn server_host_env_overrides_default() {
        std::env::set_var("SERVER_HOST", "127.0.0.1");
        let config = Config::from_env().unwrap();
        assert_eq!(config.server.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        std::env::remove_var("SERVER_HOST");
    }

    #[test]
    fn parse_var_rejects_garbage() {
        std::env::set_var("TEST_FIGURES_PORT_GARBAGE", "not-a-port");
        let result: Result<u16, _> = parse_var("TEST_FIGURES_PORT_GARBAGE", 5001);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        std::env::remove_var("TEST_FIGURES_PORT_GARBAGE");
    }
}
