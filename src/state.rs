//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::error::ExtractError;
use crate::extract::FigureExtractor;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    http: reqwest::Client,
    extractor: FigureExtractor,
}

impl AppState {
    /// Create the application state.
    ///
    /// This creates the output directory tree; an unwritable output root is
    /// a startup error.
    pub fn new(config: Config) -> Result<Self, ExtractError> {
        let extractor = FigureExtractor::new(config.output.clone(), config.tool.clone())?;
        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                http: reqwest::Client::new(),
                extractor,
            }),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the shared HTTP client
    pub fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// Get the figure extraction service
    pub fn extractor(&self) -> &FigureExtractor {
        &self.inner.extractor
    }
}
