//! Process settings, read once from the environment at startup.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use ecotrace_advice::SuggestionConfig;
use ecotrace_ai::{LinearModel, SharedModel};
use ecotrace_pipeline::FootprintPipeline;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_INFERENCE_TIMEOUT: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub bind_addr: String,
    /// Linear model artifact (JSON). Unset means the server runs without a model.
    pub model_path: Option<PathBuf>,
    /// Suggestion thresholds (JSON). Unset means built-in defaults.
    pub config_path: Option<PathBuf>,
    pub inference_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            model_path: None,
            config_path: None,
            inference_timeout: DEFAULT_INFERENCE_TIMEOUT,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let inference_timeout = match non_empty("ECOTRACE_INFERENCE_TIMEOUT_MS") {
            Some(raw) => {
                let ms: u64 = raw.trim().parse().with_context(|| {
                    format!("ECOTRACE_INFERENCE_TIMEOUT_MS={raw:?} is not a whole number")
                })?;
                anyhow::ensure!(ms > 0, "ECOTRACE_INFERENCE_TIMEOUT_MS must be positive");
                Duration::from_millis(ms)
            }
            None => DEFAULT_INFERENCE_TIMEOUT,
        };

        Ok(Self {
            bind_addr: non_empty("ECOTRACE_BIND_ADDR")
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            model_path: non_empty("ECOTRACE_MODEL_PATH").map(PathBuf::from),
            config_path: non_empty("ECOTRACE_CONFIG_PATH").map(PathBuf::from),
            inference_timeout,
        })
    }

    /// Load and validate the suggestion configuration. Any problem here is fatal.
    pub fn load_config(&self) -> Result<SuggestionConfig> {
        let config = match &self.config_path {
            Some(path) => SuggestionConfig::from_path(path)
                .with_context(|| format!("loading suggestion config from {}", path.display()))?,
            None => {
                info!("ECOTRACE_CONFIG_PATH not set; using default suggestion thresholds");
                SuggestionConfig::default()
            }
        };
        Ok(config)
    }

    /// Load the model, if configured.
    ///
    /// A missing or unreadable model does not stop the process: requests
    /// fail with "estimation unavailable" until an operator fixes it.
    pub fn load_model(&self) -> Option<SharedModel> {
        let Some(path) = &self.model_path else {
            warn!("ECOTRACE_MODEL_PATH not set; footprint estimation is unavailable");
            return None;
        };

        match LinearModel::from_path(path) {
            Ok(model) => Some(Arc::new(model)),
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to load footprint model");
                None
            }
        }
    }

    pub fn build_pipeline(&self) -> Result<(FootprintPipeline, SuggestionConfig)> {
        let config = self.load_config()?;
        let pipeline = FootprintPipeline::from_config(self.load_model(), &config)
            .context("building the estimation pipeline")?;
        Ok((pipeline, config))
    }
}
