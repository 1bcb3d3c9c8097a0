//! YAML parameter file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ImageError;
use crate::params::GenerationRequest;

/// Default location of the parameter file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "configs/params.yml";

/// Generation parameters read from the parameter file.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Number of images to request per description.
    pub n_image: u32,
    /// Output dimensions, one of the supported literals.
    pub image_dim: String,
    /// Model identifier.
    pub image_model: String,
    /// Provider-defined quality level.
    pub image_quality: String,
    /// `OpenAI` API key; `OPENAI_API_KEY` takes precedence.
    #[serde(default)]
    pub openai_api_key: Option<String>,
}

impl Config {
    /// Load the parameter file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Validate the parameters into a [`GenerationRequest`].
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidArgument`] for unsupported dimensions or a
    /// zero image count.
    pub fn generation_request(&self) -> Result<GenerationRequest, ImageError> {
        GenerationRequest::new(
            self.image_model.clone(),
            self.image_quality.clone(),
            self.n_image,
            &self.image_dim,
        )
    }

    /// Get the `OpenAI` API key, preferring the environment variable.
    #[must_use]
    pub fn openai_key(&self) -> Option<String> {
        self.openai_key_from(std::env::var("OPENAI_API_KEY").ok())
    }

    /// Pick the key from an environment value, falling back to the file.
    fn openai_key_from(&self, env: Option<String>) -> Option<String> {
        env.or_else(|| self.openai_api_key.clone())
    }
}

/// Discover the parameter file using the resolution order:
/// 1. Explicit path (from `--config`)
/// 2. `DESIGNER_CONFIG` environment variable
/// 3. `configs/params.yml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("DESIGNER_CONFIG") {
        return PathBuf::from(p);
    }

    PathBuf::from(DEFAULT_CONFIG_PATH)
}
