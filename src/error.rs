//! Unified error type for the graphic designer tool.

use thiserror::Error;

/// Errors that can occur while turning a description into an image.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The generation API returned an error or an unusable response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A network error or timeout occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid generation parameter.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Fetched bytes could not be decoded as an image.
    #[error("Decoding error: {0}")]
    Decode(#[from] image::ImageError),

    /// The decoded image could not be written in the requested format.
    #[error("Image conversion error: {0}")]
    ImageConversion(String),

    /// A recorded error served back from a cassette, shown as recorded.
    #[error("{0}")]
    Replayed(String),

    /// No API key configured for the provider.
    #[error("No API key for {provider}. Set {env_var} or add it to config file.")]
    MissingApiKey {
        /// The provider name.
        provider: String,
        /// The environment variable name.
        env_var: String,
    },
}
