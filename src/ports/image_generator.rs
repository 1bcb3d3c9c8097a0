//! Image generator port for text-to-image APIs.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::ImageError;

/// A single call to the generation API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRequest {
    /// Model identifier (e.g., `"dall-e-3"`).
    pub model: String,
    /// The full prompt sent to the API.
    pub prompt: String,
    /// Pixel dimensions (`"1024x1024"`, `"1024x1792"`, `"1792x1024"`).
    pub size: String,
    /// Provider-defined quality level.
    pub quality: String,
    /// Number of images to generate.
    pub count: u32,
}

/// URLs of the generated images, in the order the API returned them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageResponse {
    /// Provider-hosted image URLs.
    pub urls: Vec<String>,
}

/// Boxed future type returned by [`ImageGenerator::generate`].
pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ImageResponse, ImageError>> + Send + 'a>>;

/// Generates images from text prompts via an external API.
pub trait ImageGenerator: Send + Sync {
    /// Generate images for the given request.
    fn generate(&self, request: &ImageRequest) -> GenerateFuture<'_>;
}
