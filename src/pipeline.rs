//! Description-to-image pipeline: generate, download, decode.

use image::DynamicImage;
use tracing::{debug, info};

use crate::context::ServiceContext;
use crate::error::ImageError;
use crate::params::{visual_prompt, GenerationRequest};
use crate::ports::ImageRequest;

/// Turns a free-text description into a decoded image.
///
/// Every call is independent. Generation, then each download, run one after
/// another with no retries; the first failure is returned as is.
pub struct VisualRequestPipeline {
    request: GenerationRequest,
    ctx: ServiceContext,
}

impl VisualRequestPipeline {
    /// Bind validated generation parameters to the outbound ports.
    #[must_use]
    pub fn new(request: GenerationRequest, ctx: ServiceContext) -> Self {
        Self { request, ctx }
    }

    /// Parameters used for every call.
    #[must_use]
    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    /// Ask the generation API for images matching `description`.
    ///
    /// Returns the URLs in the order the API listed them.
    ///
    /// # Errors
    ///
    /// Propagates transport and API errors from the generator.
    pub async fn request_image_urls(&self, description: &str) -> Result<Vec<String>, ImageError> {
        let request = ImageRequest {
            model: self.request.model().to_string(),
            prompt: visual_prompt(description),
            size: self.request.dimensions().as_str().to_string(),
            quality: self.request.quality().to_string(),
            count: self.request.count(),
        };
        let response = self.ctx.generator.generate(&request).await?;
        debug!(count = response.urls.len(), "received image urls");
        Ok(response.urls)
    }

    /// Download the raw bytes behind `url`, whatever the response status.
    ///
    /// # Errors
    ///
    /// Returns a network error on connection failure or timeout.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ImageError> {
        self.ctx.fetcher.fetch(url).await
    }

    /// Generate images for `description`, download all of them and decode
    /// the first.
    ///
    /// # Errors
    ///
    /// Returns the first generation, download or decoding error, or an API
    /// error if the generator returned no URLs.
    pub async fn get_images(&self, description: &str) -> Result<DynamicImage, ImageError> {
        info!(
            model = self.request.model(),
            size = %self.request.dimensions(),
            n = self.request.count(),
            "generating visual"
        );
        let urls = self.request_image_urls(description).await?;

        let mut buffers = Vec::with_capacity(urls.len());
        for url in &urls {
            buffers.push(self.fetch_bytes(url).await?);
        }

        // Only the first image is shown; the rest are downloaded and dropped.
        let first = buffers.into_iter().next().ok_or_else(|| ImageError::Api {
            status: 200,
            message: "No images in response".to_string(),
        })?;
        let decoded = image::load_from_memory(&first)?;
        info!(width = decoded.width(), height = decoded.height(), "decoded visual");
        Ok(decoded)
    }
}
