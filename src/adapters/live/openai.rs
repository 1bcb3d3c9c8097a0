//! Live adapter for the `OpenAI` image generation API.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::ImageError;
use crate::ports::image_generator::{
    GenerateFuture, ImageGenerator, ImageRequest, ImageResponse,
};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/images/generations";

/// Live `OpenAI` image generator that calls the `OpenAI` Images API.
pub struct OpenAiGenerator {
    client: Client,
    api_key: String,
}

impl OpenAiGenerator {
    /// Create a new `OpenAI` generator with the given API key.
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self { client: Client::new(), api_key }
    }
}

impl ImageGenerator for OpenAiGenerator {
    fn generate(&self, request: &ImageRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let body = request_body(&request);

            debug!(model = %request.model, n = request.count, "requesting image generation");

            let response = self
                .client
                .post(OPENAI_API_URL)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                return Err(ImageError::Api { status: status.as_u16(), message: response_text });
            }

            parse_response(&response_text)
        })
    }
}

/// JSON body for the Images API, asking for hosted URLs rather than base64.
fn request_body(request: &ImageRequest) -> serde_json::Value {
    serde_json::json!({
        "model": request.model,
        "prompt": request.prompt,
        "n": request.count,
        "size": request.size,
        "quality": request.quality,
        "response_format": "url",
    })
}

/// Extract the image URLs from a successful response body.
fn parse_response(body: &str) -> Result<ImageResponse, ImageError> {
    let parsed: OpenAiResponse = serde_json::from_str(body).map_err(|e| ImageError::Api {
        status: 200,
        message: format!("Failed to parse response: {e}"),
    })?;

    let urls: Vec<String> = parsed.data.into_iter().map(|item| item.url).collect();

    if urls.is_empty() {
        let truncated = if body.len() > 500 {
            format!("{}...", body.chars().take(500).collect::<String>())
        } else {
            body.to_string()
        };
        return Err(ImageError::Api {
            status: 200,
            message: format!("No images in response. Body: {truncated}"),
        });
    }

    Ok(ImageResponse { urls })
}

// --- OpenAI API response types ---

#[derive(Deserialize)]
struct OpenAiResponse {
    data: Vec<OpenAiImageData>,
}

#[derive(Deserialize)]
struct OpenAiImageData {
    url: String,
}
