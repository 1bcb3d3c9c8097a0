//! Generation parameters and their validation.

use std::fmt;
use std::str::FromStr;

use crate::error::ImageError;

/// Message reported for any dimensions string outside the supported set.
const DIMENSION_ERROR: &str = "Dimension must be '1024x1024', '1024x1792' or '1792x1024'";

/// Output pixel dimensions supported by the generation API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimensions {
    /// `1024x1024`
    Square,
    /// `1024x1792`
    Portrait,
    /// `1792x1024`
    Landscape,
}

impl Dimensions {
    /// The literal size string sent to the API.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square => "1024x1024",
            Self::Portrait => "1024x1792",
            Self::Landscape => "1792x1024",
        }
    }
}

impl FromStr for Dimensions {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1024x1024" => Ok(Self::Square),
            "1024x1792" => Ok(Self::Portrait),
            "1792x1024" => Ok(Self::Landscape),
            _ => Err(ImageError::InvalidArgument(DIMENSION_ERROR.to_string())),
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated, immutable parameters for every generation call of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    model: String,
    quality: String,
    count: u32,
    dimensions: Dimensions,
}

impl GenerationRequest {
    /// Validate and build the generation parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidArgument`] if `dimensions` is not one of
    /// the supported literals or `count` is zero.
    pub fn new(
        model: impl Into<String>,
        quality: impl Into<String>,
        count: u32,
        dimensions: &str,
    ) -> Result<Self, ImageError> {
        let dimensions = dimensions.parse()?;
        if count == 0 {
            return Err(ImageError::InvalidArgument(
                "Image count must be at least 1".to_string(),
            ));
        }
        Ok(Self { model: model.into(), quality: quality.into(), count, dimensions })
    }

    /// Model identifier (e.g. `"dall-e-3"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Provider-defined quality level.
    #[must_use]
    pub fn quality(&self) -> &str {
        &self.quality
    }

    /// Number of images requested per call.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Requested output dimensions.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }
}

/// Wrap a user description into the prompt sent to the generation API.
#[must_use]
pub fn visual_prompt(description: &str) -> String {
    format!("Create a visual following this description: {description}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_supported_dimensions() {
        assert_eq!("1024x1024".parse::<Dimensions>().unwrap(), Dimensions::Square);
        assert_eq!("1024x1792".parse::<Dimensions>().unwrap(), Dimensions::Portrait);
        assert_eq!("1792x1024".parse::<Dimensions>().unwrap(), Dimensions::Landscape);
    }

    #[test]
    fn dimensions_display_matches_literal() {
        assert_eq!(Dimensions::Portrait.to_string(), "1024x1792");
        assert_eq!(Dimensions::Landscape.as_str(), "1792x1024");
    }

    #[test]
    fn unsupported_dimensions_rejected() {
        for dim in ["800x600", "1024X1024", "1024x1024 ", "", "1536x1024"] {
            let err = dim.parse::<Dimensions>().unwrap_err();
            assert!(
                matches!(&err, ImageError::InvalidArgument(msg) if msg == DIMENSION_ERROR),
                "unexpected error for {dim:?}: {err}"
            );
        }
    }

    #[test]
    fn request_stores_parameters_verbatim() {
        let request = GenerationRequest::new("dall-e", "high", 2, "1024x1024").unwrap();
        assert_eq!(request.model(), "dall-e");
        assert_eq!(request.quality(), "high");
        assert_eq!(request.count(), 2);
        assert_eq!(request.dimensions().as_str(), "1024x1024");
    }

    #[test]
    fn request_rejects_bad_dimensions() {
        let err = GenerationRequest::new("dall-e", "high", 1, "800x600").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument: Dimension must be '1024x1024', '1024x1792' or '1792x1024'"
        );
    }

    #[test]
    fn request_rejects_zero_count() {
        assert!(matches!(
            GenerationRequest::new("dall-e", "high", 0, "1024x1024"),
            Err(ImageError::InvalidArgument(_))
        ));
    }

    #[test]
    fn prompt_wraps_description() {
        assert_eq!(
            visual_prompt("A forest at sunset"),
            "Create a visual following this description: A forest at sunset"
        );
    }
}
