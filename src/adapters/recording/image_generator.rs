//! Recording adapter for the `ImageGenerator` port.

use std::sync::{Arc, Mutex};

use super::record;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::GENERATOR_PORT;
use crate::ports::image_generator::{GenerateFuture, ImageGenerator, ImageRequest};

/// Records generation calls while delegating to an inner implementation.
pub struct RecordingImageGenerator {
    inner: Box<dyn ImageGenerator>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingImageGenerator {
    /// Wrap `inner`, recording every call into `recorder`.
    pub fn new(inner: Box<dyn ImageGenerator>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ImageGenerator for RecordingImageGenerator {
    fn generate(&self, request: &ImageRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let result = self.inner.generate(&request).await;
            record(&self.recorder, GENERATOR_PORT, "generate", &request, &result);
            result
        })
    }
}
