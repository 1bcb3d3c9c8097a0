//! Recording adapter for the `ImageFetcher` port.

use std::sync::{Arc, Mutex};

use super::record;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::FETCHER_PORT;
use crate::ports::image_fetcher::{FetchFuture, FetchedBytes, ImageFetcher};

/// Records downloads while delegating to an inner implementation.
pub struct RecordingImageFetcher {
    inner: Box<dyn ImageFetcher>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingImageFetcher {
    /// Wrap `inner`, recording every download into `recorder`.
    pub fn new(inner: Box<dyn ImageFetcher>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ImageFetcher for RecordingImageFetcher {
    fn fetch(&self, url: &str) -> FetchFuture<'_> {
        let url = url.to_string();
        Box::pin(async move {
            let result = self.inner.fetch(&url).await;
            let recorded = result.as_ref().map(|data| FetchedBytes { data: data.clone() });
            record(&self.recorder, FETCHER_PORT, "fetch", &url, &recorded);
            result
        })
    }
}
