//! Replaying adapter for the `ImageFetcher` port.

use std::sync::{Arc, Mutex};

use super::replay;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::FETCHER_PORT;
use crate::ports::image_fetcher::{FetchFuture, FetchedBytes, ImageFetcher};

/// Serves recorded downloads from a cassette.
pub struct ReplayingImageFetcher {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingImageFetcher {
    /// Create a replaying fetcher backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl ImageFetcher for ReplayingImageFetcher {
    fn fetch(&self, _url: &str) -> FetchFuture<'_> {
        let result = replay::<FetchedBytes>(&self.replayer, FETCHER_PORT, "fetch");
        Box::pin(async move { result.map(|bytes| bytes.data) })
    }
}
