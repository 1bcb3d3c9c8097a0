//! Image fetcher port for downloading provider-hosted image bytes.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::ImageError;

/// Raw response body of a fetch, serialized as base64 in cassettes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedBytes {
    /// Raw payload, whatever the HTTP status was.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

/// Boxed future type returned by [`ImageFetcher::fetch`].
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<u8>, ImageError>> + Send + 'a>>;

/// Downloads the bytes behind a generated image URL.
pub trait ImageFetcher: Send + Sync {
    /// Fetch the raw body at `url`.
    fn fetch(&self, url: &str) -> FetchFuture<'_>;
}

/// Serde helper for serializing `Vec<u8>` as base64 strings in cassettes.
mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize bytes as base64 string.
    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        serializer.serialize_str(&encoded)
    }

    /// Deserialize base64 string to bytes.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}
