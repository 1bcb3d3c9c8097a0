//! Replaying adapters that serve recorded interactions from cassettes.

pub mod image_fetcher;
pub mod image_generator;

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;
use crate::error::ImageError;

/// Pull the next recorded result for `port`/`method` out of the shared replayer.
pub(crate) fn replay<T: DeserializeOwned>(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Result<T, ImageError> {
    let mut guard = replayer
        .lock()
        .map_err(|e| ImageError::Config(format!("Replayer lock poisoned: {e}")))?;
    guard.next_result(port, method).map_err(ImageError::Replayed)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::cassette::{Cassette, Interaction, FETCHER_PORT};
    use crate::ports::image_fetcher::FetchedBytes;

    fn replayer_with(output: serde_json::Value) -> Arc<Mutex<CassetteReplayer>> {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: FETCHER_PORT.into(),
                method: "fetch".into(),
                input: json!("https://example.com/1.png"),
                output,
            }],
        };
        Arc::new(Mutex::new(CassetteReplayer::new(cassette)))
    }

    #[test]
    fn recorded_error_keeps_its_message() {
        let replayer = replayer_with(json!({"Err": "Network error: operation timed out"}));
        let err = replay::<FetchedBytes>(&replayer, FETCHER_PORT, "fetch").unwrap_err();
        assert!(matches!(err, ImageError::Replayed(_)));
        assert_eq!(err.to_string(), "Network error: operation timed out");
    }

    #[test]
    fn recorded_bytes_are_served() {
        let replayer = replayer_with(json!({"Ok": {"data": "AQID"}}));
        let bytes = replay::<FetchedBytes>(&replayer, FETCHER_PORT, "fetch").unwrap();
        assert_eq!(bytes.data, [1, 2, 3]);
        let err = replay::<FetchedBytes>(&replayer, FETCHER_PORT, "fetch").unwrap_err();
        assert!(err.to_string().starts_with("Cassette exhausted"));
    }
}
