//! Collects interactions and writes them out as a cassette.

use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;
use tracing::warn;

use super::{Cassette, Interaction};

/// Accumulates port interactions for one session.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    commit: String,
    interactions: Vec<Interaction>,
}

impl CassetteRecorder {
    /// Create a recorder that will write to `path` when finished.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            commit: commit.into(),
            interactions: Vec::new(),
        }
    }

    /// Record the outcome of one port call.
    ///
    /// Successful values are stored under `Ok`, errors as their display text
    /// under `Err`. Values that fail to serialize are skipped with a warning.
    pub fn record_result<I, T, E>(
        &mut self,
        port: &str,
        method: &str,
        input: &I,
        result: &Result<T, E>,
    ) where
        I: Serialize,
        T: Serialize,
        E: std::fmt::Display,
    {
        let input = match serde_json::to_value(input) {
            Ok(v) => v,
            Err(e) => {
                warn!(port, method, error = %e, "skipping unserializable input");
                return;
            }
        };
        let output = match result {
            Ok(v) => match serde_json::to_value(v) {
                Ok(v) => serde_json::json!({ "Ok": v }),
                Err(e) => {
                    warn!(port, method, error = %e, "skipping unserializable result");
                    return;
                }
            },
            Err(e) => serde_json::json!({ "Err": e.to_string() }),
        };

        let seq = self.interactions.len() as u64;
        self.interactions.push(Interaction {
            seq,
            port: port.to_string(),
            method: method.to_string(),
            input,
            output,
        });
    }

    /// Write the cassette YAML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let cassette = Cassette {
            name: self.name,
            recorded_at: Utc::now(),
            commit: self.commit,
            interactions: self.interactions,
        };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn records_ok_and_err_in_sequence() {
        let dir = std::env::temp_dir().join("designer_recorder_test");
        let path = dir.join("session.cassette.yaml");

        let mut recorder = CassetteRecorder::new(&path, "test-recording", "deadbeef");
        let ok: Result<Vec<String>, String> = Ok(vec!["https://a/1.png".into()]);
        recorder.record_result("image_generator", "generate", &json!({"prompt": "a cat"}), &ok);
        let err: Result<Vec<u8>, String> = Err("operation timed out".into());
        recorder.record_result("image_fetcher", "fetch", &"https://a/1.png", &err);

        let result_path = recorder.finish().expect("finish should succeed");
        assert_eq!(result_path, path);

        let content = std::fs::read_to_string(&path).unwrap();
        let cassette: Cassette = serde_yaml::from_str(&content).unwrap();
        assert_eq!(cassette.name, "test-recording");
        assert_eq!(cassette.commit, "deadbeef");
        assert_eq!(cassette.interactions.len(), 2);
        assert_eq!(cassette.interactions[0].seq, 0);
        assert_eq!(cassette.interactions[0].output, json!({"Ok": ["https://a/1.png"]}));
        assert_eq!(cassette.interactions[1].seq, 1);
        assert_eq!(cassette.interactions[1].port, "image_fetcher");
        assert_eq!(cassette.interactions[1].output, json!({"Err": "operation timed out"}));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
