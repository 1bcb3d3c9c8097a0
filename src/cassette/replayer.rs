//! Serves recorded interactions back from a cassette.

use std::collections::{HashMap, VecDeque};
use std::path::Path;

use serde::de::DeserializeOwned;

use super::{Cassette, Interaction};

/// Replays a cassette, handing out interactions in order per port/method.
#[derive(Debug)]
pub struct CassetteReplayer {
    queues: HashMap<(String, String), VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Index the interactions of a loaded cassette.
    #[must_use]
    pub fn new(cassette: Cassette) -> Self {
        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction);
        }
        Self { queues }
    }

    /// Read and parse a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid cassette.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(Self::new(cassette))
    }

    /// Take the next recorded interaction for `port`/`method`.
    ///
    /// # Errors
    ///
    /// Returns an error once the cassette holds no further interaction for
    /// the pair.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Result<Interaction, String> {
        self.queues
            .get_mut(&(port.to_string(), method.to_string()))
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| {
                format!("Cassette exhausted: no more interactions for {port}::{method}")
            })
    }

    /// Take the next interaction and decode its recorded result.
    ///
    /// # Errors
    ///
    /// Returns the recorded `Err` message, or an error if the cassette is
    /// exhausted or the recorded value does not match `T`.
    pub fn next_result<T: DeserializeOwned>(
        &mut self,
        port: &str,
        method: &str,
    ) -> Result<T, String> {
        let output = self.next_interaction(port, method)?.output;
        decode_output(output)
    }
}

/// Decode an `{"Ok": ..}` / `{"Err": ..}` output; bare values count as `Ok`.
fn decode_output<T: DeserializeOwned>(output: serde_json::Value) -> Result<T, String> {
    if let Some(err) = output.get("Err") {
        return Err(err.as_str().unwrap_or("replayed error").to_string());
    }
    let value = match output.get("Ok") {
        Some(ok) => ok.clone(),
        None => output,
    };
    serde_json::from_value(value).map_err(|e| format!("Recorded output does not match: {e}"))
}
