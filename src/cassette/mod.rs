//! Record/replay of port interactions for deterministic, network-free runs.
//!
//! A cassette is a YAML document holding every call made through the ports
//! during one session, in call order.

pub mod recorder;
pub mod replayer;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Port name of the generation API boundary.
pub const GENERATOR_PORT: &str = "image_generator";
/// Port name of the image download boundary.
pub const FETCHER_PORT: &str = "image_fetcher";

/// A recorded session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Human-readable session name.
    pub name: String,
    /// When the session was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Git commit the recording was made from.
    pub commit: String,
    /// Interactions in call order.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// One call through a port.
///
/// `output` follows the `{"Ok": value}` / `{"Err": message}` convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Position of the call within the session.
    pub seq: u64,
    /// Port the call went through.
    pub port: String,
    /// Port method.
    pub method: String,
    /// Serialized call input.
    #[serde(default)]
    pub input: serde_json::Value,
    /// Serialized call result.
    pub output: serde_json::Value,
}
