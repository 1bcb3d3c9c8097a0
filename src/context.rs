//! Service context that bundles the port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::http::HttpFetcher;
use crate::adapters::live::openai::OpenAiGenerator;
use crate::adapters::recording::image_fetcher::RecordingImageFetcher;
use crate::adapters::recording::image_generator::RecordingImageGenerator;
use crate::adapters::replaying::image_fetcher::ReplayingImageFetcher;
use crate::adapters::replaying::image_generator::ReplayingImageGenerator;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::Config;
use crate::error::ImageError;
use crate::ports::{ImageFetcher, ImageGenerator};

/// The outbound boundaries the pipeline talks through.
pub struct ServiceContext {
    /// Generation API port.
    pub generator: Box<dyn ImageGenerator>,
    /// Image host port.
    pub fetcher: Box<dyn ImageFetcher>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Write the recorded cassette to disk.
    ///
    /// Must be called after the context that shares the recorder is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if adapters still hold the recorder or the file
    /// cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapters still hold the recorder".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Context backed by the real `OpenAI` API and image hosts.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured or the HTTP client
    /// cannot be built.
    pub fn live(config: &Config) -> Result<Self, ImageError> {
        let key = config.openai_key().ok_or(ImageError::MissingApiKey {
            provider: "OpenAI".into(),
            env_var: "OPENAI_API_KEY".into(),
        })?;
        Ok(Self {
            generator: Box::new(OpenAiGenerator::new(key)),
            fetcher: Box::new(HttpFetcher::new()?),
        })
    }

    /// Live context whose calls are also written to a cassette under
    /// `.designer/cassettes/<timestamp>/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the live context cannot be created.
    pub fn recording(config: &Config) -> Result<(Self, RecordingSession), ImageError> {
        let live = Self::live(config)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".designer/cassettes")
            .join(&timestamp)
            .join("pipeline.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-pipeline"),
            commit_hash(),
        )));

        let generator = RecordingImageGenerator::new(live.generator, Arc::clone(&recorder));
        let fetcher = RecordingImageFetcher::new(live.fetcher, Arc::clone(&recorder));
        let ctx = Self { generator: Box::new(generator), fetcher: Box::new(fetcher) };
        Ok((ctx, RecordingSession { recorder }))
    }

    /// Context that serves every call from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, ImageError> {
        let replayer = CassetteReplayer::load(path)
            .map_err(|e| ImageError::Config(format!("Failed to load cassette: {e}")))?;
        let replayer = Arc::new(Mutex::new(replayer));
        Ok(Self {
            generator: Box::new(ReplayingImageGenerator::new(Arc::clone(&replayer))),
            fetcher: Box::new(ReplayingImageFetcher::new(replayer)),
        })
    }
}

/// Current git commit hash, or "unknown" outside a repository.
fn commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
