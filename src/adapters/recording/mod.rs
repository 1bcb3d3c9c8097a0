//! Recording adapters that capture interactions to cassettes.

pub mod image_fetcher;
pub mod image_generator;

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::warn;

use crate::cassette::recorder::CassetteRecorder;

/// Store one call outcome in the shared recorder.
pub(crate) fn record<I, T, E>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    I: Serialize,
    T: Serialize,
    E: std::fmt::Display,
{
    match recorder.lock() {
        Ok(mut guard) => guard.record_result(port, method, input, result),
        Err(e) => warn!(port, method, error = %e, "recorder lock poisoned, interaction dropped"),
    }
}
