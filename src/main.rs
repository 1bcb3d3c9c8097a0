//! Graphic designer tool - turn a visual description into a generated image.

mod adapters;
mod cassette;
mod cli;
mod config;
mod context;
mod error;
mod output;
mod params;
mod pipeline;
mod ports;

use std::path::Path;
use std::process;

use clap::Parser;
use tracing::{debug, info, warn, Level};

use crate::cli::Cli;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::ImageError;
use crate::output::{resolve_output_path, save_image};
use crate::pipeline::VisualRequestPipeline;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ImageError> {
    // Load and validate parameters before touching the network
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(ImageError::Config)?;
    let request = config.generation_request()?;

    let description = cli.resolve_description()?;

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var("DESIGNER_REPLAY").ok();
    let is_recording = std::env::var("DESIGNER_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        debug!(cassette = %cassette_path, "replaying");
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else if is_recording {
        debug!("recording mode enabled");
        let (ctx, session) = ServiceContext::recording(&config)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config)?, None)
    };

    let pipeline = VisualRequestPipeline::new(request, ctx);
    debug!(request = ?pipeline.request(), config = %config_path.display(), "pipeline ready");
    let result = pipeline.get_images(&description).await;

    // Adapters release the recorder once the pipeline is gone
    drop(pipeline);
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => info!("Cassette saved: {}", path.display()),
            Err(e) => warn!("failed to save cassette: {e}"),
        }
    }

    let image = result?;
    let output_path = resolve_output_path(cli.output.as_deref(), &description);
    save_image(&image, &output_path)?;
    eprintln!("Saved: {}", output_path.display());

    Ok(())
}
