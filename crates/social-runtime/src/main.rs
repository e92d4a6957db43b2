//! # Social-Activity Runtime
//!
//! Entry point for the social-activity backend.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Install logging
//! 3. Build every module onto one event bus
//! 4. Start the response listener and the query responders
//! 5. Run the seeded walkthrough
//! 6. Wait for Ctrl+C, then shut down

use anyhow::{Context, Result};
use social_runtime::{demo, RuntimeConfig, SocialRuntime};
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env();
    social_telemetry::init_logging(&config.telemetry).context("Failed to initialize logging")?;

    let runtime = SocialRuntime::new(config).context("Invalid configuration")?;
    runtime.start();

    if let Err(e) = demo::run(&runtime.container()).await {
        warn!("Walkthrough failed: {:#}", e);
    }

    info!("Runtime is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await;

    match social_telemetry::export_metrics() {
        Ok(text) => debug!(metrics = %text, "Final metrics"),
        Err(e) => warn!("Could not export metrics: {}", e),
    }

    Ok(())
}
