//! # Campus Runtime
//!
//! Entry point for the campus auth gateway.
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry (logging + metrics) from `CC_*` environment
//! 2. Load and validate gateway configuration
//! 3. Spawn the limiter sweep task
//! 4. Serve HTTP until Ctrl+C, then stop the sweeper

use anyhow::{Context, Result};
use campus_telemetry::{init_telemetry, TelemetryConfig};
use cc_03_auth_gateway::{AuthGatewayService, GatewayConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry = TelemetryConfig::from_env();
    init_telemetry(&telemetry).context("Failed to initialize telemetry")?;

    let config = GatewayConfig::from_env().context("Invalid gateway configuration")?;
    info!(
        service = %telemetry.service_name,
        addr = %config.http_addr(),
        max_attempts = config.limiter.max_attempts,
        "Starting campus auth gateway"
    );

    let service = AuthGatewayService::new(config).context("Failed to create gateway service")?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let sweeper = service.spawn_sweeper(shutdown_rx);

    service
        .serve(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for Ctrl+C");
            }
            info!("Shutdown signal received");
        })
        .await
        .context("HTTP server failed")?;

    if let Err(e) = shutdown_tx.send(true) {
        error!(error = %e, "Failed to signal sweep task");
    }
    sweeper.await.context("Sweep task panicked")?;

    info!("Campus auth gateway stopped");
    Ok(())
}
