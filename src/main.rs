// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use kube::Client;
use tracing::{info, info_span, warn, Instrument};
use tracing_subscriber::EnvFilter;

use expose_controller::config::Config;
use expose_controller::constants::COMPONENT;
use expose_controller::controller::Controller;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    run()
        .instrument(info_span!("controller", component = COMPONENT))
        .await
}

async fn run() -> Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "Configuration loaded: exposer={}, namespace={}, resync_period={}s",
        config.exposer,
        config.namespace.as_deref().unwrap_or("<all>"),
        config.resync_period.as_secs()
    );

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    let controller =
        Controller::new(client, &config).context("Failed to create expose controller")?;

    // Stop on Ctrl-C
    let handle = controller.handle();
    tokio::spawn(
        async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => handle.stop(),
                Err(e) => warn!("Failed to listen for shutdown signal: {}", e),
            }
        }
        .in_current_span(),
    );

    controller.run().await;
    Ok(())
}
