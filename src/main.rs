// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ktf::config::Config;
use ktf::kubernetes::cleanup_generated_resources;
use ktf::types::ExistingCluster;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: creator_id={}, cluster={}",
        config.creator_id, config.cluster_name
    );

    let cluster = ExistingCluster::infer(&config.cluster_name).await?;
    info!("Connected to Kubernetes cluster {}", config.cluster_name);

    // Ctrl-C aborts the wait, leaving the remaining namespaces terminating
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, abandoning cleanup");
            on_signal.cancel();
        }
    });

    let ctx = config.cleanup_context(cancel);
    cleanup_generated_resources(&cluster, &config.creator_id, &ctx)
        .await
        .with_context(|| {
            format!(
                "Failed to clean up resources created by {}",
                config.creator_id
            )
        })?;

    info!("Cleanup complete");
    Ok(())
}
