// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{cleanup, DEFAULT_CLUSTER_NAME};
use crate::kubernetes::cleanup::{CleanupContext, PollBackoff};
use anyhow::{bail, Context, Result};
use std::env;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Cleanup configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Creator ID whose labelled resources get cleaned up
    pub creator_id: String,
    pub cluster_name: String,
    /// None disables the deadline
    pub cleanup_timeout: Option<Duration>,
    pub poll_interval: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let creator_id = lookup("KTF_CREATOR_ID")
            .context("KTF_CREATOR_ID environment variable not set")?;
        if creator_id.is_empty() {
            bail!("KTF_CREATOR_ID environment variable is empty");
        }

        let cluster_name =
            lookup("KTF_CLUSTER_NAME").unwrap_or_else(|| DEFAULT_CLUSTER_NAME.to_string());

        let timeout_secs: u64 = match lookup("KTF_CLEANUP_TIMEOUT_SECS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("KTF_CLEANUP_TIMEOUT_SECS is not a number: {}", v))?,
            None => cleanup::TIMEOUT_SECS,
        };
        let cleanup_timeout = match timeout_secs {
            0 => None,
            secs => Some(bounded("KTF_CLEANUP_TIMEOUT_SECS", Duration::from_secs(secs))?),
        };

        let poll_interval_ms: u64 = match lookup("KTF_CLEANUP_POLL_INTERVAL_MS") {
            Some(v) => v.parse().with_context(|| {
                format!("KTF_CLEANUP_POLL_INTERVAL_MS is not a number: {}", v)
            })?,
            None => cleanup::POLL_INTERVAL_MS,
        };
        if poll_interval_ms == 0 {
            bail!("KTF_CLEANUP_POLL_INTERVAL_MS must be at least 1");
        }
        let poll_interval = bounded(
            "KTF_CLEANUP_POLL_INTERVAL_MS",
            Duration::from_millis(poll_interval_ms),
        )?;

        Ok(Config {
            creator_id,
            cluster_name,
            cleanup_timeout,
            poll_interval,
        })
    }

    /// Build the cleanup context for this configuration, cancelled through `cancel`
    pub fn cleanup_context(&self, cancel: CancellationToken) -> CleanupContext {
        let max_interval =
            Duration::from_millis(cleanup::POLL_MAX_INTERVAL_MS).max(self.poll_interval);
        let ctx = CleanupContext::new()
            .with_cancellation(cancel)
            .with_backoff(PollBackoff::new(self.poll_interval, max_interval));

        match self.cleanup_timeout {
            Some(timeout) => ctx.with_timeout(timeout),
            None => ctx,
        }
    }
}

/// Reject durations that cannot be added to the current time
fn bounded(var: &str, duration: Duration) -> Result<Duration> {
    if Instant::now().checked_add(duration).is_none() {
        bail!("{} is out of range: {:?}", var, duration);
    }
    Ok(duration)
}
