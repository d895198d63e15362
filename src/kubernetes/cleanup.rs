// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Bulk cleanup of resources tagged with a creator ID.
//!
//! Namespace deletion is asynchronous: an accepted delete leaves the namespace
//! terminating until its finalizers ran. Cleanup therefore keeps re-issuing
//! deletes against the namespaces it listed up front until every one of them
//! answers "not found".

use crate::constants::cleanup::{POLL_INTERVAL_MS, POLL_MAX_INTERVAL_MS};
use crate::error::{KtfError, Result};
use crate::kubernetes::namespaces::{creator_label_selector, validate_creator_id};
use crate::types::cluster::Cluster;
use k8s_openapi::api::core::v1::Namespace;
use kube::{
    api::{DeleteParams, ListParams},
    Api, ResourceExt,
};
use std::collections::BTreeSet;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

/// Shortest wait between delete rounds
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Exponential backoff between delete rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollBackoff {
    initial: Duration,
    max: Duration,
}

impl PollBackoff {
    /// Intervals below one millisecond are raised to it, and `max` is never
    /// below `initial`.
    pub fn new(initial: Duration, max: Duration) -> Self {
        let initial = initial.max(MIN_POLL_INTERVAL);
        Self {
            initial,
            max: max.max(initial),
        }
    }

    pub fn initial(&self) -> Duration {
        self.initial
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    fn next(&self, current: Duration) -> Duration {
        current.saturating_mul(2).min(self.max)
    }
}

impl Default for PollBackoff {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(POLL_INTERVAL_MS),
            Duration::from_millis(POLL_MAX_INTERVAL_MS),
        )
    }
}

/// Cancellation and deadline for a cleanup run
#[derive(Debug, Clone, Default)]
pub struct CleanupContext {
    cancel: CancellationToken,
    deadline: Option<(Instant, Duration)>,
    backoff: PollBackoff,
}

impl CleanupContext {
    /// A context that never ends on its own
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Set a deadline `timeout` from now. A timeout too large to be represented
    /// as a point in time leaves the context without a deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout).map(|at| (at, timeout));
        self
    }

    pub fn with_backoff(mut self, backoff: PollBackoff) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline.map(|(at, _)| at)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.deadline.map(|(_, timeout)| timeout)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// The error to report if the context has ended, checked before every round
    fn ended(&self, pending: &BTreeSet<String>) -> Option<KtfError> {
        let names = || -> Vec<String> { pending.iter().cloned().collect() };

        if self.cancel.is_cancelled() {
            return Some(KtfError::CleanupCancelled { pending: names() });
        }
        match self.deadline {
            Some((at, timeout)) if Instant::now() >= at => Some(KtfError::CleanupTimedOut {
                timeout,
                pending: names(),
            }),
            _ => None,
        }
    }

    /// Sleep for `interval`, returning early when the context ends
    async fn wait(&self, interval: Duration) {
        let wake = match (Instant::now().checked_add(interval), self.deadline()) {
            (Some(at), Some(deadline)) => Some(at.min(deadline)),
            (at, deadline) => at.or(deadline),
        };

        // no representable wake-up time: only cancellation ends the wait
        let Some(wake) = wake else {
            self.cancel.cancelled().await;
            return;
        };

        tokio::select! {
            _ = self.cancel.cancelled() => {}
            _ = sleep_until(wake) => {}
        }
    }
}

/// Clean up all namespaces created with the given creator ID.
///
/// The set of namespaces is listed once; namespaces labelled while cleanup is
/// running are not picked up. Returns once every listed namespace is gone, on the
/// first delete failure other than "not found", or when the context ends.
#[instrument(skip(cluster, ctx), fields(cluster = %cluster.name()))]
pub async fn cleanup_generated_resources<C: Cluster + ?Sized>(
    cluster: &C,
    creator_id: &str,
    ctx: &CleanupContext,
) -> Result<()> {
    validate_creator_id(creator_id)?;

    let namespaces: Api<Namespace> = Api::all(cluster.client().clone());
    let lp = ListParams::default().labels(&creator_label_selector(creator_id));
    let listed: Vec<String> = namespaces
        .list(&lp)
        .await?
        .items
        .iter()
        .map(|ns| ns.name_any())
        .collect();

    let mut pending: BTreeSet<String> = listed.iter().cloned().collect();
    info!(
        "Cleaning up {} namespaces created by {}",
        pending.len(),
        creator_id
    );

    let mut interval = ctx.backoff.initial();
    let mut round = 0u32;
    while !pending.is_empty() {
        if let Some(err) = ctx.ended(&pending) {
            return Err(err);
        }

        round += 1;
        for name in &listed {
            match namespaces.delete(name, &DeleteParams::default()).await {
                Ok(_) => debug!("Namespace {} is still terminating", name),
                Err(kube::Error::Api(err)) if err.code == 404 => {
                    if pending.remove(name) {
                        debug!("Namespace {} is gone", name);
                    }
                }
                Err(source) => {
                    return Err(KtfError::NamespaceDeleteError {
                        name: name.clone(),
                        source,
                    })
                }
            }
        }

        if !pending.is_empty() {
            debug!(
                "{} namespaces pending after round {}, waiting {:?}",
                pending.len(),
                round,
                interval
            );
            ctx.wait(interval).await;
            interval = ctx.backoff.next(interval);
        }
    }

    info!("Cleanup for {} complete after {} rounds", creator_id, round);
    Ok(())
}
