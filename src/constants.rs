// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Kubernetes label keys used by ktf
pub mod labels {
    /// Marks a resource as created by a testing run. The value is the creator ID,
    /// which is what bulk cleanup selects on.
    pub const TEST_RESOURCE: &str = "created-by-ktf";
}

/// Cleanup polling configuration
pub mod cleanup {
    /// Initial interval in milliseconds between delete rounds
    pub const POLL_INTERVAL_MS: u64 = 250;
    /// Maximum interval in milliseconds between delete rounds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_MS: u64 = 5_000;
    /// Default deadline for a full cleanup in seconds
    pub const TIMEOUT_SECS: u64 = 300;
}

/// Prefix of kubeconfig temp files, followed by the cluster name
pub const KUBECONFIG_TEMPFILE_PREFIX: &str = "-kubeconfig-";

/// Cluster name used when none is configured
pub const DEFAULT_CLUSTER_NAME: &str = "default";
