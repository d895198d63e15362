// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KtfError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error(r#"empty string "" is not a valid creator ID"#)]
    InvalidCreatorId,

    #[error("{0} is not a supported ingress type")]
    UnsupportedIngressType(String),

    #[error("failed to delete namespace resource {name}: {source}")]
    NamespaceDeleteError {
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error(
        "context completed while waiting for cleanup ({} namespaces still pending)",
        .pending.len()
    )]
    CleanupCancelled { pending: Vec<String> },

    #[error(
        "context completed with error while waiting for cleanup: deadline of {timeout:?} exceeded ({} namespaces still pending)",
        .pending.len()
    )]
    CleanupTimedOut {
        timeout: Duration,
        pending: Vec<String>,
    },

    #[error("Failed to generate kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl KtfError {
    /// True when the error is an API response with the given HTTP status code
    pub fn is_api_status(&self, code: u16) -> bool {
        match self {
            KtfError::KubeError(kube::Error::Api(err))
            | KtfError::NamespaceDeleteError {
                source: kube::Error::Api(err),
                ..
            } => err.code == code,
            _ => false,
        }
    }

    /// True for the convergence failures of the cleanup loop
    pub fn is_cleanup_incomplete(&self) -> bool {
        matches!(
            self,
            KtfError::CleanupCancelled { .. } | KtfError::CleanupTimedOut { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, KtfError>;
