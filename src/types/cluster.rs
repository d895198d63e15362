// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The cluster capability consumed by every ktf operation.

use crate::error::{KtfError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use std::fmt;
use tracing::{debug, instrument};

/// A handle on a Kubernetes cluster.
///
/// Implementations own the connection configuration and a client built from it;
/// ktf only borrows them for the duration of a call.
pub trait Cluster: Send + Sync {
    /// Logical name of the cluster, used to name kubeconfig entries
    fn name(&self) -> &str;

    /// Connection configuration (endpoint, credentials, TLS roots)
    fn config(&self) -> &Config;

    /// Client for issuing API requests
    fn client(&self) -> &Client;
}

/// A cluster that already exists and is reachable with a known configuration.
#[derive(Clone)]
pub struct ExistingCluster {
    name: String,
    config: Config,
    client: Client,
}

impl ExistingCluster {
    /// Build a cluster handle and its client from an explicit configuration
    pub fn new(name: impl Into<String>, config: Config) -> Result<Self> {
        let client = Client::try_from(config.clone())
            .map_err(|e| KtfError::KubeconfigError(format!("Failed to create client: {}", e)))?;

        Ok(Self::with_client(name, config, client))
    }

    /// Use a pre-built client, e.g. one backed by a custom service stack
    pub fn with_client(name: impl Into<String>, config: Config, client: Client) -> Self {
        Self {
            name: name.into(),
            config,
            client,
        }
    }

    /// Infer the configuration from the environment (`KUBECONFIG`, `~/.kube/config`
    /// or the in-cluster service account)
    #[instrument]
    pub async fn infer(name: &str) -> Result<Self> {
        let config = Config::infer()
            .await
            .map_err(|e| KtfError::KubeconfigError(format!("Failed to infer config: {}", e)))?;

        debug!("Inferred cluster URL {}", config.cluster_url);
        Self::new(name, config)
    }

    /// Build a cluster handle from a kubeconfig document, using its current context
    pub async fn from_kubeconfig(name: &str, kubeconfig: &str) -> Result<Self> {
        let kubeconfig_parsed: Kubeconfig = serde_yaml::from_str(kubeconfig).map_err(|e| {
            KtfError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e))
        })?;

        let options = KubeConfigOptions::default();
        let config = Config::from_custom_kubeconfig(kubeconfig_parsed, &options)
            .await
            .map_err(|e| KtfError::KubeconfigError(format!("Failed to create config: {}", e)))?;

        Self::new(name, config)
    }
}

impl Cluster for ExistingCluster {
    fn name(&self) -> &str {
        &self.name
    }

    fn config(&self) -> &Config {
        &self.config
    }

    fn client(&self) -> &Client {
        &self.client
    }
}

impl fmt::Debug for ExistingCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExistingCluster")
            .field("name", &self.name)
            .field("cluster_url", &self.config.cluster_url)
            .finish()
    }
}
