// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubeconfig rendering for a cluster's connection configuration

use crate::constants::KUBECONFIG_TEMPFILE_PREFIX;
use crate::error::{KtfError, Result};
use crate::types::cluster::Cluster;
use base64::{engine::general_purpose::STANDARD, Engine};
use kube::config::{
    Cluster as ClusterEntry, Context, Kubeconfig, NamedAuthInfo, NamedCluster, NamedContext,
};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Render a kubeconfig with a single cluster, user and context, all named after
/// the cluster, selected as the current context.
pub fn generate_kubeconfig<C: Cluster + ?Sized>(cluster: &C) -> Result<String> {
    let name = cluster.name().to_string();
    let config = cluster.config();

    let certificate_authority_data = config
        .root_cert
        .as_ref()
        .filter(|certs| !certs.is_empty())
        .map(|certs| {
            let pems: Vec<pem::Pem> = certs
                .iter()
                .map(|der| pem::Pem::new("CERTIFICATE", der.clone()))
                .collect();
            STANDARD.encode(pem::encode_many(&pems))
        });

    let kubeconfig = Kubeconfig {
        api_version: Some("v1".to_string()),
        kind: Some("Config".to_string()),
        clusters: vec![NamedCluster {
            name: name.clone(),
            cluster: Some(ClusterEntry {
                server: config.cluster_url.to_string().into(),
                certificate_authority_data,
                insecure_skip_tls_verify: config.accept_invalid_certs.then_some(true),
                tls_server_name: config.tls_server_name.clone(),
                proxy_url: config.proxy_url.as_ref().map(|proxy| proxy.to_string()),
                ..Default::default()
            }),
        }],
        auth_infos: vec![NamedAuthInfo {
            name: name.clone(),
            auth_info: Some(config.auth_info.clone()),
        }],
        contexts: vec![NamedContext {
            name: name.clone(),
            context: Some(Context {
                cluster: name.clone(),
                user: name.clone().into(),
                namespace: Some(config.default_namespace.clone()),
                ..Default::default()
            }),
        }],
        current_context: Some(name),
        ..Default::default()
    };

    serde_yaml::to_string(&kubeconfig)
        .map_err(|e| KtfError::KubeconfigError(format!("Failed to render kubeconfig: {}", e)))
}

/// Write a kubeconfig for the cluster into a new temp file.
///
/// The file is left on disk; the caller is responsible for removing it.
#[instrument(skip(cluster), fields(cluster = %cluster.name()))]
pub fn temp_kubeconfig<C: Cluster + ?Sized>(cluster: &C) -> Result<PathBuf> {
    let kubeconfig = generate_kubeconfig(cluster)?;

    let mut file = tempfile::Builder::new()
        .prefix(&format!("{}{}", KUBECONFIG_TEMPFILE_PREFIX, cluster.name()))
        .tempfile()?;
    file.write_all(kubeconfig.as_bytes())?;
    file.flush()?;

    let (_, path) = file.keep().map_err(|e| KtfError::IoError(e.error))?;
    debug!("Wrote kubeconfig to {}", path.display());
    Ok(path)
}
