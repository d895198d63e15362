// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for test namespaces, ingresses, cleanup and kubeconfig rendering.

pub mod cleanup;
pub mod ingress;
pub mod kubeconfig;
pub mod namespaces;

pub use cleanup::{cleanup_generated_resources, CleanupContext, PollBackoff};
pub use ingress::{delete_ingress, deploy_ingress, get_ingress_load_balancer_status};
pub use kubeconfig::{generate_kubeconfig, temp_kubeconfig};
pub use namespaces::{create_namespace, creator_label_selector, generate_namespace};
