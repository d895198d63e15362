// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

pub mod cluster;
pub mod ingress;

pub use cluster::{Cluster, ExistingCluster};
pub use ingress::AnyIngress;
