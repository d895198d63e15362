// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Ingress operations that work the same for every supported Ingress schema.
//!
//! Each operation resolves the API group and version from the [`AnyIngress`]
//! variant and issues a single request against it.

use crate::error::Result;
use crate::types::cluster::Cluster;
use crate::types::ingress::{extensions_v1beta1, networking_v1beta1, AnyIngress};
use k8s_openapi::api::networking::v1::{Ingress as IngressV1, IngressLoadBalancerStatus};
use kube::{
    api::{DeleteParams, PostParams},
    Api, Resource,
};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use tracing::{info, instrument};

fn ingresses<K, C>(cluster: &C, namespace: &str) -> Api<K>
where
    K: Resource<Scope = kube::core::NamespaceResourceScope>,
    <K as Resource>::DynamicType: Default,
    C: Cluster + ?Sized,
{
    Api::namespaced(cluster.client().clone(), namespace)
}

async fn create<K>(api: Api<K>, obj: &K) -> Result<()>
where
    K: Resource + Clone + Debug + Serialize + DeserializeOwned,
{
    api.create(&PostParams::default(), obj).await?;
    Ok(())
}

async fn delete<K>(api: Api<K>, name: &str) -> Result<()>
where
    K: Resource + Clone + Debug + DeserializeOwned,
{
    api.delete(name, &DeleteParams::default()).await?;
    Ok(())
}

/// Create the ingress in `namespace`, using the API version of its schema
#[instrument(
    skip(cluster, ingress),
    fields(
        cluster = %cluster.name(),
        ingress = %ingress.name(),
        api_version = %ingress.api_version()
    )
)]
pub async fn deploy_ingress<C: Cluster + ?Sized>(
    cluster: &C,
    namespace: &str,
    ingress: &AnyIngress,
) -> Result<()> {
    match ingress {
        AnyIngress::V1(obj) => create(ingresses(cluster, namespace), obj).await?,
        AnyIngress::V1Beta1(obj) => create(ingresses(cluster, namespace), obj).await?,
        AnyIngress::ExtensionsV1Beta1(obj) => create(ingresses(cluster, namespace), obj).await?,
    }

    info!("Deployed ingress {}/{}", namespace, ingress.name());
    Ok(())
}

/// Delete the ingress by name from `namespace`, using the API version of its schema
#[instrument(
    skip(cluster, ingress),
    fields(
        cluster = %cluster.name(),
        ingress = %ingress.name(),
        api_version = %ingress.api_version()
    )
)]
pub async fn delete_ingress<C: Cluster + ?Sized>(
    cluster: &C,
    namespace: &str,
    ingress: &AnyIngress,
) -> Result<()> {
    let name = ingress.name();
    match ingress {
        AnyIngress::V1(_) => delete::<IngressV1>(ingresses(cluster, namespace), &name).await?,
        AnyIngress::V1Beta1(_) => {
            delete::<networking_v1beta1::Ingress>(ingresses(cluster, namespace), &name).await?
        }
        AnyIngress::ExtensionsV1Beta1(_) => {
            delete::<extensions_v1beta1::Ingress>(ingresses(cluster, namespace), &name).await?
        }
    }

    info!("Deleted ingress {}/{}", namespace, name);
    Ok(())
}

/// Fetch a fresh copy of the ingress and return its load balancer status.
///
/// The status of the caller's copy is ignored since it is likely stale. An
/// ingress without a status yields an empty status.
#[instrument(
    skip(cluster, ingress),
    fields(
        cluster = %cluster.name(),
        ingress = %ingress.name(),
        api_version = %ingress.api_version()
    )
)]
pub async fn get_ingress_load_balancer_status<C: Cluster + ?Sized>(
    cluster: &C,
    namespace: &str,
    ingress: &AnyIngress,
) -> Result<IngressLoadBalancerStatus> {
    let name = ingress.name();
    let refreshed: AnyIngress = match ingress {
        AnyIngress::V1(_) => {
            let api: Api<IngressV1> = ingresses(cluster, namespace);
            api.get(&name).await?.into()
        }
        AnyIngress::V1Beta1(_) => {
            let api: Api<networking_v1beta1::Ingress> = ingresses(cluster, namespace);
            api.get(&name).await?.into()
        }
        AnyIngress::ExtensionsV1Beta1(_) => {
            let api: Api<extensions_v1beta1::Ingress> = ingresses(cluster, namespace);
            api.get(&name).await?.into()
        }
    };

    Ok(refreshed.load_balancer_status())
}
