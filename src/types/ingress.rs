// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Ingress objects across the three schema generations served by Kubernetes.
//!
//! `networking.k8s.io/v1` comes from k8s-openapi. The two `v1beta1` generations
//! were removed from k8s-openapi along with Kubernetes 1.22, so they are declared
//! here with their historical wire shape. Their load balancer status uses the
//! same type as `v1`, which keeps the status of all three interchangeable.

use crate::error::{KtfError, Result};
use k8s_openapi::api::core::v1::TypedLocalObjectReference;
use k8s_openapi::api::networking::v1::{self as networking_v1, IngressLoadBalancerStatus};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::api::DynamicObject;
use kube::{Resource, ResourceExt};
use serde::{Deserialize, Serialize};

/// Backend of a legacy ingress, addressed by service name and port
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressBackend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_port: Option<IntOrString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<TypedLocalObjectReference>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http: Option<HTTPIngressRuleValue>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct HTTPIngressRuleValue {
    pub paths: Vec<HTTPIngressPath>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HTTPIngressPath {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_type: Option<String>,
    pub backend: IngressBackend,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressTLS {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_balancer: Option<IngressLoadBalancerStatus>,
}

/// `networking.k8s.io/v1beta1` Ingress (Kubernetes 1.14 to 1.21)
pub mod networking_v1beta1 {
    use super::{IngressBackend, IngressRule, IngressStatus, IngressTLS};
    use kube::CustomResource;
    use serde::{Deserialize, Serialize};

    #[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
    #[kube(
        group = "networking.k8s.io",
        version = "v1beta1",
        kind = "Ingress",
        plural = "ingresses"
    )]
    #[kube(namespaced, status = "IngressStatus", schema = "disabled")]
    #[kube(derive = "PartialEq")]
    #[serde(rename_all = "camelCase")]
    pub struct IngressSpec {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub backend: Option<IngressBackend>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub ingress_class_name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub rules: Option<Vec<IngressRule>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub tls: Option<Vec<IngressTLS>>,
    }
}

/// `extensions/v1beta1` Ingress (up to Kubernetes 1.21)
pub mod extensions_v1beta1 {
    use super::{IngressBackend, IngressRule, IngressStatus, IngressTLS};
    use kube::CustomResource;
    use serde::{Deserialize, Serialize};

    #[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
    #[kube(
        group = "extensions",
        version = "v1beta1",
        kind = "Ingress",
        plural = "ingresses"
    )]
    #[kube(namespaced, status = "IngressStatus", schema = "disabled")]
    #[kube(derive = "PartialEq")]
    #[serde(rename_all = "camelCase")]
    pub struct IngressSpec {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub backend: Option<IngressBackend>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub ingress_class_name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub rules: Option<Vec<IngressRule>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub tls: Option<Vec<IngressTLS>>,
    }
}

/// An ingress of any supported schema generation.
///
/// The set is closed: anything else is rejected when converting from dynamic
/// data, before a request is made.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyIngress {
    V1(networking_v1::Ingress),
    V1Beta1(networking_v1beta1::Ingress),
    ExtensionsV1Beta1(extensions_v1beta1::Ingress),
}

impl AnyIngress {
    /// Name of the wrapped object
    pub fn name(&self) -> String {
        match self {
            AnyIngress::V1(obj) => obj.name_any(),
            AnyIngress::V1Beta1(obj) => obj.name_any(),
            AnyIngress::ExtensionsV1Beta1(obj) => obj.name_any(),
        }
    }

    /// `apiVersion` of the wrapped object's schema
    pub fn api_version(&self) -> String {
        match self {
            AnyIngress::V1(_) => networking_v1::Ingress::api_version(&()).into_owned(),
            AnyIngress::V1Beta1(_) => networking_v1beta1::Ingress::api_version(&()).into_owned(),
            AnyIngress::ExtensionsV1Beta1(_) => {
                extensions_v1beta1::Ingress::api_version(&()).into_owned()
            }
        }
    }

    /// Load balancer status as carried by the wrapped object itself
    pub fn load_balancer_status(&self) -> IngressLoadBalancerStatus {
        let status = match self {
            AnyIngress::V1(obj) => obj.status.as_ref().and_then(|s| s.load_balancer.clone()),
            AnyIngress::V1Beta1(obj) => obj.status.as_ref().and_then(|s| s.load_balancer.clone()),
            AnyIngress::ExtensionsV1Beta1(obj) => {
                obj.status.as_ref().and_then(|s| s.load_balancer.clone())
            }
        };
        status.unwrap_or_default()
    }

    fn decode(api_version: &str, kind: &str, value: serde_json::Value) -> Result<Self> {
        match (api_version, kind) {
            ("networking.k8s.io/v1", "Ingress") => {
                Ok(AnyIngress::V1(serde_json::from_value(value)?))
            }
            ("networking.k8s.io/v1beta1", "Ingress") => {
                Ok(AnyIngress::V1Beta1(serde_json::from_value(value)?))
            }
            ("extensions/v1beta1", "Ingress") => {
                Ok(AnyIngress::ExtensionsV1Beta1(serde_json::from_value(value)?))
            }
            _ => Err(KtfError::UnsupportedIngressType(describe_type(api_version, kind))),
        }
    }
}

fn describe_type(api_version: &str, kind: &str) -> String {
    if api_version.is_empty() && kind.is_empty() {
        "object without apiVersion and kind".to_string()
    } else {
        format!("{}, Kind={}", api_version, kind)
    }
}

impl From<networking_v1::Ingress> for AnyIngress {
    fn from(obj: networking_v1::Ingress) -> Self {
        AnyIngress::V1(obj)
    }
}

impl From<networking_v1beta1::Ingress> for AnyIngress {
    fn from(obj: networking_v1beta1::Ingress) -> Self {
        AnyIngress::V1Beta1(obj)
    }
}

impl From<extensions_v1beta1::Ingress> for AnyIngress {
    fn from(obj: extensions_v1beta1::Ingress) -> Self {
        AnyIngress::ExtensionsV1Beta1(obj)
    }
}

impl TryFrom<DynamicObject> for AnyIngress {
    type Error = KtfError;

    fn try_from(obj: DynamicObject) -> Result<Self> {
        let (api_version, kind) = obj
            .types
            .as_ref()
            .map(|t| (t.api_version.clone(), t.kind.clone()))
            .unwrap_or_default();

        Self::decode(&api_version, &kind, serde_json::to_value(&obj)?)
    }
}

impl TryFrom<serde_json::Value> for AnyIngress {
    type Error = KtfError;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };
        let (api_version, kind) = (field("apiVersion"), field("kind"));

        Self::decode(&api_version, &kind, value)
    }
}
