// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace creation, plain and tagged with a creator ID.

use crate::constants::labels;
use crate::error::{KtfError, Result};
use crate::types::cluster::Cluster;
use k8s_openapi::api::core::v1::Namespace;
use kube::{
    api::{ObjectMeta, PostParams},
    Api, ResourceExt,
};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Label selector matching every resource tagged with the creator ID
pub fn creator_label_selector(creator_id: &str) -> String {
    format!("{}={}", labels::TEST_RESOURCE, creator_id)
}

pub(crate) fn validate_creator_id(creator_id: &str) -> Result<()> {
    if creator_id.is_empty() {
        return Err(KtfError::InvalidCreatorId);
    }
    Ok(())
}

/// Create a namespace with the given name, succeeding if it already exists
#[instrument(skip(cluster), fields(cluster = %cluster.name()))]
pub async fn create_namespace<C: Cluster + ?Sized>(cluster: &C, namespace: &str) -> Result<()> {
    let namespaces: Api<Namespace> = Api::all(cluster.client().clone());
    let ns = Namespace {
        metadata: ObjectMeta {
            name: Some(namespace.to_string()),
            ..Default::default()
        },
        ..Default::default()
    };

    match namespaces.create(&PostParams::default(), &ns).await {
        Ok(_) => {
            info!("Namespace {} created successfully", namespace);
            Ok(())
        }
        Err(kube::Error::Api(err)) if err.code == 409 => {
            debug!("Namespace {} already exists", namespace);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Create a transient testing namespace with a UUID for a name, labelled with the
/// creator ID so it can be found by [`cleanup_generated_resources`].
///
/// [`cleanup_generated_resources`]: crate::kubernetes::cleanup_generated_resources
#[instrument(skip(cluster), fields(cluster = %cluster.name()))]
pub async fn generate_namespace<C: Cluster + ?Sized>(
    cluster: &C,
    creator_id: &str,
) -> Result<Namespace> {
    validate_creator_id(creator_id)?;

    let ns = Namespace {
        metadata: ObjectMeta {
            name: Some(Uuid::new_v4().to_string()),
            labels: Some(BTreeMap::from([(
                labels::TEST_RESOURCE.to_string(),
                creator_id.to_string(),
            )])),
            ..Default::default()
        },
        ..Default::default()
    };

    let namespaces: Api<Namespace> = Api::all(cluster.client().clone());
    let created = namespaces.create(&PostParams::default(), &ns).await?;

    info!("Generated namespace {}", created.name_any());
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{namespace_json, status_json, MockService};

    const NAMESPACES: &str = "/api/v1/namespaces";

    #[test]
    fn test_creator_label_selector() {
        assert_eq!(creator_label_selector("alice"), "created-by-ktf=alice");
    }

    #[tokio::test]
    async fn test_generate_namespace_labels_with_creator() {
        let mock = MockService::new().on_post(
            NAMESPACES,
            201,
            &namespace_json("generated", &[(labels::TEST_RESOURCE, "alice")]),
        );
        let cluster = mock.clone().into_cluster("test");

        let ns = generate_namespace(&cluster, "alice").await.unwrap();
        assert_eq!(ns.name_any(), "generated");

        let posts = mock.requests_with_method("POST");
        assert_eq!(posts.len(), 1);
        let sent = posts[0].json();
        assert_eq!(sent["metadata"]["labels"][labels::TEST_RESOURCE], "alice");
        let name = sent["metadata"]["name"].as_str().unwrap();
        assert!(Uuid::parse_str(name).is_ok());
    }

    #[tokio::test]
    async fn test_generate_namespace_names_are_unique() {
        let mock = MockService::new().on_post(NAMESPACES, 201, &namespace_json("generated", &[]));
        let cluster = mock.clone().into_cluster("test");

        for _ in 0..3 {
            generate_namespace(&cluster, "alice").await.unwrap();
        }

        let mut names: Vec<String> = mock
            .requests_with_method("POST")
            .iter()
            .map(|r| r.json()["metadata"]["name"].as_str().unwrap().to_string())
            .collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 3);
    }

    #[tokio::test]
    async fn test_generate_namespace_rejects_empty_creator() {
        let mock = MockService::new();
        let cluster = mock.clone().into_cluster("test");

        let err = generate_namespace(&cluster, "").await.unwrap_err();

        assert!(matches!(err, KtfError::InvalidCreatorId));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_generate_namespace_surfaces_conflict() {
        let mock = MockService::new().on_post(
            NAMESPACES,
            409,
            &status_json(409, "AlreadyExists", "namespaces \"x\" already exists"),
        );
        let cluster = mock.into_cluster("test");

        let err = generate_namespace(&cluster, "alice").await.unwrap_err();
        assert!(err.is_api_status(409));
    }

    #[tokio::test]
    async fn test_create_namespace_sends_plain_namespace() {
        let mock = MockService::new().on_post(NAMESPACES, 201, &namespace_json("plain", &[]));
        let cluster = mock.clone().into_cluster("test");

        create_namespace(&cluster, "plain").await.unwrap();

        let sent = mock.requests_with_method("POST")[0].json();
        assert_eq!(sent["metadata"]["name"], "plain");
        assert!(sent["metadata"].get("labels").is_none());
    }

    #[tokio::test]
    async fn test_create_namespace_tolerates_already_exists() {
        let mock = MockService::new().on_post(
            NAMESPACES,
            409,
            &status_json(409, "AlreadyExists", "namespaces \"plain\" already exists"),
        );
        let cluster = mock.into_cluster("test");

        assert!(create_namespace(&cluster, "plain").await.is_ok());
    }

    #[tokio::test]
    async fn test_create_namespace_surfaces_other_errors() {
        let mock = MockService::new().on_post(
            NAMESPACES,
            403,
            &status_json(403, "Forbidden", "namespaces is forbidden"),
        );
        let cluster = mock.into_cluster("test");

        let err = create_namespace(&cluster, "plain").await.unwrap_err();
        assert!(err.is_api_status(403));
    }
}
