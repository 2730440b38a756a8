//! Kubernetes client wrapper

use anyhow::{Context, Result};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Event, Pod};
use kube::Api;
use kube::api::ListParams;
use kube::config::{KubeConfigOptions, Kubeconfig};
use tracing::info;

use crate::error::SummaryError;
use crate::events::ListEvents;
use crate::summary::ListPods;

/// How the client authenticates to the Kubernetes API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Service-account credentials mounted into the pod this process runs
    /// in. Only works from inside the cluster, and the service account
    /// needs list permissions, e.g.:
    /// `kubectl create clusterrolebinding default-view --clusterrole=view
    /// --serviceaccount=default:default`
    InCluster,
    /// The local kubeconfig file, as used by kubectl.
    Kubeconfig,
}

/// Kubernetes client wrapper
pub struct KubeClient {
    client: kube::Client,
}

impl KubeClient {
    /// Create a new KubeClient authenticated through the given mode
    pub async fn new(mode: ConnectionMode) -> Result<Self> {
        info!(?mode, "initializing kubernetes client");

        let config = match mode {
            ConnectionMode::InCluster => kube::Config::incluster()
                .context("Failed to build in-cluster config. Is this running inside a pod?")?,
            ConnectionMode::Kubeconfig => {
                let kubeconfig =
                    Kubeconfig::read().context("Failed to read kubeconfig. Is kubectl configured?")?;
                kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                    .await
                    .context("Failed to create config from kubeconfig")?
            }
        };

        let client =
            kube::Client::try_from(config).context("Failed to create kubernetes client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ListPods for KubeClient {
    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>, SummaryError> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let list = pods
            .list(&ListParams::default())
            .await
            .map_err(|source| SummaryError::ListFailure {
                resource: "pods",
                namespace: namespace.to_string(),
                source,
            })?;

        Ok(list.items)
    }
}

#[async_trait]
impl ListEvents for KubeClient {
    async fn list_events(&self, namespace: &str) -> Result<Vec<Event>, SummaryError> {
        let events: Api<Event> = Api::namespaced(self.client.clone(), namespace);
        let list = events
            .list(&ListParams::default())
            .await
            .map_err(|source| SummaryError::ListFailure {
                resource: "events",
                namespace: namespace.to_string(),
                source,
            })?;

        Ok(list.items)
    }
}
