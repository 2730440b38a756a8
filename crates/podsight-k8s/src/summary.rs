//! Pod summary derivation

use async_trait::async_trait;
use chrono::Utc;
use k8s_openapi::api::core::v1::{ContainerStatus, Pod};
use tracing::debug;

use podsight_types::PodSummary;

use crate::error::SummaryError;

/// Namespace queried when the caller passes an empty string.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Capability to list the pods in a namespace.
///
/// Implementors must preserve the order of pods and of their container
/// statuses exactly as the cluster reported them; [`summarize_pods`] relies
/// on that order.
#[async_trait]
pub trait ListPods: Send + Sync {
    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>, SummaryError>;
}

/// Derive a pod's display status from its container statuses.
///
/// A pod only counts as "Running" when every container is running, so the
/// first container found in a waiting state short-circuits the scan and its
/// reason (e.g. "CrashLoopBackOff" or "ImagePullBackOff") becomes the
/// status. With no waiting container the pod phase is returned unchanged.
pub fn derive_status(container_statuses: &[ContainerStatus], phase: &str) -> String {
    for cs in container_statuses {
        if let Some(waiting) = cs.state.as_ref().and_then(|state| state.waiting.as_ref()) {
            if let Some(reason) = &waiting.reason {
                return reason.clone();
            }
            // Waiting state with no recorded reason; the phase is the most
            // specific thing left to report.
            return phase.to_string();
        }
    }
    phase.to_string()
}

/// Sum of the restart counts of all containers in a pod.
pub fn sum_restarts(container_statuses: &[ContainerStatus]) -> i32 {
    container_statuses.iter().map(|cs| cs.restart_count).sum()
}

/// Convert a pod as returned by the API into its summary.
///
/// Panics if the pod carries no start time: the cluster sets one on every
/// scheduled pod, so its absence is a broken precondition rather than a
/// value to paper over with zero.
fn to_summary(pod: Pod) -> PodSummary {
    let name = pod.metadata.name.unwrap_or_default();
    let status = pod.status.unwrap_or_default();
    let phase = status.phase.as_deref().unwrap_or("Unknown");
    let container_statuses = status.container_statuses.as_deref().unwrap_or(&[]);

    let Some(start_time) = status.start_time.as_ref() else {
        panic!("pod '{name}' has no start time");
    };
    let uptime_seconds = (Utc::now() - start_time.0).num_milliseconds() as f64 / 1000.0;

    PodSummary {
        status: derive_status(container_statuses, phase),
        restart_count: sum_restarts(container_statuses),
        uptime_seconds,
        name,
    }
}

/// Fetch all pods in `namespace` and derive a summary for each.
///
/// An empty `namespace` falls back to [`DEFAULT_NAMESPACE`]. Summaries come
/// back in the order the cluster reported the pods. A failed list call is
/// propagated as [`SummaryError::ListFailure`]; there are no retries and no
/// partial results.
pub async fn summarize_pods(
    client: &impl ListPods,
    namespace: &str,
) -> Result<Vec<PodSummary>, SummaryError> {
    let namespace = if namespace.is_empty() {
        DEFAULT_NAMESPACE
    } else {
        namespace
    };
    debug!(namespace, "summarizing pods");

    let pods = client.list_pods(namespace).await?;
    Ok(pods.into_iter().map(to_summary).collect())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::Duration;
    use k8s_openapi::api::core::v1::{
        ContainerState, ContainerStateRunning, ContainerStateWaiting, PodStatus,
    };
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};
    use kube::core::ErrorResponse;

    use super::*;

    fn running(restart_count: i32) -> ContainerStatus {
        ContainerStatus {
            state: Some(ContainerState {
                running: Some(ContainerStateRunning::default()),
                ..Default::default()
            }),
            restart_count,
            ..Default::default()
        }
    }

    fn waiting(reason: &str) -> ContainerStatus {
        ContainerStatus {
            state: Some(ContainerState {
                waiting: Some(ContainerStateWaiting {
                    reason: Some(reason.to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn pod(name: &str, started_secs_ago: i64, containers: Vec<ContainerStatus>) -> Pod {
        Pod {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            status: Some(PodStatus {
                phase: Some("Running".to_string()),
                container_statuses: Some(containers),
                start_time: Some(Time(Utc::now() - Duration::seconds(started_secs_ago))),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// Lister that returns a fixed pod list and records the namespaces it
    /// was queried with.
    struct StaticLister {
        pods: Vec<Pod>,
        namespaces: Mutex<Vec<String>>,
    }

    impl StaticLister {
        fn new(pods: Vec<Pod>) -> Self {
            Self {
                pods,
                namespaces: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ListPods for StaticLister {
        async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>, SummaryError> {
            self.namespaces.lock().unwrap().push(namespace.to_string());
            Ok(self.pods.clone())
        }
    }

    struct FailingLister;

    #[async_trait]
    impl ListPods for FailingLister {
        async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>, SummaryError> {
            Err(SummaryError::ListFailure {
                resource: "pods",
                namespace: namespace.to_string(),
                source: kube::Error::Api(ErrorResponse {
                    status: "Failure".to_string(),
                    message: "pods is forbidden".to_string(),
                    reason: "Forbidden".to_string(),
                    code: 403,
                }),
            })
        }
    }

    #[test]
    fn test_waiting_reason_takes_precedence() {
        let statuses = vec![running(0), waiting("CrashLoopBackOff"), running(0)];
        assert_eq!(derive_status(&statuses, "Running"), "CrashLoopBackOff");
    }

    #[test]
    fn test_first_waiting_reason_wins() {
        let statuses = vec![waiting("ImagePullBackOff"), waiting("CrashLoopBackOff")];
        assert_eq!(derive_status(&statuses, "Pending"), "ImagePullBackOff");
    }

    #[test]
    fn test_all_running_returns_phase() {
        let statuses = vec![running(1), running(0)];
        assert_eq!(derive_status(&statuses, "Running"), "Running");
    }

    #[test]
    fn test_no_statuses_returns_phase() {
        assert_eq!(derive_status(&[], "Succeeded"), "Succeeded");
    }

    #[test]
    fn test_waiting_without_reason_falls_back_to_phase() {
        let statuses = vec![ContainerStatus {
            state: Some(ContainerState {
                waiting: Some(ContainerStateWaiting::default()),
                ..Default::default()
            }),
            ..Default::default()
        }];
        assert_eq!(derive_status(&statuses, "Pending"), "Pending");
    }

    #[test]
    fn test_restart_sum() {
        let statuses = vec![running(2), running(0), running(5)];
        assert_eq!(sum_restarts(&statuses), 7);
    }

    #[test]
    fn test_restart_sum_empty() {
        assert_eq!(sum_restarts(&[]), 0);
    }

    #[tokio::test]
    async fn test_order_preserved() {
        let lister = StaticLister::new(vec![
            pod("web-0", 10, vec![running(0)]),
            pod("web-1", 20, vec![running(0)]),
            pod("web-2", 30, vec![running(0)]),
        ]);

        let summaries = summarize_pods(&lister, "prod").await.unwrap();
        let names: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["web-0", "web-1", "web-2"]);
    }

    #[tokio::test]
    async fn test_summary_fields() {
        let lister = StaticLister::new(vec![pod(
            "api-5d9f",
            100,
            vec![running(2), waiting("CrashLoopBackOff"), running(5)],
        )]);

        let summaries = summarize_pods(&lister, "prod").await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "api-5d9f");
        assert_eq!(summaries[0].status, "CrashLoopBackOff");
        assert_eq!(summaries[0].restart_count, 7);
    }

    #[tokio::test]
    async fn test_uptime_roughly_matches_start_time() {
        let lister = StaticLister::new(vec![pod("old-pod", 100, vec![running(0)])]);

        let summaries = summarize_pods(&lister, "prod").await.unwrap();
        let uptime = summaries[0].uptime_seconds;
        assert!(
            (99.0..110.0).contains(&uptime),
            "expected ~100s of uptime, got {uptime}"
        );
    }

    #[tokio::test]
    async fn test_empty_namespace_defaults() {
        let lister = StaticLister::new(vec![]);

        summarize_pods(&lister, "").await.unwrap();
        summarize_pods(&lister, "default").await.unwrap();

        let namespaces = lister.namespaces.lock().unwrap();
        assert_eq!(*namespaces, ["default", "default"]);
    }

    #[tokio::test]
    async fn test_list_failure_propagates() {
        let result = summarize_pods(&FailingLister, "prod").await;
        assert!(matches!(
            result,
            Err(SummaryError::ListFailure { ref namespace, .. }) if namespace == "prod"
        ));
    }
}
