use thiserror::Error;

/// Failures surfaced by the summary API.
///
/// The derivation itself is total; the only thing that can fail is the list
/// call against the cluster, and a failed call yields no partial results.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The list call against the Kubernetes API failed (network, auth, or
    /// API-level error).
    #[error("failed to list {resource} in namespace '{namespace}'")]
    ListFailure {
        resource: &'static str,
        namespace: String,
        #[source]
        source: kube::Error,
    },
}
