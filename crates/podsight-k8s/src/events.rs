//! Events passthrough
//!
//! Flattens the namespace's recorded events into [`EventSummary`] values so
//! callers never have to touch the raw API type.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Event;
use tracing::debug;

use podsight_types::EventSummary;

use crate::error::SummaryError;
use crate::summary::DEFAULT_NAMESPACE;

/// Capability to list the events recorded in a namespace.
#[async_trait]
pub trait ListEvents: Send + Sync {
    async fn list_events(&self, namespace: &str) -> Result<Vec<Event>, SummaryError>;
}

fn to_summary(event: Event) -> EventSummary {
    EventSummary {
        kind: event.type_.unwrap_or_default(),
        reason: event.reason.unwrap_or_default(),
        object: event.involved_object.name.unwrap_or_default(),
        message: event.message.unwrap_or_default(),
        count: event.count.unwrap_or(0),
        last_seen: event.last_timestamp.map(|t| t.0),
    }
}

/// Fetch the events recorded in `namespace`.
///
/// Same contract as `summarize_pods`: empty namespace falls back to
/// [`DEFAULT_NAMESPACE`], output order matches the cluster's, and a failed
/// list call is propagated with no partial results.
pub async fn list_events(
    client: &impl ListEvents,
    namespace: &str,
) -> Result<Vec<EventSummary>, SummaryError> {
    let namespace = if namespace.is_empty() {
        DEFAULT_NAMESPACE
    } else {
        namespace
    };
    debug!(namespace, "listing events");

    let events = client.list_events(namespace).await?;
    Ok(events.into_iter().map(to_summary).collect())
}
