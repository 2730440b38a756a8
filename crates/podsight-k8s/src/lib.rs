//! Kubernetes client for podsight
//!
//! This crate fetches pods (and optionally events) from a namespace and
//! derives a simplified status/restart/age summary per pod. Cluster access
//! goes through the [`ListPods`]/[`ListEvents`] capability traits so the
//! summarizer itself stays a pure transformation; [`KubeClient`] is the
//! production implementation backed by the Kubernetes API.

mod client;
mod error;
mod events;
mod summary;

pub use client::{ConnectionMode, KubeClient};
pub use error::SummaryError;
pub use events::{ListEvents, list_events};
pub use summary::{DEFAULT_NAMESPACE, ListPods, derive_status, sum_restarts, summarize_pods};

// Re-export types that are used in our public API
pub use podsight_types::{EventSummary, PodSummary};
