//! Shared types for podsight
//!
//! This crate contains the value types produced by the summarizer and
//! consumed by whatever front end displays them.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Derived summary of a single pod.
///
/// `status` is either the pod's phase ("Running", "Pending", "Succeeded",
/// "Failed", "Unknown") or, when a container is stuck waiting, that
/// container's waiting reason (e.g. "CrashLoopBackOff").
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PodSummary {
    /// Name of the pod
    pub name: String,
    /// Display status, see above
    pub status: String,
    /// Sum of the restart counts of all containers in the pod
    pub restart_count: i32,
    /// Age of the pod since its recorded start time, in seconds
    pub uptime_seconds: f64,
}

/// A cluster event, flattened to the fields worth displaying.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventSummary {
    /// Event type, "Normal" or "Warning"
    pub kind: String,
    /// Short machine-readable reason, e.g. "BackOff" or "Scheduled"
    pub reason: String,
    /// Name of the object the event is about
    pub object: String,
    /// Human-readable description
    pub message: String,
    /// How many times this event has occurred
    pub count: i32,
    /// When the event was last observed
    pub last_seen: Option<DateTime<Utc>>,
}
