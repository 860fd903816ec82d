//! Structured events for bridge calls.
//!
//! Each stage of a host call emits a [`BridgeEvent`] through `tracing` at
//! debug level, serialised as JSON so that the trace can be ingested by an
//! event store as-is.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

/// Events emitted during one host call.
///
/// Tagged with `#[serde(tag = "type")]` so they serialise as
/// `{ "type": "SolveRequested", ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BridgeEvent {
    /// The host invoked the entrypoint.
    CallReceived {
        /// Requested outputs.
        nlhs: usize,
        /// Supplied inputs.
        nrhs: usize,
    },

    /// Argument validation rejected the call.
    ValidationFailed {
        /// Taxonomy bucket.
        kind: ErrorKind,
        /// Message surfaced to the host.
        message: String,
        /// Positional arguments the failing rule inspected.
        arguments: Vec<String>,
    },

    /// The engine is about to be invoked.
    SolveRequested {
        /// Engine identifier.
        engine: String,
        /// Method requested by the host.
        method: String,
        /// Vertex count.
        num_vs: usize,
        /// Edge count.
        num_es: usize,
        /// Whether `u` was supplied.
        has_u: bool,
        /// Whether `v` was supplied.
        has_v: bool,
    },

    /// The engine returned scores.
    SolveCompleted {
        /// Method reported by the engine.
        method: String,
        /// Iterations executed.
        iterations: usize,
        /// Whether the engine reached the tolerance.
        converged: bool,
        /// Wall time of the engine call.
        wall_time: Duration,
    },

    /// The engine reported a failure.
    SolveFailed {
        /// Engine error message.
        reason: String,
        /// Wall time until the failure.
        wall_time: Duration,
    },
}

impl BridgeEvent {
    /// Short name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            BridgeEvent::CallReceived { .. } => "CallReceived",
            BridgeEvent::ValidationFailed { .. } => "ValidationFailed",
            BridgeEvent::SolveRequested { .. } => "SolveRequested",
            BridgeEvent::SolveCompleted { .. } => "SolveCompleted",
            BridgeEvent::SolveFailed { .. } => "SolveFailed",
        }
    }
}

/// Emit `event` to the tracing subscriber.
pub fn emit(event: &BridgeEvent) {
    match serde_json::to_string(event) {
        Ok(json) => tracing::debug!(target: "ruvector_pagerank_bridge::events", event = %json),
        Err(e) => tracing::warn!(event = event.name(), error = %e, "failed to serialise bridge event"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_type_tagged() {
        let ev = BridgeEvent::SolveRequested {
            engine: "power-iteration".into(),
            method: "gs".into(),
            num_vs: 4,
            num_es: 4,
            has_u: false,
            has_v: true,
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "SolveRequested");
        assert_eq!(json["num_vs"], 4);
        assert_eq!(json["has_v"], true);
    }

    #[test]
    fn validation_failure_carries_kind() {
        let ev = BridgeEvent::ValidationFailed {
            kind: ErrorKind::Range,
            message: "tol must be > 0.".into(),
            arguments: vec!["tol".into()],
        };
        let json = serde_json::to_string(&ev).unwrap();
        assert!(json.contains(r#""kind":"range""#), "json: {json}");
        assert!(json.contains(r#""arguments":["tol"]"#), "json: {json}");
        let back: BridgeEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ev);
    }

    #[test]
    fn emit_without_subscriber_is_silent() {
        emit(&BridgeEvent::CallReceived { nlhs: 1, nrhs: 8 });
    }
}
