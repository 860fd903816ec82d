//! Audit trail for bridge calls.
//!
//! Every successful call can produce a [`CallAuditEntry`] holding a
//! fingerprint of the input graph and parameters, a fingerprint of the
//! returned scores, the engine's phase timings and a wall-clock timestamp.
//!
//! # Hashing
//!
//! Fingerprints use [`std::hash::DefaultHasher`]. That is enough to spot
//! repeated or altered calls in a log, not to prove anything to an
//! adversary.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::graph::{EdgeList, SolverParams};
use crate::types::PageRankResult;

// ---------------------------------------------------------------------------
// Audit entry
// ---------------------------------------------------------------------------

/// One audit record per host call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallAuditEntry {
    /// Caller-chosen identifier.
    pub request_id: String,

    /// Method the engine reported.
    pub method: String,

    /// 8-byte fingerprint of graph + parameters, see [`hash_input`].
    pub input_hash: [u8; 8],

    /// 8-byte fingerprint of the score vector, see [`hash_output`].
    pub output_hash: [u8; 8],

    /// Vertex count.
    pub num_vs: usize,

    /// Edge count.
    pub num_es: usize,

    /// Iterations the engine executed.
    pub iterations: usize,

    /// Whether the engine reported convergence.
    pub converged: bool,

    /// Engine's last L1 change.
    pub residual: f64,

    /// Seconds the engine spent reading input.
    pub read_time: f64,

    /// Seconds the engine spent preprocessing.
    pub preprocess_time: f64,

    /// Seconds the engine spent iterating.
    pub compute_time: f64,

    /// Wall-clock time of the whole call in microseconds.
    pub wall_time_us: u64,

    /// Start of the call as nanoseconds since the Unix epoch.
    pub timestamp_ns: u128,
}

// ---------------------------------------------------------------------------
// Hash helpers
// ---------------------------------------------------------------------------

fn hash_distribution(dist: Option<&[f64]>, h: &mut DefaultHasher) {
    match dist {
        None => 0u8.hash(h),
        Some(values) => {
            1u8.hash(h);
            values.len().hash(h);
            for &x in values {
                x.to_bits().hash(h);
            }
        }
    }
}

/// Deterministic 8-byte fingerprint of one call's input.
///
/// Covers the vertex count, both index arrays (widened to `i64`, so the same
/// graph hashes equally in either width), `alpha`, `tol`, `u`, `v` and the
/// method. An absent distribution hashes differently from a zero vector.
pub fn hash_input(graph: &EdgeList<'_>, params: &SolverParams<'_>) -> [u8; 8] {
    let mut h = DefaultHasher::new();

    graph.num_vs.hash(&mut h);
    graph.num_es.hash(&mut h);
    for (head, tail) in graph.edges() {
        head.hash(&mut h);
        tail.hash(&mut h);
    }

    params.alpha.to_bits().hash(&mut h);
    params.tol.to_bits().hash(&mut h);
    hash_distribution(params.u, &mut h);
    hash_distribution(params.v, &mut h);
    params.method.hash(&mut h);

    h.finish().to_le_bytes()
}

/// Deterministic 8-byte fingerprint of a score vector.
pub fn hash_output(scores: &[f64]) -> [u8; 8] {
    let mut h = DefaultHasher::new();
    for &x in scores {
        x.to_bits().hash(&mut h);
    }
    h.finish().to_le_bytes()
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builds a [`CallAuditEntry`] around one engine call.
///
/// ```ignore
/// let audit = AuditBuilder::start("req-7", &graph, &params);
/// let result = engine.solve(&graph, &params)?;
/// let entry = audit.finish(&result);
/// ```
pub struct AuditBuilder {
    request_id: String,
    input_hash: [u8; 8],
    num_vs: usize,
    num_es: usize,
    start: Instant,
    timestamp_ns: u128,
}

impl AuditBuilder {
    /// Fingerprint the input and start the clock.
    pub fn start(
        request_id: impl Into<String>,
        graph: &EdgeList<'_>,
        params: &SolverParams<'_>,
    ) -> Self {
        let timestamp_ns = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_nanos();

        Self {
            request_id: request_id.into(),
            input_hash: hash_input(graph, params),
            num_vs: graph.num_vs,
            num_es: graph.num_es,
            start: Instant::now(),
            timestamp_ns,
        }
    }

    /// Complete the entry from the engine's result.
    pub fn finish(self, result: &PageRankResult) -> CallAuditEntry {
        let elapsed = self.start.elapsed();

        CallAuditEntry {
            request_id: self.request_id,
            method: result.method.clone(),
            input_hash: self.input_hash,
            output_hash: hash_output(&result.x),
            num_vs: self.num_vs,
            num_es: self.num_es,
            iterations: result.iterations,
            converged: result.converged,
            residual: result.residual,
            read_time: result.read_time,
            preprocess_time: result.preprocess_time,
            compute_time: result.compute_time,
            wall_time_us: u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
            timestamp_ns: self.timestamp_ns,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VertexIndices;

    const HEADS: [i32; 3] = [0, 1, 2];
    const TAILS: [i32; 3] = [1, 2, 0];

    fn graph() -> EdgeList<'static> {
        EdgeList::new(3, VertexIndices::I32(&HEADS), VertexIndices::I32(&TAILS)).unwrap()
    }

    fn params<'a>(u: Option<&'a [f64]>) -> SolverParams<'a> {
        SolverParams {
            alpha: 0.85,
            tol: 1e-10,
            u,
            v: None,
            method: "power".into(),
        }
    }

    fn sample_result() -> PageRankResult {
        PageRankResult {
            x: vec![1.0 / 3.0; 3],
            method: "power".into(),
            num_es_touched: 30,
            read_time: 0.0,
            preprocess_time: 1e-6,
            compute_time: 2e-6,
            iterations: 10,
            residual: 1e-12,
            converged: true,
        }
    }

    #[test]
    fn hash_input_deterministic() {
        assert_eq!(hash_input(&graph(), &params(None)), hash_input(&graph(), &params(None)));
    }

    #[test]
    fn hash_input_ignores_index_width() {
        let heads = [0i64, 1, 2];
        let tails = [1i64, 2, 0];
        let wide = EdgeList::new(3, VertexIndices::I64(&heads), VertexIndices::I64(&tails)).unwrap();
        assert_eq!(hash_input(&graph(), &params(None)), hash_input(&wide, &params(None)));
    }

    #[test]
    fn hash_input_separates_absent_from_zero() {
        let zeros = [0.0f64; 3];
        assert_ne!(
            hash_input(&graph(), &params(None)),
            hash_input(&graph(), &params(Some(&zeros))),
        );
    }

    #[test]
    fn hash_input_changes_with_edges_and_method() {
        let tails = [2i32, 0, 1];
        let other = EdgeList::new(3, VertexIndices::I32(&HEADS), VertexIndices::I32(&tails)).unwrap();
        assert_ne!(hash_input(&graph(), &params(None)), hash_input(&other, &params(None)));

        let mut gs = params(None);
        gs.method = "gs".into();
        assert_ne!(hash_input(&graph(), &params(None)), hash_input(&graph(), &gs));
    }

    #[test]
    fn hash_output_changes() {
        assert_eq!(hash_output(&[0.5, 0.5]), hash_output(&[0.5, 0.5]));
        assert_ne!(hash_output(&[0.5, 0.5]), hash_output(&[0.5, 0.6]));
    }

    #[test]
    fn builder_produces_entry() {
        let builder = AuditBuilder::start("req-1", &graph(), &params(None));
        let entry = builder.finish(&sample_result());

        assert_eq!(entry.request_id, "req-1");
        assert_eq!(entry.method, "power");
        assert_eq!(entry.num_vs, 3);
        assert_eq!(entry.num_es, 3);
        assert_eq!(entry.iterations, 10);
        assert!(entry.converged);
        assert_eq!(entry.output_hash, hash_output(&[1.0 / 3.0; 3]));
        assert!(entry.timestamp_ns > 0);
    }

    #[test]
    fn entry_serializes_to_json() {
        let entry = AuditBuilder::start("ser", &graph(), &params(None)).finish(&sample_result());
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"request_id\":\"ser\""), "json: {json}");
        let back: CallAuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
