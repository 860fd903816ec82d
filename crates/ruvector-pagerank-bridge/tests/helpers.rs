//! Shared helpers for the bridge integration tests.
//!
//! Call builders produce the eight positional host arguments, and
//! [`RecordingEngine`] captures what actually crossed the gateway.

#![allow(dead_code)]

use std::sync::Mutex;

use ruvector_pagerank_bridge::error::SolverError;
use ruvector_pagerank_bridge::graph::{EdgeList, SolverParams};
use ruvector_pagerank_bridge::host::HostValue;
use ruvector_pagerank_bridge::traits::PageRankEngine;
use ruvector_pagerank_bridge::types::PageRankResult;

// ---------------------------------------------------------------------------
// Call builders
// ---------------------------------------------------------------------------

/// Positional argument indices.
pub const NUM_VS: usize = 0;
pub const HEADS: usize = 1;
pub const TAILS: usize = 2;
pub const ALPHA: usize = 3;
pub const TOL: usize = 4;
pub const U: usize = 5;
pub const V: usize = 6;
pub const METHOD: usize = 7;

/// A valid call on a directed `n`-cycle `0 -> 1 -> ... -> n-1 -> 0`.
pub fn cycle_call(n: i32, method: &str) -> Vec<HostValue> {
    let heads: Vec<i32> = (0..n).collect();
    let tails: Vec<i32> = (0..n).map(|i| (i + 1) % n).collect();
    vec![
        HostValue::int32_scalar(n),
        HostValue::int32_column(heads),
        HostValue::int32_column(tails),
        HostValue::double_scalar(0.85),
        HostValue::double_scalar(1e-10),
        HostValue::empty_double(),
        HostValue::empty_double(),
        HostValue::string(method),
    ]
}

/// A valid call on an arbitrary int32 edge list.
pub fn edge_call(n: i32, edges: &[(i32, i32)], method: &str) -> Vec<HostValue> {
    let mut call = cycle_call(n, method);
    call[HEADS] = HostValue::int32_column(edges.iter().map(|e| e.0).collect());
    call[TAILS] = HostValue::int32_column(edges.iter().map(|e| e.1).collect());
    call
}

/// Replace argument `index`.
pub fn with(mut call: Vec<HostValue>, index: usize, value: HostValue) -> Vec<HostValue> {
    call[index] = value;
    call
}

/// Complex `1 x 1` double.
pub fn complex_scalar(re: f64, im: f64) -> HostValue {
    HostValue::Double {
        dims: vec![1, 1],
        real: vec![re],
        imag: Some(vec![im]),
    }
}

/// `rows x cols` real double filled with `fill`.
pub fn double_matrix(rows: usize, cols: usize, fill: f64) -> HostValue {
    HostValue::Double {
        dims: vec![rows, cols],
        real: vec![fill; rows * cols],
        imag: None,
    }
}

// ---------------------------------------------------------------------------
// Recording engine
// ---------------------------------------------------------------------------

/// What the engine saw on one `solve`.
#[derive(Debug, Clone, PartialEq)]
pub struct SeenCall {
    pub num_vs: usize,
    pub edges: Vec<(i64, i64)>,
    pub alpha: f64,
    pub tol: f64,
    pub u: Option<Vec<f64>>,
    pub v: Option<Vec<f64>>,
    pub method: String,
}

/// Engine that records its inputs and returns a fixed answer.
pub struct RecordingEngine {
    seen: Mutex<Vec<SeenCall>>,
    answer: Result<Vec<f64>, SolverError>,
}

impl RecordingEngine {
    /// Answer every call with `scores`.
    pub fn returning(scores: Vec<f64>) -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
            answer: Ok(scores),
        }
    }

    /// Fail every call with `err`.
    pub fn failing(err: SolverError) -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
            answer: Err(err),
        }
    }

    /// Calls recorded so far.
    pub fn seen(&self) -> Vec<SeenCall> {
        self.seen.lock().unwrap().clone()
    }
}

impl PageRankEngine for RecordingEngine {
    fn solve(
        &self,
        graph: &EdgeList<'_>,
        params: &SolverParams<'_>,
    ) -> Result<PageRankResult, SolverError> {
        self.seen.lock().unwrap().push(SeenCall {
            num_vs: graph.num_vs,
            edges: graph.edges().collect(),
            alpha: params.alpha,
            tol: params.tol,
            u: params.u.map(<[f64]>::to_vec),
            v: params.v.map(<[f64]>::to_vec),
            method: params.method.clone(),
        });
        self.answer
            .clone()
            .map(|x| PageRankResult::from_scores(x, params.method.clone()))
    }

    fn name(&self) -> &str {
        "recording"
    }
}
