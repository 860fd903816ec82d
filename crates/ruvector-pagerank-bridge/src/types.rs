//! Result types shared by engines, the gateway, and the audit trail.

use serde::{Deserialize, Serialize};

/// Output of one engine solve.
///
/// `x` is index-aligned with the graph's vertices. The remaining fields are
/// diagnostics an engine may fill in; the bridge only marshals `x` back to
/// the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankResult {
    /// Score of each vertex, length `num_vs`.
    pub x: Vec<f64>,
    /// Method that produced the scores.
    pub method: String,
    /// Total edge visits performed while iterating.
    pub num_es_touched: u64,
    /// Seconds spent reading the input graph.
    pub read_time: f64,
    /// Seconds spent building internal structures.
    pub preprocess_time: f64,
    /// Seconds spent iterating.
    pub compute_time: f64,
    /// Iterations executed.
    pub iterations: usize,
    /// L1 change of the final iteration.
    pub residual: f64,
    /// Whether `residual` fell below the requested tolerance.
    pub converged: bool,
}

impl PageRankResult {
    /// A result carrying only scores, for engines that report nothing else.
    pub fn from_scores(x: Vec<f64>, method: impl Into<String>) -> Self {
        Self {
            x,
            method: method.into(),
            num_es_touched: 0,
            read_time: 0.0,
            preprocess_time: 0.0,
            compute_time: 0.0,
            iterations: 0,
            residual: 0.0,
            converged: true,
        }
    }

    /// Sum of all scores, accumulated with compensation.
    pub fn total_mass(&self) -> f64 {
        crate::compensated::compensated_sum(self.x.iter().copied())
    }
}
