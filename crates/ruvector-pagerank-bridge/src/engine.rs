//! Reference PageRank engine.
//!
//! [`PowerIterationEngine`] is a small, dependency-free implementation of
//! [`PageRankEngine`] so the bridge can be exercised end to end. It is not
//! tuned for large graphs.
//!
//! The model it solves, for damping `alpha`, teleport distribution `v`,
//! dangling distribution `u` and out-degree `d(j)`:
//!
//! ```text
//! x[i] = alpha * (sum_{j -> i} x[j] / d(j) + D(x) * u[i]) + (1 - alpha) * v[i]
//! D(x) = sum of x[j] over vertices with d(j) = 0
//! ```
//!
//! `u` and `v` default to uniform and are otherwise used exactly as given.
//! Two methods are offered:
//!
//! - `"power"`: Jacobi-style power iteration, one full sweep into a fresh
//!   buffer per step.
//! - `"gs"`: Gauss-Seidel sweep updating in place, so later vertices see the
//!   new scores of earlier ones within the same step. `D(x)` is taken at the
//!   start of each sweep.
//!
//! Both stop once the L1 change between steps drops below `tol`, or after
//! `max_iterations` steps, returning the last iterate either way.

use crate::compensated::CompensatedSum;
use crate::error::SolverError;
use crate::graph::{EdgeList, SolverParams};
use crate::timer::Stopwatch;
use crate::traits::PageRankEngine;
use crate::types::PageRankResult;

/// Method names accepted by [`PowerIterationEngine`].
pub const METHODS: &[&str] = &["power", "gs"];

/// Default cap on iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Power,
    GaussSeidel,
}

impl Method {
    fn parse(name: &str) -> Result<Self, SolverError> {
        match name {
            "power" => Ok(Method::Power),
            "gs" => Ok(Method::GaussSeidel),
            other => Err(SolverError::UnknownMethod {
                method: other.to_string(),
                available: METHODS.join(", "),
            }),
        }
    }
}

/// `len` copies of `fill`, or a backend error when the buffer cannot be had.
fn filled<T: Clone>(what: &str, len: usize, fill: T) -> Result<Vec<T>, SolverError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|e| {
        SolverError::Backend(format!("cannot allocate {what} for {len} entries: {e}"))
    })?;
    buf.resize(len, fill);
    Ok(buf)
}

// ---------------------------------------------------------------------------
// Preprocessed graph
// ---------------------------------------------------------------------------

/// In-adjacency in CSR form plus out-degrees.
struct InGraph {
    /// `in_ptr[i]..in_ptr[i + 1]` indexes the sources of edges into `i`.
    in_ptr: Vec<usize>,
    in_src: Vec<usize>,
    out_degree: Vec<usize>,
}

impl InGraph {
    /// Counting sort of the edges by destination.
    fn build(num_vs: usize, edges: &[(usize, usize)]) -> Result<Self, SolverError> {
        let ptr_len = num_vs.checked_add(1).ok_or_else(|| {
            SolverError::Backend(format!("vertex count {num_vs} is too large to index"))
        })?;
        let mut out_degree = filled("out-degrees", num_vs, 0usize)?;
        let mut in_ptr = filled("in-adjacency offsets", ptr_len, 0usize)?;
        for &(head, tail) in edges {
            out_degree[head] += 1;
            in_ptr[tail + 1] += 1;
        }
        for i in 0..num_vs {
            in_ptr[i + 1] += in_ptr[i];
        }

        let mut cursor = in_ptr.clone();
        let mut in_src = filled("in-adjacency", edges.len(), 0usize)?;
        for &(head, tail) in edges {
            in_src[cursor[tail]] = head;
            cursor[tail] += 1;
        }

        Ok(Self {
            in_ptr,
            in_src,
            out_degree,
        })
    }

    #[inline]
    fn sources(&self, i: usize) -> &[usize] {
        &self.in_src[self.in_ptr[i]..self.in_ptr[i + 1]]
    }

    fn dangling_mass(&self, x: &[f64]) -> f64 {
        x.iter()
            .zip(&self.out_degree)
            .filter(|&(_, &d)| d == 0)
            .map(|(&xi, _)| xi)
            .collect::<CompensatedSum>()
            .value()
    }

    #[inline]
    fn inflow(&self, i: usize, x: &[f64]) -> f64 {
        self.sources(i)
            .iter()
            .map(|&j| x[j] / self.out_degree[j] as f64)
            .collect::<CompensatedSum>()
            .value()
    }
}

/// Distribution entry `i`, uniform when absent.
#[inline]
fn weight(dist: Option<&[f64]>, i: usize, uniform: f64) -> f64 {
    match dist {
        Some(d) => d[i],
        None => uniform,
    }
}

fn check_distribution(
    name: &'static str,
    dist: Option<&[f64]>,
    num_vs: usize,
) -> Result<(), SolverError> {
    let Some(d) = dist else {
        return Ok(());
    };
    if d.len() != num_vs {
        return Err(SolverError::DistributionLength {
            name,
            len: d.len(),
            expected: num_vs,
        });
    }
    if let Some(pos) = d.iter().position(|x| !x.is_finite()) {
        return Err(SolverError::NonFiniteValue(format!(
            "{name}[{pos}] = {}",
            d[pos]
        )));
    }
    Ok(())
}

/// Range-check every endpoint and narrow to `usize`.
fn read_edges(graph: &EdgeList<'_>) -> Result<Vec<(usize, usize)>, SolverError> {
    let n = graph.num_vs;
    let narrow = |edge: usize, vertex: i64| -> Result<usize, SolverError> {
        usize::try_from(vertex)
            .ok()
            .filter(|&v| v < n)
            .ok_or(SolverError::VertexOutOfRange {
                edge,
                vertex,
                num_vs: n,
            })
    };

    let mut edges = Vec::with_capacity(graph.num_es);
    for (k, (head, tail)) in graph.edges().enumerate() {
        edges.push((narrow(k, head)?, narrow(k, tail)?));
    }
    Ok(edges)
}

// ---------------------------------------------------------------------------
// PowerIterationEngine
// ---------------------------------------------------------------------------

/// Power-iteration / Gauss-Seidel PageRank over an edge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerIterationEngine {
    max_iterations: usize,
}

impl Default for PowerIterationEngine {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl PowerIterationEngine {
    /// Engine with [`DEFAULT_MAX_ITERATIONS`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Current iteration cap.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    fn iterate(
        &self,
        method: Method,
        g: &InGraph,
        params: &SolverParams<'_>,
        x: &mut Vec<f64>,
    ) -> Result<(usize, f64), SolverError> {
        let n = x.len();
        let uniform = 1.0 / n as f64;
        let alpha = params.alpha;
        let mut next = match method {
            Method::Power => filled("next iterate", n, 0.0)?,
            Method::GaussSeidel => Vec::new(),
        };

        let mut iterations = 0;
        let mut residual = f64::INFINITY;

        while iterations < self.max_iterations {
            let dangling = g.dangling_mass(x);
            let mut delta = CompensatedSum::new();

            match method {
                Method::Power => {
                    for (i, slot) in next.iter_mut().enumerate() {
                        *slot = alpha
                            * (g.inflow(i, x) + dangling * weight(params.u, i, uniform))
                            + (1.0 - alpha) * weight(params.v, i, uniform);
                        delta.accumulate((*slot - x[i]).abs());
                    }
                    std::mem::swap(x, &mut next);
                }
                Method::GaussSeidel => {
                    for i in 0..n {
                        let updated = alpha
                            * (g.inflow(i, x) + dangling * weight(params.u, i, uniform))
                            + (1.0 - alpha) * weight(params.v, i, uniform);
                        delta.accumulate((updated - x[i]).abs());
                        x[i] = updated;
                    }
                }
            }

            iterations += 1;
            residual = delta.value();
            if residual < params.tol {
                break;
            }
        }

        Ok((iterations, residual))
    }
}

impl PageRankEngine for PowerIterationEngine {
    fn solve(
        &self,
        graph: &EdgeList<'_>,
        params: &SolverParams<'_>,
    ) -> Result<PageRankResult, SolverError> {
        let method = Method::parse(&params.method)?;
        let n = graph.num_vs;
        check_distribution("u", params.u, n)?;
        check_distribution("v", params.v, n)?;

        let mut clock = Stopwatch::start();
        let edges = read_edges(graph)?;
        let read_time = clock.lap().as_secs_f64();

        if n == 0 {
            return Ok(PageRankResult {
                read_time,
                ..PageRankResult::from_scores(Vec::new(), params.method.clone())
            });
        }

        let g = InGraph::build(n, &edges)?;
        let preprocess_time = clock.lap().as_secs_f64();

        let mut x = filled("scores", n, 1.0 / n as f64)?;
        let (iterations, residual) = self.iterate(method, &g, params, &mut x)?;
        let compute_time = clock.lap().as_secs_f64();

        let converged = residual < params.tol;
        if !converged {
            tracing::warn!(
                method = %params.method,
                iterations,
                residual,
                tol = params.tol,
                "pagerank did not converge, returning last iterate"
            );
        }

        Ok(PageRankResult {
            x,
            method: params.method.clone(),
            num_es_touched: (iterations as u64).saturating_mul(graph.num_es as u64),
            read_time,
            preprocess_time,
            compute_time,
            iterations,
            residual,
            converged,
        })
    }

    fn name(&self) -> &str {
        "power-iteration"
    }

    fn methods(&self) -> &[&'static str] {
        METHODS
    }
}
