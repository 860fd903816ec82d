//! The single call boundary to the engine.
//!
//! [`SolverGateway`] invokes [`PageRankEngine::solve`] exactly once per host
//! call, times it, and takes ownership of the returned scores. It never
//! retries and never rewrites an engine failure. The one check it adds is
//! that the engine returned one score per vertex; anything else is reported
//! as a solver failure before it can reach the host.

use std::time::Duration;

use crate::error::SolverError;
use crate::events::{emit, BridgeEvent};
use crate::graph::{EdgeList, SolverParams};
use crate::timer::measure;
use crate::traits::PageRankEngine;
use crate::types::PageRankResult;

/// Scores plus the wall time of the engine call.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayOutcome {
    /// Engine output, owned until marshaled.
    pub result: PageRankResult,
    /// Wall time spent inside `solve`.
    pub wall_time: Duration,
}

/// Borrowing handle on an engine.
pub struct SolverGateway<'e, E: PageRankEngine + ?Sized> {
    engine: &'e E,
}

impl<'e, E: PageRankEngine + ?Sized> SolverGateway<'e, E> {
    /// Wrap `engine`.
    pub fn new(engine: &'e E) -> Self {
        Self { engine }
    }

    /// The wrapped engine.
    pub fn engine(&self) -> &'e E {
        self.engine
    }

    /// Solve once.
    ///
    /// # Errors
    ///
    /// Whatever the engine raised, unchanged, or
    /// [`SolverError::ResultLength`] if the score vector is not `num_vs` long.
    pub fn solve(
        &self,
        graph: &EdgeList<'_>,
        params: &SolverParams<'_>,
    ) -> Result<GatewayOutcome, SolverError> {
        emit(&BridgeEvent::SolveRequested {
            engine: self.engine.name().to_string(),
            method: params.method.clone(),
            num_vs: graph.num_vs,
            num_es: graph.num_es,
            has_u: params.u.is_some(),
            has_v: params.v.is_some(),
        });

        let (outcome, wall_time) = measure(|| self.engine.solve(graph, params));

        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(engine = self.engine.name(), error = %e, "engine solve failed");
                emit(&BridgeEvent::SolveFailed {
                    reason: e.to_string(),
                    wall_time,
                });
                return Err(e);
            }
        };

        if result.x.len() != graph.num_vs {
            let err = SolverError::ResultLength {
                expected: graph.num_vs,
                actual: result.x.len(),
            };
            emit(&BridgeEvent::SolveFailed {
                reason: err.to_string(),
                wall_time,
            });
            return Err(err);
        }

        emit(&BridgeEvent::SolveCompleted {
            method: result.method.clone(),
            iterations: result.iterations,
            converged: result.converged,
            wall_time,
        });

        Ok(GatewayOutcome { result, wall_time })
    }
}
