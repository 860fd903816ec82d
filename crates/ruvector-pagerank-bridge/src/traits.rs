//! Engine trait.
//!
//! The bridge talks to a PageRank solver through [`PageRankEngine`] only.
//! How the engine iterates, which methods it offers, and how it reports its
//! own failures are its business; the bridge calls `solve` once per host call
//! and forwards whatever comes back.

use crate::error::SolverError;
use crate::graph::{EdgeList, SolverParams};
use crate::types::PageRankResult;

/// A PageRank solver operating on an edge list.
pub trait PageRankEngine: Send + Sync {
    /// Compute scores for every vertex of `graph`.
    ///
    /// `params.u` / `params.v` of `None` mean "use the engine's default";
    /// `Some` slices are exactly `graph.num_vs` long.
    ///
    /// # Errors
    ///
    /// Any [`SolverError`] the engine chooses to raise. The bridge does not
    /// retry or translate it.
    fn solve(
        &self,
        graph: &EdgeList<'_>,
        params: &SolverParams<'_>,
    ) -> Result<PageRankResult, SolverError>;

    /// Short identifier used in logs and audit entries.
    fn name(&self) -> &str;

    /// Method names this engine accepts. Empty when the engine does not
    /// advertise them.
    fn methods(&self) -> &[&'static str] {
        &[]
    }
}

impl<E: PageRankEngine + ?Sized> PageRankEngine for Box<E> {
    fn solve(
        &self,
        graph: &EdgeList<'_>,
        params: &SolverParams<'_>,
    ) -> Result<PageRankResult, SolverError> {
        (**self).solve(graph, params)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn methods(&self) -> &[&'static str] {
        (**self).methods()
    }
}
