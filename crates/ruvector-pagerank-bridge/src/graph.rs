//! Graph adapter: validated host arrays to the engine's native records.
//!
//! [`EdgeList`] and [`SolverParams`] borrow the host's storage for the
//! lifetime of one call. Vertex indices are handed over exactly as the host
//! supplied them (int32 or int64) without copying or range checks; checking
//! indices against `num_vs` is the engine's job.

use crate::error::ValidationError;
use crate::host::HostData;
use crate::validation::ValidatedCall;

// ---------------------------------------------------------------------------
// Vertex index views
// ---------------------------------------------------------------------------

/// Borrowed vertex indices in the host's integer width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexIndices<'a> {
    /// 32-bit indices.
    I32(&'a [i32]),
    /// 64-bit indices.
    I64(&'a [i64]),
}

impl<'a> VertexIndices<'a> {
    /// View integer host data as vertex indices. `None` for non-integer data.
    pub fn from_host(data: HostData<'a>) -> Option<Self> {
        match data {
            HostData::Int32(s) => Some(VertexIndices::I32(s)),
            HostData::Int64(s) => Some(VertexIndices::I64(s)),
            _ => None,
        }
    }

    /// Number of indices.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            VertexIndices::I32(s) => s.len(),
            VertexIndices::I64(s) => s.len(),
        }
    }

    /// `true` if there are no indices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the indices, widened to `i64`.
    pub fn iter(&self) -> Box<dyn Iterator<Item = i64> + 'a> {
        match *self {
            VertexIndices::I32(s) => Box::new(s.iter().map(|&v| i64::from(v))),
            VertexIndices::I64(s) => Box::new(s.iter().copied()),
        }
    }
}

// ---------------------------------------------------------------------------
// Edge list
// ---------------------------------------------------------------------------

/// Directed graph as parallel head/tail arrays.
///
/// Edge `k` runs from `heads[k]` (source) to `tails[k]` (destination).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeList<'a> {
    /// Vertex count (always positive once validated).
    pub num_vs: usize,
    /// Edge count, equal to `heads.len()` and `tails.len()`.
    pub num_es: usize,
    /// Source vertex of each edge.
    pub heads: VertexIndices<'a>,
    /// Destination vertex of each edge.
    pub tails: VertexIndices<'a>,
}

impl<'a> EdgeList<'a> {
    /// Assemble an edge list.
    ///
    /// # Errors
    ///
    /// [`ValidationError::EdgeLengthMismatch`] if `heads` and `tails` differ in
    /// length.
    pub fn new(
        num_vs: usize,
        heads: VertexIndices<'a>,
        tails: VertexIndices<'a>,
    ) -> Result<Self, ValidationError> {
        if heads.len() != tails.len() {
            return Err(ValidationError::EdgeLengthMismatch);
        }
        Ok(Self {
            num_vs,
            num_es: heads.len(),
            heads,
            tails,
        })
    }

    /// Borrow the edge arrays of a validated call.
    pub fn from_validated(call: &ValidatedCall<'a>) -> Self {
        Self {
            num_vs: call.num_vs,
            num_es: call.heads.len(),
            heads: call.heads,
            tails: call.tails,
        }
    }

    /// Iterate `(head, tail)` pairs in edge order.
    pub fn edges(&self) -> impl Iterator<Item = (i64, i64)> + 'a {
        self.heads.iter().zip(self.tails.iter())
    }
}

// ---------------------------------------------------------------------------
// Solver parameters
// ---------------------------------------------------------------------------

/// Scalar and vector parameters for one solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverParams<'a> {
    /// Damping factor in (0, 1).
    pub alpha: f64,
    /// Convergence tolerance, > 0.
    pub tol: f64,
    /// Dangling/personalization distribution; `None` lets the engine choose.
    pub u: Option<&'a [f64]>,
    /// Teleport distribution; `None` lets the engine choose.
    pub v: Option<&'a [f64]>,
    /// Engine-defined method name, opaque to the bridge.
    pub method: String,
}

impl<'a> SolverParams<'a> {
    /// Map a host distribution to its engine form. Empty means "absent", not
    /// a zero vector.
    #[inline]
    pub fn distribution(values: &'a [f64]) -> Option<&'a [f64]> {
        if values.is_empty() {
            None
        } else {
            Some(values)
        }
    }

    /// Parameters of a validated call. Takes the call so the method name
    /// moves instead of being copied.
    pub fn from_validated(call: ValidatedCall<'a>) -> Self {
        Self {
            alpha: call.alpha,
            tol: call.tol,
            u: Self::distribution(call.u),
            v: Self::distribution(call.v),
            method: call.method,
        }
    }
}

/// Split a validated call into the engine's graph and parameter records.
///
/// Consumes the call so the method string moves instead of being cloned.
pub fn adapt(call: ValidatedCall<'_>) -> (EdgeList<'_>, SolverParams<'_>) {
    let graph = EdgeList::from_validated(&call);
    let params = SolverParams::from_validated(call);
    (graph, params)
}
