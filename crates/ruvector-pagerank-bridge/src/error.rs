//! Error types for the PageRank bridge.
//!
//! Validation failures carry the exact message the host surfaces to its
//! caller, so `Display` on [`ValidationError`] is part of the external
//! contract and must not be reworded. Engine failures ([`SolverError`]) are
//! passed through [`BridgeError`] untouched. All errors implement
//! `std::error::Error` via `thiserror`.

use serde::{Deserialize, Serialize};

/// Coarse classification of every failure the bridge can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Wrong number of input or output arguments.
    ArgumentCount,
    /// Wrong element type or shape for an argument.
    Type,
    /// A value outside its required domain.
    Range,
    /// Two arguments disagree with each other (lengths).
    Consistency,
    /// The engine failed during `solve`.
    SolverFailure,
}

/// Argument validation errors.
///
/// Raised before the engine is touched. The `Display` strings are reproduced
/// verbatim for the host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The call did not receive exactly eight inputs.
    #[error("Not enough input arguments.")]
    NotEnoughInputs,

    /// More than one output was requested.
    #[error("Too many output arguments.")]
    TooManyOutputs,

    /// `num_vs` is not an integer scalar.
    #[error("num_vs must be an int.")]
    NumVsNotInt,

    /// `num_vs` is zero or negative.
    #[error("num_vs must be > 0.")]
    NumVsNotPositive,

    /// `heads` or `tails` is not an integer vector.
    #[error("heads and tails must be int vectors.")]
    EdgesNotIntVectors,

    /// `heads` and `tails` have different element counts.
    #[error("heads and tails must be of the same size.")]
    EdgeLengthMismatch,

    /// `alpha` or `tol` is not a real double scalar.
    #[error("alpha and tol must be real scalars.")]
    ParamsNotRealScalars,

    /// `alpha` is outside the open interval (0, 1).
    #[error("alpha must be in (0, 1).")]
    AlphaOutOfRange,

    /// `tol` is not strictly positive.
    #[error("tol must be > 0.")]
    TolNotPositive,

    /// `u` or `v` is not a real double vector.
    #[error("u and v must be real vectors.")]
    DistributionsNotRealVectors,

    /// `u` or `v` is neither empty nor `num_vs` long.
    #[error("u and v must be the same size as the matrix, or empty.")]
    DistributionLengthMismatch,

    /// `method` is not a character vector holding a non-empty string.
    #[error("method must be a string")]
    MethodNotString,
}

impl ValidationError {
    /// Taxonomy bucket for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotEnoughInputs | Self::TooManyOutputs => ErrorKind::ArgumentCount,
            Self::NumVsNotInt
            | Self::EdgesNotIntVectors
            | Self::ParamsNotRealScalars
            | Self::DistributionsNotRealVectors
            | Self::MethodNotString => ErrorKind::Type,
            Self::NumVsNotPositive | Self::AlphaOutOfRange | Self::TolNotPositive => {
                ErrorKind::Range
            }
            Self::EdgeLengthMismatch | Self::DistributionLengthMismatch => {
                ErrorKind::Consistency
            }
        }
    }

    /// Positional argument names the rule inspects.
    pub fn arguments(&self) -> &'static [&'static str] {
        match self {
            Self::NotEnoughInputs | Self::TooManyOutputs => &[],
            Self::NumVsNotInt | Self::NumVsNotPositive => &["num_vs"],
            Self::EdgesNotIntVectors | Self::EdgeLengthMismatch => &["heads", "tails"],
            Self::ParamsNotRealScalars => &["alpha", "tol"],
            Self::AlphaOutOfRange => &["alpha"],
            Self::TolNotPositive => &["tol"],
            Self::DistributionsNotRealVectors => &["u", "v"],
            Self::DistributionLengthMismatch => &["num_vs", "u", "v"],
            Self::MethodNotString => &["method"],
        }
    }
}

/// Failures reported by a [`PageRankEngine`](crate::traits::PageRankEngine).
///
/// The bridge never inspects or rewrites these.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolverError {
    /// The engine does not implement the requested method.
    #[error("unknown solver method '{method}' (available: {available})")]
    UnknownMethod {
        /// Requested method name.
        method: String,
        /// Comma separated list of supported names.
        available: String,
    },

    /// An edge endpoint does not name a vertex in `[0, num_vs)`.
    #[error("edge {edge} references vertex {vertex} outside [0, {num_vs})")]
    VertexOutOfRange {
        /// Position of the offending edge in the edge list.
        edge: usize,
        /// The out-of-range index as supplied by the host.
        vertex: i64,
        /// Declared vertex count.
        num_vs: usize,
    },

    /// A distribution vector reached the engine with the wrong length.
    #[error("{name} has length {len}, expected {expected}")]
    DistributionLength {
        /// `"u"` or `"v"`.
        name: &'static str,
        /// Actual length.
        len: usize,
        /// Vertex count.
        expected: usize,
    },

    /// A NaN or infinite value was found in engine input.
    #[error("non-finite value detected: {0}")]
    NonFiniteValue(String),

    /// The engine returned a score vector of the wrong length.
    #[error("solver returned {actual} scores for {expected} vertices")]
    ResultLength {
        /// Vertex count of the graph.
        expected: usize,
        /// Length of the returned vector.
        actual: usize,
    },

    /// A backend-specific failure.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Inconsistent host array: the declared shape does not describe the
/// backing storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostShapeError {
    /// The element count implied by `dims` differs from what is stored.
    #[error("array of shape {dims:?} needs {expected} elements but holds {actual}")]
    Mismatch {
        /// Declared dimensions.
        dims: Vec<usize>,
        /// Element count implied by `dims`.
        expected: usize,
        /// Element count actually stored.
        actual: usize,
    },

    /// The product of `dims` does not fit in `usize`.
    #[error("array of shape {dims:?} has more elements than can be addressed")]
    Overflow {
        /// Declared dimensions.
        dims: Vec<usize>,
    },
}

/// Top-level error returned by the entrypoint.
///
/// Wraps without rewording, so `to_string()` is exactly what the host shows.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BridgeError {
    /// Rejected during argument validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Raised by the engine during `solve`.
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// An owned host value could not be viewed as an array.
    #[error(transparent)]
    Host(#[from] HostShapeError),
}

impl BridgeError {
    /// Taxonomy bucket for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(e) => e.kind(),
            Self::Solver(_) => ErrorKind::SolverFailure,
            Self::Host(_) => ErrorKind::Type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_verbatim() {
        let cases = [
            (ValidationError::NotEnoughInputs, "Not enough input arguments."),
            (ValidationError::TooManyOutputs, "Too many output arguments."),
            (ValidationError::NumVsNotInt, "num_vs must be an int."),
            (ValidationError::NumVsNotPositive, "num_vs must be > 0."),
            (
                ValidationError::EdgesNotIntVectors,
                "heads and tails must be int vectors.",
            ),
            (
                ValidationError::EdgeLengthMismatch,
                "heads and tails must be of the same size.",
            ),
            (
                ValidationError::ParamsNotRealScalars,
                "alpha and tol must be real scalars.",
            ),
            (ValidationError::AlphaOutOfRange, "alpha must be in (0, 1)."),
            (ValidationError::TolNotPositive, "tol must be > 0."),
            (
                ValidationError::DistributionsNotRealVectors,
                "u and v must be real vectors.",
            ),
            (
                ValidationError::DistributionLengthMismatch,
                "u and v must be the same size as the matrix, or empty.",
            ),
            (ValidationError::MethodNotString, "method must be a string"),
        ];
        for (err, msg) in cases {
            assert_eq!(err.to_string(), msg);
            assert_eq!(BridgeError::from(err).to_string(), msg);
        }
    }

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(ValidationError::NotEnoughInputs.kind(), ErrorKind::ArgumentCount);
        assert_eq!(ValidationError::TooManyOutputs.kind(), ErrorKind::ArgumentCount);
        assert_eq!(ValidationError::MethodNotString.kind(), ErrorKind::Type);
        assert_eq!(ValidationError::AlphaOutOfRange.kind(), ErrorKind::Range);
        assert_eq!(ValidationError::NumVsNotPositive.kind(), ErrorKind::Range);
        assert_eq!(
            ValidationError::DistributionLengthMismatch.kind(),
            ErrorKind::Consistency
        );
        assert_eq!(
            BridgeError::from(SolverError::Backend("x".into())).kind(),
            ErrorKind::SolverFailure
        );
    }

    #[test]
    fn solver_errors_pass_through_unchanged() {
        let inner = SolverError::VertexOutOfRange {
            edge: 3,
            vertex: 9,
            num_vs: 4,
        };
        let msg = inner.to_string();
        let outer = BridgeError::from(inner.clone());
        assert_eq!(outer.to_string(), msg);
        assert_eq!(outer, BridgeError::Solver(inner));
    }

    #[test]
    fn arguments_name_the_inspected_inputs() {
        assert_eq!(ValidationError::AlphaOutOfRange.arguments(), &["alpha"]);
        assert_eq!(
            ValidationError::EdgeLengthMismatch.arguments(),
            &["heads", "tails"]
        );
        assert!(ValidationError::NotEnoughInputs.arguments().is_empty());
    }
}
