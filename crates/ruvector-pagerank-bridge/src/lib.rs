//! Strict host-array boundary for edge-list PageRank solvers.
//!
//! A numeric host environment hands over eight shape-tagged arrays
//! (`num_vs, heads, tails, alpha, tol, u, v, method`). This crate checks each
//! one against an exact type, shape and value contract, borrows the validated
//! storage as an edge list, calls a [`PageRankEngine`] exactly once, and
//! returns the scores as a `num_vs x 1` double column.
//!
//! | Stage | Module |
//! |-------|--------|
//! | Host array views | [`host`] |
//! | Argument rules | [`validation`] |
//! | Engine records | [`graph`] |
//! | Single engine call | [`gateway`], [`traits`] |
//! | Output column | [`marshal`] |
//! | The whole call | [`entrypoint`] |
//!
//! [`compensated`] provides the Kahan accumulator used wherever long sums
//! are formed, and [`timer`] the monotonic phase timing.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "reference-engine")] {
//! use ruvector_pagerank_bridge::engine::PowerIterationEngine;
//! use ruvector_pagerank_bridge::entrypoint::pagerank_entry_values;
//! use ruvector_pagerank_bridge::host::HostValue;
//!
//! let call = vec![
//!     HostValue::int32_scalar(4),
//!     HostValue::int32_column(vec![0, 1, 2, 3]),
//!     HostValue::int32_column(vec![1, 2, 3, 0]),
//!     HostValue::double_scalar(0.85),
//!     HostValue::double_scalar(1e-10),
//!     HostValue::empty_double(),
//!     HostValue::empty_double(),
//!     HostValue::string("power"),
//! ];
//! let out = pagerank_entry_values(1, &call, &PowerIterationEngine::new()).unwrap();
//! let x = out[0].as_real().unwrap();
//! assert!(x.iter().all(|&xi| (xi - 0.25).abs() < 1e-10));
//! # }
//! ```

pub mod audit;
pub mod compensated;
pub mod entrypoint;
pub mod error;
pub mod events;
pub mod gateway;
pub mod graph;
pub mod host;
pub mod marshal;
pub mod timer;
pub mod traits;
pub mod types;
pub mod validation;

#[cfg(feature = "reference-engine")]
pub mod engine;

pub use compensated::{compensated_sum, CompensatedSum};
pub use entrypoint::{pagerank_entry, pagerank_entry_values};
pub use error::{BridgeError, ErrorKind, SolverError, ValidationError};
pub use graph::{EdgeList, SolverParams, VertexIndices};
pub use host::{ElementClass, HostArray, HostData, HostValue};
pub use traits::PageRankEngine;
pub use types::PageRankResult;

#[cfg(feature = "reference-engine")]
pub use engine::PowerIterationEngine;
