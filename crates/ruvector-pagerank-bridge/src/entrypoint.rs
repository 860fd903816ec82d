//! Host entrypoint.
//!
//! [`pagerank_entry`] is the whole life of one host call:
//!
//! 1. validate the eight positional inputs (first failing rule wins),
//! 2. adapt them into an [`EdgeList`](crate::graph::EdgeList) and
//!    [`SolverParams`](crate::graph::SolverParams) borrowing host storage,
//! 3. invoke the engine once through [`SolverGateway`],
//! 4. marshal the scores into a `num_vs x 1` double column.
//!
//! Nothing survives the call. On any error no output is produced and the
//! error's `Display` is the message the host shows its user.

use crate::audit::{AuditBuilder, CallAuditEntry};
use crate::error::BridgeError;
use crate::events::{emit, BridgeEvent};
use crate::gateway::SolverGateway;
use crate::graph::adapt;
use crate::host::{HostArray, HostValue};
use crate::marshal::marshal_result;
use crate::traits::PageRankEngine;
use crate::validation::{validate_call, ValidatedCall};

fn validate<'a>(nlhs: usize, inputs: &[HostArray<'a>]) -> Result<ValidatedCall<'a>, BridgeError> {
    emit(&BridgeEvent::CallReceived {
        nlhs,
        nrhs: inputs.len(),
    });

    validate_call(nlhs, inputs).map_err(|e| {
        tracing::debug!(error = %e, "pagerank call rejected");
        emit(&BridgeEvent::ValidationFailed {
            kind: e.kind(),
            message: e.to_string(),
            arguments: e.arguments().iter().map(|a| a.to_string()).collect(),
        });
        BridgeError::from(e)
    })
}

/// Run one PageRank call.
///
/// `nlhs` is the number of outputs the host asked for. Zero is allowed: the
/// host still receives the column as its implicit answer, so a successful
/// call always returns exactly one value.
///
/// # Errors
///
/// [`BridgeError::Validation`] for a rejected argument, or
/// [`BridgeError::Solver`] carrying the engine's error unchanged.
pub fn pagerank_entry<E: PageRankEngine + ?Sized>(
    nlhs: usize,
    inputs: &[HostArray<'_>],
    engine: &E,
) -> Result<Vec<HostValue>, BridgeError> {
    let call = validate(nlhs, inputs)?;
    let (graph, params) = adapt(call);
    let outcome = SolverGateway::new(engine).solve(&graph, &params)?;
    Ok(vec![marshal_result(outcome.result)])
}

/// [`pagerank_entry`] over owned host values.
///
/// # Errors
///
/// [`BridgeError::Host`] if a value's dims do not describe its data, then as
/// [`pagerank_entry`].
pub fn pagerank_entry_values<E: PageRankEngine + ?Sized>(
    nlhs: usize,
    inputs: &[HostValue],
    engine: &E,
) -> Result<Vec<HostValue>, BridgeError> {
    let views = inputs
        .iter()
        .map(HostValue::view)
        .collect::<Result<Vec<_>, _>>()?;
    pagerank_entry(nlhs, &views, engine)
}

/// [`pagerank_entry`], also returning an audit record of the call.
///
/// # Errors
///
/// As [`pagerank_entry`]. Failed calls produce no audit entry.
pub fn pagerank_entry_audited<E: PageRankEngine + ?Sized>(
    nlhs: usize,
    inputs: &[HostArray<'_>],
    engine: &E,
    request_id: &str,
) -> Result<(Vec<HostValue>, CallAuditEntry), BridgeError> {
    let call = validate(nlhs, inputs)?;
    let (graph, params) = adapt(call);
    let audit = AuditBuilder::start(request_id, &graph, &params);
    let outcome = SolverGateway::new(engine).solve(&graph, &params)?;
    let entry = audit.finish(&outcome.result);
    tracing::info!(
        request_id,
        method = %entry.method,
        num_vs = entry.num_vs,
        num_es = entry.num_es,
        wall_time_us = entry.wall_time_us,
        "pagerank call audited"
    );
    Ok((vec![marshal_result(outcome.result)], entry))
}

/// Validate a call without solving it.
///
/// # Errors
///
/// The first failing [`ValidationError`](crate::error::ValidationError),
/// wrapped in [`BridgeError`].
pub fn validate_entry<'a>(
    nlhs: usize,
    inputs: &[HostArray<'a>],
) -> Result<ValidatedCall<'a>, BridgeError> {
    validate(nlhs, inputs)
}
