//! Argument validation for the PageRank entrypoint.
//!
//! The host calls the bridge with exactly eight positional arrays:
//!
//! | # | Name     | Type/shape             | Constraint              |
//! |---|----------|------------------------|-------------------------|
//! | 1 | `num_vs` | integer scalar         | > 0                     |
//! | 2 | `heads`  | integer vector, len E  | same length as `tails`  |
//! | 3 | `tails`  | integer vector, len E  | same length as `heads`  |
//! | 4 | `alpha`  | real scalar            | 0 < alpha < 1           |
//! | 5 | `tol`    | real scalar            | tol > 0                 |
//! | 6 | `u`      | real vector            | length 0 or `num_vs`    |
//! | 7 | `v`      | real vector            | length 0 or `num_vs`    |
//! | 8 | `method` | character vector       | non-empty               |
//!
//! [`validate_call`] applies the rules in a fixed order and stops at the
//! first violation. Callers see exactly one message even when several
//! arguments are wrong, and which message wins is part of the contract.
//!
//! The shape predicates ([`is_int_scalar`], [`is_vector`], ...) are
//! independent and usable on their own.

use crate::error::ValidationError;
use crate::graph::VertexIndices;
use crate::host::{ElementClass, HostArray, HostData};

/// Number of positional inputs the entrypoint accepts.
pub const INPUT_ARGUMENTS: usize = 8;

/// Maximum number of outputs the entrypoint can produce.
pub const MAX_OUTPUT_ARGUMENTS: usize = 1;

// ---------------------------------------------------------------------------
// Shape predicates
// ---------------------------------------------------------------------------

/// Integer (int32 or int64) array with exactly one element.
pub fn is_int_scalar(a: &HostArray<'_>) -> bool {
    a.class().is_integer() && a.element_count() == 1
}

/// Non-complex double array with exactly one element.
pub fn is_real_scalar(a: &HostArray<'_>) -> bool {
    a.class() == ElementClass::Double && !a.is_complex() && a.element_count() == 1
}

/// Two-dimensional array whose smaller extent is at most one.
///
/// `0 x 0`, `1 x n` and `n x 1` all qualify.
pub fn is_vector(a: &HostArray<'_>) -> bool {
    match a.dims() {
        &[rows, cols] => rows.min(cols) <= 1,
        _ => false,
    }
}

/// Integer array of vector shape.
pub fn is_int_vector(a: &HostArray<'_>) -> bool {
    a.class().is_integer() && is_vector(a)
}

/// Non-complex double array of vector shape.
pub fn is_real_vector(a: &HostArray<'_>) -> bool {
    a.class() == ElementClass::Double && !a.is_complex() && is_vector(a)
}

/// Character array of vector shape.
pub fn is_string(a: &HostArray<'_>) -> bool {
    a.class() == ElementClass::Char && is_vector(a)
}

// ---------------------------------------------------------------------------
// Validated call
// ---------------------------------------------------------------------------

/// All eight arguments after validation, still borrowing host storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCall<'a> {
    /// Vertex count.
    pub num_vs: usize,
    /// Edge sources.
    pub heads: VertexIndices<'a>,
    /// Edge destinations.
    pub tails: VertexIndices<'a>,
    /// Damping factor.
    pub alpha: f64,
    /// Convergence tolerance.
    pub tol: f64,
    /// Raw `u`; empty when the host passed an empty array.
    pub u: &'a [f64],
    /// Raw `v`; empty when the host passed an empty array.
    pub v: &'a [f64],
    /// Method name copied out of host character storage.
    pub method: String,
}

/// Validate the argument count of a call.
///
/// # Errors
///
/// [`ValidationError::NotEnoughInputs`] unless `nrhs == 8`;
/// [`ValidationError::TooManyOutputs`] if `nlhs > 1`.
pub fn validate_arity(nlhs: usize, nrhs: usize) -> Result<(), ValidationError> {
    if nrhs != INPUT_ARGUMENTS {
        return Err(ValidationError::NotEnoughInputs);
    }
    if nlhs > MAX_OUTPUT_ARGUMENTS {
        return Err(ValidationError::TooManyOutputs);
    }
    Ok(())
}

/// Run every argument rule in order and extract the validated values.
///
/// # Errors
///
/// The [`ValidationError`] of the first rule that fails; later arguments are
/// not inspected.
pub fn validate_call<'a>(
    nlhs: usize,
    inputs: &[HostArray<'a>],
) -> Result<ValidatedCall<'a>, ValidationError> {
    validate_arity(nlhs, inputs.len())?;

    let num_vs = parse_num_vs(&inputs[0])?;
    let (heads, tails) = parse_edges(&inputs[1], &inputs[2])?;
    let (alpha, tol) = parse_alpha_tol(&inputs[3], &inputs[4])?;
    let (u, v) = parse_distributions(&inputs[5], &inputs[6], num_vs)?;
    let method = parse_method(&inputs[7])?;

    tracing::debug!(
        num_vs,
        num_es = heads.len(),
        alpha,
        tol,
        u_len = u.len(),
        v_len = v.len(),
        method = %method,
        "pagerank call validated"
    );

    Ok(ValidatedCall {
        num_vs,
        heads,
        tails,
        alpha,
        tol,
        u,
        v,
        method,
    })
}

// ---------------------------------------------------------------------------
// Per-argument rules
// ---------------------------------------------------------------------------

/// Rule 2: integer scalar, strictly positive.
pub fn parse_num_vs(raw: &HostArray<'_>) -> Result<usize, ValidationError> {
    if !is_int_scalar(raw) {
        return Err(ValidationError::NumVsNotInt);
    }
    let value = match raw.data() {
        HostData::Int32(d) => i64::from(d[0]),
        HostData::Int64(d) => d[0],
        _ => return Err(ValidationError::NumVsNotInt),
    };
    if value <= 0 {
        return Err(ValidationError::NumVsNotPositive);
    }
    usize::try_from(value).map_err(|_| ValidationError::NumVsNotInt)
}

/// Rule 3: both integer vectors of equal element count.
pub fn parse_edges<'a>(
    raw_heads: &HostArray<'a>,
    raw_tails: &HostArray<'a>,
) -> Result<(VertexIndices<'a>, VertexIndices<'a>), ValidationError> {
    if !is_int_vector(raw_heads) || !is_int_vector(raw_tails) {
        return Err(ValidationError::EdgesNotIntVectors);
    }
    if raw_heads.element_count() != raw_tails.element_count() {
        return Err(ValidationError::EdgeLengthMismatch);
    }
    let heads =
        VertexIndices::from_host(raw_heads.data()).ok_or(ValidationError::EdgesNotIntVectors)?;
    let tails =
        VertexIndices::from_host(raw_tails.data()).ok_or(ValidationError::EdgesNotIntVectors)?;
    Ok((heads, tails))
}

/// Rule 4: two real scalars, `alpha` in (0, 1), `tol` > 0.
///
/// Comparisons are phrased so that NaN fails the range check.
pub fn parse_alpha_tol(
    raw_alpha: &HostArray<'_>,
    raw_tol: &HostArray<'_>,
) -> Result<(f64, f64), ValidationError> {
    if !is_real_scalar(raw_alpha) || !is_real_scalar(raw_tol) {
        return Err(ValidationError::ParamsNotRealScalars);
    }
    let alpha = first_real(raw_alpha).ok_or(ValidationError::ParamsNotRealScalars)?;
    let tol = first_real(raw_tol).ok_or(ValidationError::ParamsNotRealScalars)?;
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(ValidationError::AlphaOutOfRange);
    }
    if !(tol > 0.0) {
        return Err(ValidationError::TolNotPositive);
    }
    Ok((alpha, tol))
}

/// Rule 5: two real vectors, each empty or exactly `num_vs` long.
pub fn parse_distributions<'a>(
    raw_u: &HostArray<'a>,
    raw_v: &HostArray<'a>,
    num_vs: usize,
) -> Result<(&'a [f64], &'a [f64]), ValidationError> {
    if !is_real_vector(raw_u) || !is_real_vector(raw_v) {
        return Err(ValidationError::DistributionsNotRealVectors);
    }
    let fits = |n: usize| n == 0 || n == num_vs;
    if !fits(raw_u.element_count()) || !fits(raw_v.element_count()) {
        return Err(ValidationError::DistributionLengthMismatch);
    }
    let u = real_slice(raw_u).ok_or(ValidationError::DistributionsNotRealVectors)?;
    let v = real_slice(raw_v).ok_or(ValidationError::DistributionsNotRealVectors)?;
    Ok((u, v))
}

/// Rule 6: character vector decoding to a non-empty string.
///
/// The host string ends at the first NUL code unit, if any.
pub fn parse_method(raw: &HostArray<'_>) -> Result<String, ValidationError> {
    if !is_string(raw) {
        return Err(ValidationError::MethodNotString);
    }
    let units = match raw.data() {
        HostData::Char(units) => units,
        _ => return Err(ValidationError::MethodNotString),
    };
    let end = units.iter().position(|&c| c == 0).unwrap_or(units.len());
    let method = String::from_utf16(&units[..end]).map_err(|_| ValidationError::MethodNotString)?;
    if method.is_empty() {
        return Err(ValidationError::MethodNotString);
    }
    Ok(method)
}

#[inline]
fn real_slice<'a>(a: &HostArray<'a>) -> Option<&'a [f64]> {
    match a.data() {
        HostData::Double { real, imag: None } => Some(real),
        _ => None,
    }
}

#[inline]
fn first_real(a: &HostArray<'_>) -> Option<f64> {
    real_slice(a).and_then(|s| s.first().copied())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    fn shaped<'a>(dims: &'a [usize], data: HostData<'a>) -> HostArray<'a> {
        HostArray::new(Cow::Borrowed(dims), data).unwrap()
    }

    // -- predicates ---------------------------------------------------------

    #[test]
    fn int_scalar_accepts_both_widths() {
        let a = 3i32;
        let b = 3i64;
        assert!(is_int_scalar(&HostArray::int32_scalar(&a)));
        assert!(is_int_scalar(&HostArray::int64_scalar(&b)));
    }

    #[test]
    fn int_scalar_rejects_double_and_vectors() {
        let d = 3.0f64;
        let v = [1i32, 2];
        assert!(!is_int_scalar(&HostArray::double_scalar(&d)));
        assert!(!is_int_scalar(&HostArray::column(HostData::Int32(&v))));
    }

    #[test]
    fn int_scalar_ignores_shape_beyond_count() {
        // A 1x1x1 array still holds one element.
        let a = [4i32];
        assert!(is_int_scalar(&shaped(&[1, 1, 1], HostData::Int32(&a))));
    }

    #[test]
    fn real_scalar_rejects_complex() {
        let re = [0.5f64];
        let im = [0.1f64];
        let c = shaped(
            &[1, 1],
            HostData::Double {
                real: &re,
                imag: Some(&im),
            },
        );
        assert!(!is_real_scalar(&c));
    }

    #[test]
    fn vector_shapes() {
        let six = [0i32; 6];
        let none: [i32; 0] = [];
        assert!(is_vector(&shaped(&[6, 1], HostData::Int32(&six))));
        assert!(is_vector(&shaped(&[1, 6], HostData::Int32(&six))));
        assert!(is_vector(&shaped(&[0, 0], HostData::Int32(&none))));
        assert!(is_vector(&shaped(&[0, 5], HostData::Int32(&none))));
        assert!(!is_vector(&shaped(&[2, 3], HostData::Int32(&six))));
        assert!(!is_vector(&shaped(&[6, 1, 1], HostData::Int32(&six))));
        assert!(!is_vector(&shaped(&[6], HostData::Int32(&six))));
    }

    #[test]
    fn string_predicate() {
        let s: Vec<u16> = "gs".encode_utf16().collect();
        assert!(is_string(&HostArray::row(HostData::Char(&s))));
        let n = [1i32];
        assert!(!is_string(&HostArray::row(HostData::Int32(&n))));
    }

    // -- arity --------------------------------------------------------------

    #[test]
    fn arity_checks_inputs_before_outputs() {
        assert_eq!(validate_arity(5, 7), Err(ValidationError::NotEnoughInputs));
        assert_eq!(validate_arity(5, 9), Err(ValidationError::NotEnoughInputs));
        assert_eq!(validate_arity(2, 8), Err(ValidationError::TooManyOutputs));
        assert!(validate_arity(0, 8).is_ok());
        assert!(validate_arity(1, 8).is_ok());
    }

    // -- num_vs -------------------------------------------------------------

    #[test]
    fn num_vs_rules() {
        let ok = 4i64;
        let zero = 0i32;
        let neg = -2i64;
        let real = 4.0f64;
        assert_eq!(parse_num_vs(&HostArray::int64_scalar(&ok)), Ok(4));
        assert_eq!(
            parse_num_vs(&HostArray::int32_scalar(&zero)),
            Err(ValidationError::NumVsNotPositive)
        );
        assert_eq!(
            parse_num_vs(&HostArray::int64_scalar(&neg)),
            Err(ValidationError::NumVsNotPositive)
        );
        assert_eq!(
            parse_num_vs(&HostArray::double_scalar(&real)),
            Err(ValidationError::NumVsNotInt)
        );
    }

    // -- alpha / tol --------------------------------------------------------

    #[test]
    fn alpha_bounds_are_exclusive() {
        let tol = 1e-6;
        for bad in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            assert_eq!(
                parse_alpha_tol(&HostArray::double_scalar(&bad), &HostArray::double_scalar(&tol)),
                Err(ValidationError::AlphaOutOfRange),
                "alpha = {bad}"
            );
        }
    }

    #[test]
    fn tol_must_be_positive() {
        let alpha = 0.85;
        for bad in [0.0, -1e-9, f64::NAN] {
            assert_eq!(
                parse_alpha_tol(&HostArray::double_scalar(&alpha), &HostArray::double_scalar(&bad)),
                Err(ValidationError::TolNotPositive),
                "tol = {bad}"
            );
        }
    }

    #[test]
    fn alpha_is_checked_before_tol() {
        let alpha = 2.0;
        let tol = -1.0;
        assert_eq!(
            parse_alpha_tol(&HostArray::double_scalar(&alpha), &HostArray::double_scalar(&tol)),
            Err(ValidationError::AlphaOutOfRange)
        );
    }

    // -- u / v --------------------------------------------------------------

    #[test]
    fn distributions_accept_empty_or_full() {
        let full = [0.25f64; 4];
        let (u, v) = parse_distributions(
            &HostArray::empty_double(),
            &HostArray::double_column(&full),
            4,
        )
        .unwrap();
        assert!(u.is_empty());
        assert_eq!(v.len(), 4);
    }

    #[test]
    fn distributions_reject_other_lengths() {
        let three = [0.0f64; 3];
        assert_eq!(
            parse_distributions(
                &HostArray::double_column(&three),
                &HostArray::empty_double(),
                4
            ),
            Err(ValidationError::DistributionLengthMismatch)
        );
    }

    #[test]
    fn distributions_reject_int_storage() {
        let ints = [1i32; 4];
        assert_eq!(
            parse_distributions(
                &HostArray::column(HostData::Int32(&ints)),
                &HostArray::empty_double(),
                4
            ),
            Err(ValidationError::DistributionsNotRealVectors)
        );
    }

    // -- method -------------------------------------------------------------

    #[test]
    fn method_decodes_utf16() {
        let s: Vec<u16> = "power".encode_utf16().collect();
        assert_eq!(parse_method(&HostArray::row(HostData::Char(&s))).unwrap(), "power");
    }

    #[test]
    fn method_stops_at_nul() {
        let s: Vec<u16> = "gs\0junk".encode_utf16().collect();
        assert_eq!(parse_method(&HostArray::row(HostData::Char(&s))).unwrap(), "gs");
    }

    #[test]
    fn method_rejects_empty_and_non_char() {
        let empty: [u16; 0] = [];
        assert_eq!(
            parse_method(&shaped(&[0, 0], HostData::Char(&empty))),
            Err(ValidationError::MethodNotString)
        );
        let d = 1.0f64;
        assert_eq!(
            parse_method(&HostArray::double_scalar(&d)),
            Err(ValidationError::MethodNotString)
        );
    }

    #[test]
    fn method_rejects_unpaired_surrogate() {
        let bad = [0xD800u16];
        assert_eq!(
            parse_method(&HostArray::row(HostData::Char(&bad))),
            Err(ValidationError::MethodNotString)
        );
    }

    #[test]
    fn char_matrix_is_not_a_string() {
        let s: Vec<u16> = "abcd".encode_utf16().collect();
        assert_eq!(
            parse_method(&shaped(&[2, 2], HostData::Char(&s))),
            Err(ValidationError::MethodNotString)
        );
    }
}
