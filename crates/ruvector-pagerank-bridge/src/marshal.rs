//! Result marshaling back to the host.

use crate::host::HostValue;
use crate::types::PageRankResult;

/// Turn an engine result into the host's `num_vs x 1` double column.
///
/// Position `i` of the column holds `result.x[i]`; nothing is scaled or
/// reordered. The result is consumed, so the score buffer moves into the
/// output and the diagnostics are dropped with it.
pub fn marshal_result(result: PageRankResult) -> HostValue {
    HostValue::double_column(result.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_shape_and_order() {
        let result = PageRankResult::from_scores(vec![0.4, 0.1, 0.3, 0.2], "power");
        let out = marshal_result(result);
        assert_eq!(out.dims(), &[4, 1]);
        assert_eq!(out.as_real().unwrap(), &[0.4, 0.1, 0.3, 0.2]);
    }

    #[test]
    fn values_pass_through_bit_for_bit() {
        let odd = vec![f64::MIN_POSITIVE, -0.0, 1e300, f64::NAN];
        let out = marshal_result(PageRankResult::from_scores(odd.clone(), "x"));
        let got = out.as_real().unwrap();
        for (a, b) in odd.iter().zip(got) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}
