//! Compensated (Kahan) summation.
//!
//! A running sum that carries the rounding error of each addition into the
//! next one. The error of the final sum stays bounded independently of the
//! number of terms, where a plain `+=` loop drifts linearly. Engines use it
//! for residual norms and probability-mass totals accumulated over many
//! small increments.
//!
//! Non-finite inputs are not detected; the caller owns that check.

/// Running sum with an explicit carry term.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompensatedSum {
    sum: f64,
    carry: f64,
}

impl CompensatedSum {
    /// Empty accumulator.
    #[inline]
    pub const fn new() -> Self {
        Self {
            sum: 0.0,
            carry: 0.0,
        }
    }

    /// Accumulator starting from `sum` with no carry.
    #[inline]
    pub const fn with_initial(sum: f64) -> Self {
        Self { sum, carry: 0.0 }
    }

    /// Add `value`.
    ///
    /// The operation order is load-bearing; do not let it be reassociated.
    #[inline(always)]
    pub fn accumulate(&mut self, value: f64) {
        let y = value - self.carry;
        let t = self.sum + y;
        self.carry = t - self.sum - y;
        self.sum = t;
    }

    /// Best available approximation of the total.
    #[inline(always)]
    pub fn value(&self) -> f64 {
        self.sum
    }

    /// Residual error to be subtracted from the next addend.
    #[inline]
    pub fn carry(&self) -> f64 {
        self.carry
    }

    /// Reset to zero.
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Extend<f64> for CompensatedSum {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for v in iter {
            self.accumulate(v);
        }
    }
}

impl FromIterator<f64> for CompensatedSum {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}

/// Compensated sum of `values`.
#[inline]
pub fn compensated_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    values.into_iter().collect::<CompensatedSum>().value()
}
