//! The Benford first-digit distribution for an arbitrary base.
//!
//! For base `B` the probability that a leading digit equals `d` is
//! `log_B(1 + 1/d)` over the domain `1..B`. Digits outside the domain have
//! probability zero rather than being an error, so callers can sum or probe
//! freely.

use serde::Serialize;

use crate::error::BenfordError;
use crate::types::{Digit, Probability};
use crate::BenfordResult;

/// Smallest base with a non-trivial leading digit.
pub const MIN_BASE: u32 = 3;

/// A Benford's Law distribution over the leading digits of base `base`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Benford {
    base: u32,
}

impl Benford {
    /// Creates the distribution for `base`, which must be at least 3.
    pub fn new(base: u32) -> BenfordResult<Self> {
        if base < MIN_BASE {
            return Err(BenfordError::invalid_base(base));
        }
        Ok(Benford { base })
    }

    /// The familiar base-10 distribution.
    pub fn decimal() -> Self {
        Benford { base: 10 }
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    /// Number of possible leading digits, `base - 1`.
    pub fn domain_len(&self) -> usize {
        (self.base - 1) as usize
    }

    /// The distribution has a single parameter: the base.
    pub fn num_parameters(&self) -> usize {
        1
    }

    fn max_digit(&self) -> i64 {
        i64::from(self.base) - 1
    }

    /// Probability that the leading digit equals `digit`; zero outside `1..base`.
    pub fn prob(&self, digit: i64) -> Probability {
        if digit < 1 || digit > self.max_digit() {
            return 0.0;
        }
        (1.0 + 1.0 / digit as f64).ln() / f64::from(self.base).ln()
    }

    /// Natural log of [`prob`](Self::prob); negative infinity outside the domain.
    pub fn log_prob(&self, digit: i64) -> f64 {
        if digit < 1 || digit > self.max_digit() {
            return f64::NEG_INFINITY;
        }
        let p = self.prob(digit);
        if p == 0.0 {
            return f64::NEG_INFINITY;
        }
        p.ln()
    }

    /// Probability that the leading digit is at most `digit`.
    pub fn cdf(&self, digit: i64) -> Probability {
        if digit < 1 {
            return 0.0;
        }
        if digit >= self.max_digit() {
            return 1.0;
        }
        (1..=digit).map(|d| self.prob(d)).sum()
    }

    /// `prob(i + 1)` at index `i`, for every digit in the domain.
    pub fn full_pdf(&self) -> Vec<Probability> {
        (1..=self.max_digit()).map(|d| self.prob(d)).collect()
    }

    /// Running sum of [`full_pdf`](Self::full_pdf).
    pub fn full_cdf(&self) -> Vec<Probability> {
        self.full_pdf()
            .into_iter()
            .scan(0.0, |total, p| {
                *total += p;
                Some(*total)
            })
            .collect()
    }

    /// Every digit with non-zero probability, in increasing order.
    pub fn domain(&self) -> Vec<Digit> {
        (1..self.base).collect()
    }

    /// The first digit whose cumulative probability exceeds `p`.
    ///
    /// Falls back to the largest digit when rounding leaves the final
    /// cumulative value fractionally below `p`.
    pub fn inverse_cdf(&self, p: f64) -> Digit {
        self.full_cdf()
            .into_iter()
            .zip(self.domain())
            .find(|(c, _)| p < *c)
            .map(|(_, d)| d)
            .unwrap_or(self.base - 1)
    }
}

#[cfg(feature = "significance")]
mod statrs_impls {
    use statrs::distribution::Discrete;
    use statrs::statistics::{Max, Min};

    use super::Benford;
    use crate::types::Digit;

    impl Discrete<i64, f64> for Benford {
        fn pmf(&self, x: i64) -> f64 {
            self.prob(x)
        }

        fn ln_pmf(&self, x: i64) -> f64 {
            self.log_prob(x)
        }
    }

    impl Min<Digit> for Benford {
        fn min(&self) -> Digit {
            1
        }
    }

    impl Max<Digit> for Benford {
        fn max(&self) -> Digit {
            self.base - 1
        }
    }
}
