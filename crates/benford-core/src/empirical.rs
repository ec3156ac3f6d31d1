//! Observed leading-digit distributions built from raw data.
//!
//! Zero, NaN and infinite values have no leading digit and are dropped
//! silently, as are text tokens that do not parse as a number. Only a batch
//! with nothing left after filtering is an error.

use serde::{Deserialize, Serialize};

use crate::digits::lead_digit;
use crate::distribution::Benford;
use crate::error::BenfordError;
use crate::types::{Digit, Probability};
use crate::BenfordResult;

/// Relative leading-digit frequencies observed in a batch of samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmpiricalDistribution {
    base: u32,
    counts: Vec<u64>,
    frequencies: Vec<Probability>,
    sample_count: usize,
    dropped: usize,
}

impl EmpiricalDistribution {
    /// Tallies digits that have already been extracted, e.g. sampled ones.
    ///
    /// Digits outside `1..base` are counted as dropped.
    pub fn from_digits(digits: &[Digit], base: u32) -> BenfordResult<Self> {
        let model = Benford::new(base)?;
        let mut counts = vec![0u64; model.domain_len()];
        let mut dropped = 0;
        for &d in digits {
            if d >= 1 && d < base {
                counts[(d - 1) as usize] += 1;
            } else {
                dropped += 1;
            }
        }
        Self::from_counts(base, counts, dropped)
    }

    fn from_counts(base: u32, counts: Vec<u64>, dropped: usize) -> BenfordResult<Self> {
        let sample_count: u64 = counts.iter().sum();
        if sample_count == 0 {
            return Err(BenfordError::NoValidSamples { dropped });
        }
        let n = sample_count as f64;
        let frequencies = counts.iter().map(|&c| c as f64 / n).collect();
        Ok(EmpiricalDistribution {
            base,
            counts,
            frequencies,
            sample_count: sample_count as usize,
            dropped,
        })
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    /// Relative frequency of digit `i + 1` at index `i`.
    pub fn frequencies(&self) -> &[Probability] {
        &self.frequencies
    }

    /// Raw tally of digit `i + 1` at index `i`.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Number of valid samples behind the frequencies.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Number of inputs filtered out before tallying.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Observed frequency of `digit`; zero outside the domain.
    pub fn frequency(&self, digit: Digit) -> Probability {
        if digit == 0 {
            return 0.0;
        }
        self.frequencies
            .get((digit - 1) as usize)
            .copied()
            .unwrap_or(0.0)
    }

    pub fn into_parts(self) -> (Vec<Probability>, usize) {
        (self.frequencies, self.sample_count)
    }
}

fn has_leading_digit(v: f64) -> bool {
    v != 0.0 && v.is_finite()
}

/// Builds the leading-digit distribution of `samples` in `base`.
pub fn build_distribution(samples: &[f64], base: u32) -> BenfordResult<EmpiricalDistribution> {
    tally(samples, base, 0)
}

/// Parses each token as a number and builds its distribution.
///
/// Tokens that fail to parse are dropped exactly like zeros and NaNs.
pub fn build_distribution_from_strings<S: AsRef<str>>(
    tokens: &[S],
    base: u32,
) -> BenfordResult<EmpiricalDistribution> {
    let (values, unparsed) = parse_tokens(tokens);
    tally(&values, base, unparsed)
}

/// Parsed values plus the number of tokens that were not numbers.
pub(crate) fn parse_tokens<S: AsRef<str>>(tokens: &[S]) -> (Vec<f64>, usize) {
    let values: Vec<f64> = tokens
        .iter()
        .filter_map(|t| t.as_ref().trim().parse::<f64>().ok())
        .collect();
    let unparsed = tokens.len() - values.len();
    if unparsed > 0 {
        tracing::debug!(unparsed, "dropped tokens that are not numbers");
    }
    (values, unparsed)
}

/// Tallies `samples`, counting `already_dropped` inputs towards `dropped`.
pub(crate) fn tally(
    samples: &[f64],
    base: u32,
    already_dropped: usize,
) -> BenfordResult<EmpiricalDistribution> {
    let model = Benford::new(base)?;
    let mut counts = vec![0u64; model.domain_len()];
    let mut dropped = 0;
    for &v in samples {
        if !has_leading_digit(v) {
            dropped += 1;
            continue;
        }
        counts[(lead_digit(v, base) - 1) as usize] += 1;
    }
    if dropped > 0 {
        tracing::debug!(
            base,
            dropped,
            total = samples.len(),
            "filtered samples without a leading digit"
        );
    }
    EmpiricalDistribution::from_counts(base, counts, dropped + already_dropped)
}
