//! Goodness-of-fit statistics comparing observed leading-digit frequencies
//! with the ideal Benford PDF.
//!
//! Every statistic takes two distributions of identical length. Passing
//! distributions of different lengths is a programming error and panics.
//!
//! Published critical values for Cho-Gaines (d*) and Leemis (m*) exist only
//! for base 10. For other bases the lookup functions return `None`; the
//! base-10 thresholds do not carry over.

use serde::{Deserialize, Serialize};

use crate::distribution::Benford;
use crate::empirical::EmpiricalDistribution;
use crate::types::Probability;

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

fn assert_same_len(realized: &[Probability], ideal: &[Probability]) {
    assert_eq!(
        realized.len(),
        ideal.len(),
        "length mismatch: realized distribution has {} bins, ideal has {}",
        realized.len(),
        ideal.len()
    );
}

/// Pearson chi-square divergence of `realized` from `ideal`.
///
/// Bins with no ideal mass are skipped.
///
/// # Panics
///
/// Panics if the two slices differ in length.
pub fn chi_square(realized: &[Probability], ideal: &[Probability]) -> f64 {
    assert_same_len(realized, ideal);
    realized
        .iter()
        .zip(ideal)
        .filter(|(_, e)| **e > 0.0)
        .map(|(&r, &e)| (r - e).powi(2) / e)
        .sum()
}

/// Cho-Gaines distance: `sqrt(n * sum((r - e)^2))`.
///
/// # Panics
///
/// Panics if the two slices differ in length.
pub fn cho_gaines(n_samples: usize, realized: &[Probability], ideal: &[Probability]) -> f64 {
    assert_same_len(realized, ideal);
    let total: f64 = realized
        .iter()
        .zip(ideal)
        .map(|(&r, &e)| (r - e).powi(2))
        .sum();
    (n_samples as f64 * total).sqrt()
}

/// Leemis statistic: `sqrt(n) * max|r - e|`.
///
/// # Panics
///
/// Panics if the two slices differ in length.
pub fn leemis(n_samples: usize, realized: &[Probability], ideal: &[Probability]) -> f64 {
    assert_same_len(realized, ideal);
    let max_diff = realized
        .iter()
        .zip(ideal)
        .map(|(&r, &e)| (r - e).abs())
        .fold(0.0, f64::max);
    (n_samples as f64).sqrt() * max_diff
}

/// Upper-tail probability of a chi-square statistic built from counts.
#[cfg(feature = "significance")]
pub fn chi_square_p_value(count_statistic: f64, degrees_of_freedom: u32) -> f64 {
    use statrs::distribution::{ChiSquared, ContinuousCDF};

    match ChiSquared::new(f64::from(degrees_of_freedom)) {
        Ok(dist) => dist.sf(count_statistic),
        Err(_) => f64::NAN,
    }
}

// ---------------------------------------------------------------------------
// Model convenience methods
// ---------------------------------------------------------------------------

/// All statistics for one observed distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoodnessOfFit {
    pub base: u32,
    pub sample_count: usize,
    /// Frequency-form Pearson divergence.
    pub chi_square: f64,
    pub degrees_of_freedom: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p_value: Option<f64>,
    pub cho_gaines: f64,
    pub leemis: f64,
}

impl Benford {
    /// Pearson chi-square divergence of `realized` from this model.
    ///
    /// # Panics
    ///
    /// Panics unless `realized` has `base - 1` bins.
    pub fn chi_square_stat(&self, realized: &[Probability]) -> f64 {
        chi_square(realized, &self.full_pdf())
    }

    /// # Panics
    ///
    /// Panics unless `realized` has `base - 1` bins.
    pub fn cho_gaines_stat(&self, n_samples: usize, realized: &[Probability]) -> f64 {
        cho_gaines(n_samples, realized, &self.full_pdf())
    }

    /// # Panics
    ///
    /// Panics unless `realized` has `base - 1` bins.
    pub fn leemis_stat(&self, n_samples: usize, realized: &[Probability]) -> f64 {
        leemis(n_samples, realized, &self.full_pdf())
    }

    /// Degrees of freedom of the chi-square test, one less than the bins.
    pub fn degrees_of_freedom(&self) -> u32 {
        self.base() - 2
    }

    /// P-value of `n_samples` observations with frequencies `realized`.
    ///
    /// The frequency divergence is scaled by `n_samples` to the usual
    /// count-based Pearson statistic before the chi-square tail is taken.
    ///
    /// # Panics
    ///
    /// Panics unless `realized` has `base - 1` bins.
    #[cfg(feature = "significance")]
    pub fn chi_square_p_value(&self, n_samples: usize, realized: &[Probability]) -> f64 {
        assert_eq!(
            realized.len(),
            self.domain_len(),
            "distribution has unexpected length for base {}",
            self.base()
        );
        let stat = n_samples as f64 * self.chi_square_stat(realized);
        chi_square_p_value(stat, self.degrees_of_freedom())
    }

    /// Every statistic for `observed` against this model.
    ///
    /// # Panics
    ///
    /// Panics if `observed` was built for a different base.
    pub fn goodness_of_fit(&self, observed: &EmpiricalDistribution) -> GoodnessOfFit {
        let ideal = self.full_pdf();
        let realized = observed.frequencies();
        let n = observed.sample_count();

        #[cfg(feature = "significance")]
        let p_value = Some(self.chi_square_p_value(n, realized));
        #[cfg(not(feature = "significance"))]
        let p_value = None;

        GoodnessOfFit {
            base: self.base(),
            sample_count: n,
            chi_square: chi_square(realized, &ideal),
            degrees_of_freedom: self.degrees_of_freedom(),
            p_value,
            cho_gaines: cho_gaines(n, realized, &ideal),
            leemis: leemis(n, realized, &ideal),
        }
    }
}

// ---------------------------------------------------------------------------
// Critical values (base 10 only)
// ---------------------------------------------------------------------------

/// Significance levels with published Benford critical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    TenPercent,
    FivePercent,
    OnePercent,
}

impl Significance {
    /// The tabulated level at least as strict as `alpha`.
    pub fn from_alpha(alpha: f64) -> Self {
        if alpha <= 0.01 {
            Significance::OnePercent
        } else if alpha <= 0.05 {
            Significance::FivePercent
        } else {
            Significance::TenPercent
        }
    }

    pub fn alpha(self) -> f64 {
        match self {
            Significance::TenPercent => 0.10,
            Significance::FivePercent => 0.05,
            Significance::OnePercent => 0.01,
        }
    }
}

/// Cho-Gaines d* critical value, known only for base 10.
pub fn cho_gaines_critical_value(base: u32, level: Significance) -> Option<f64> {
    if base != 10 {
        return None;
    }
    Some(match level {
        Significance::TenPercent => 1.212,
        Significance::FivePercent => 1.330,
        Significance::OnePercent => 1.569,
    })
}

/// Leemis m* critical value, known only for base 10.
pub fn leemis_critical_value(base: u32, level: Significance) -> Option<f64> {
    if base != 10 {
        return None;
    }
    Some(match level {
        Significance::TenPercent => 0.851,
        Significance::FivePercent => 0.967,
        Significance::OnePercent => 1.212,
    })
}
