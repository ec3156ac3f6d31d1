//! End-to-end leading-digit test of a dataset against Benford's Law.
//!
//! Builds the observed distribution, evaluates every goodness-of-fit
//! statistic and reports per-digit deviations. Cho-Gaines and Leemis
//! conformity is only judged for base 10, the one base with published
//! critical values.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::distribution::Benford;
use crate::empirical::{parse_tokens, tally};
use crate::error::BenfordError;
use crate::goodness_of_fit::{
    cho_gaines_critical_value, leemis_critical_value, Significance,
};
use crate::types::{with_metadata, ComputationOutput, Digit};
use crate::BenfordResult;

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

/// Input for a leading-digit analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadingDigitInput {
    #[serde(default = "default_base")]
    pub base: u32,
    /// Numeric observations.
    #[serde(default)]
    pub values: Vec<f64>,
    /// Raw text observations, parsed as numbers; unparseable ones are dropped.
    #[serde(default)]
    pub tokens: Vec<String>,
    #[serde(default = "default_significance_level")]
    pub significance_level: f64,
}

impl Default for LeadingDigitInput {
    fn default() -> Self {
        LeadingDigitInput {
            base: default_base(),
            values: Vec::new(),
            tokens: Vec::new(),
            significance_level: default_significance_level(),
        }
    }
}

fn default_base() -> u32 {
    10
}

fn default_significance_level() -> f64 {
    0.05
}

/// Frequency result for a single digit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigitFrequency {
    pub digit: Digit,
    pub observed_count: u64,
    pub observed_pct: f64,
    pub expected_pct: f64,
    pub deviation: f64,
}

/// Output of a leading-digit analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadingDigitOutput {
    pub base: u32,
    pub sample_count: usize,
    pub dropped: usize,
    pub digit_frequencies: Vec<DigitFrequency>,
    /// Divergence of the relative frequencies.
    pub chi_square: f64,
    /// Count-based Pearson statistic, `sample_count * chi_square`.
    pub chi_square_count: f64,
    pub degrees_of_freedom: u32,
    pub p_value: f64,
    pub conforms: bool,
    pub cho_gaines: f64,
    pub cho_gaines_critical: Option<f64>,
    pub cho_gaines_conforms: Option<bool>,
    pub leemis: f64,
    pub leemis_critical: Option<f64>,
    pub leemis_conforms: Option<bool>,
    pub max_deviation_digit: Digit,
    pub max_deviation: f64,
    pub mean_absolute_deviation: f64,
    pub suspect_digits: Vec<Digit>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Test whether the leading digits of a dataset follow Benford's Law.
pub fn analyze_leading_digits(
    input: &LeadingDigitInput,
) -> BenfordResult<ComputationOutput<LeadingDigitOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.values.is_empty() && input.tokens.is_empty() {
        return Err(BenfordError::InsufficientData(
            "At least one value or token is required.".into(),
        ));
    }
    if !(input.significance_level > 0.0 && input.significance_level < 1.0) {
        return Err(BenfordError::InvalidInput {
            field: "significance_level".into(),
            reason: "Must be between 0 and 1 exclusive.".into(),
        });
    }

    let model = Benford::new(input.base)?;
    let (mut samples, unparsed) = parse_tokens(&input.tokens);
    samples.extend_from_slice(&input.values);
    let observed = tally(&samples, input.base, unparsed)?;
    let gof = model.goodness_of_fit(&observed);

    if observed.dropped() > 0 {
        warnings.push(format!(
            "{} of {} observations had no leading digit and were excluded",
            observed.dropped(),
            observed.dropped() + observed.sample_count()
        ));
    }

    let n = observed.sample_count() as f64;
    let hundred = 100.0;
    let mut frequencies = Vec::with_capacity(model.domain_len());
    let (mut max_dev, mut total_abs_dev) = (0.0_f64, 0.0_f64);
    let mut max_dev_digit = 1;
    let mut suspect_digits = Vec::new();

    for (i, (&p, &count)) in model
        .full_pdf()
        .iter()
        .zip(observed.counts())
        .enumerate()
    {
        let digit = i as Digit + 1;
        let observed_pct = observed.frequencies()[i] * hundred;
        let expected_pct = p * hundred;
        let deviation = observed_pct - expected_pct;
        let std_err = (p * (1.0 - p) / n).sqrt() * hundred;
        if std_err > 0.0 && deviation.abs() > 2.0 * std_err {
            suspect_digits.push(digit);
        }
        if deviation.abs() > max_dev {
            max_dev = deviation.abs();
            max_dev_digit = digit;
        }
        total_abs_dev += deviation.abs();
        frequencies.push(DigitFrequency {
            digit,
            observed_count: count,
            observed_pct,
            expected_pct,
            deviation,
        });
    }

    let level = Significance::from_alpha(input.significance_level);
    let cho_gaines_critical = cho_gaines_critical_value(input.base, level);
    let leemis_critical = leemis_critical_value(input.base, level);
    if cho_gaines_critical.is_none() {
        tracing::warn!(
            base = input.base,
            "no published Cho-Gaines/Leemis critical values for this base"
        );
        warnings.push(format!(
            "Cho-Gaines and Leemis critical values are only published for base 10; \
             no conformity verdict for base {}",
            input.base
        ));
    }

    let p_value = gof.p_value.unwrap_or(f64::NAN);
    let output = LeadingDigitOutput {
        base: input.base,
        sample_count: observed.sample_count(),
        dropped: observed.dropped(),
        digit_frequencies: frequencies,
        chi_square: gof.chi_square,
        chi_square_count: n * gof.chi_square,
        degrees_of_freedom: gof.degrees_of_freedom,
        p_value,
        conforms: p_value >= input.significance_level,
        cho_gaines: gof.cho_gaines,
        cho_gaines_critical,
        cho_gaines_conforms: cho_gaines_critical.map(|c| gof.cho_gaines < c),
        leemis: gof.leemis,
        leemis_critical,
        leemis_conforms: leemis_critical.map(|c| gof.leemis < c),
        max_deviation_digit: max_dev_digit,
        max_deviation: max_dev,
        mean_absolute_deviation: total_abs_dev / model.domain_len() as f64,
        suspect_digits,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Benford's Law leading-digit test (Pearson chi-square, Cho-Gaines, Leemis)",
        &serde_json::json!({
            "base": input.base,
            "significance_level": input.significance_level,
            "observations": input.values.len() + input.tokens.len(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    fn benford_data() -> Vec<f64> {
        let mut data = Vec::new();
        let mut v = 2.0;
        for _ in 0..60 {
            data.push(v);
            v *= 2.0;
        }
        v = 3.0;
        for _ in 0..38 {
            data.push(v);
            v *= 3.0;
        }
        let (mut a, mut b) = (1.0, 1.0);
        for _ in 0..60 {
            data.push(a);
            let c = a + b;
            a = b;
            b = c;
        }
        for i in 1..=50 {
            data.push(f64::from(i) * 137.0);
        }
        data
    }

    fn uniform_data() -> Vec<f64> {
        (1..=9)
            .flat_map(|d| std::iter::repeat(f64::from(d) * 100.0).take(50))
            .collect()
    }

    fn input(values: Vec<f64>) -> LeadingDigitInput {
        LeadingDigitInput {
            base: 10,
            values,
            tokens: Vec::new(),
            significance_level: 0.05,
        }
    }

    #[test]
    fn test_benford_data_conforms() {
        let out = analyze_leading_digits(&input(benford_data())).unwrap().result;
        assert!(out.conforms, "chi2={} p={}", out.chi_square_count, out.p_value);
        assert_eq!(out.degrees_of_freedom, 8);
        assert_eq!(out.digit_frequencies.len(), 9);
    }

    #[test]
    fn test_uniform_does_not_conform() {
        let out = analyze_leading_digits(&input(uniform_data())).unwrap().result;
        assert!(!out.conforms);
        assert_eq!(out.cho_gaines_conforms, Some(false));
        assert_eq!(out.leemis_conforms, Some(false));
        assert_eq!(out.max_deviation_digit, 1);
        assert!(out.mean_absolute_deviation > 0.0);
        assert!(!out.suspect_digits.is_empty());
    }

    #[test]
    fn test_count_statistic_scales_frequency_form() {
        let out = analyze_leading_digits(&input(uniform_data())).unwrap().result;
        assert!(approx_eq(out.chi_square_count, 450.0 * out.chi_square, 1e-9));
    }

    #[test]
    fn test_counts_sum_to_sample_count() {
        let data = benford_data();
        let out = analyze_leading_digits(&input(data.clone())).unwrap().result;
        let total: u64 = out.digit_frequencies.iter().map(|f| f.observed_count).sum();
        assert_eq!(total as usize, data.len());
        assert_eq!(out.sample_count, data.len());
    }

    #[test]
    fn test_tokens_and_values_combined() {
        let inp = LeadingDigitInput {
            base: 10,
            values: vec![123.0, 0.0],
            tokens: vec!["456".into(), "n/a".into(), "7.8".into()],
            significance_level: 0.05,
        };
        let output = analyze_leading_digits(&inp).unwrap();
        assert_eq!(output.result.sample_count, 3);
        assert_eq!(output.result.dropped, 2);
        assert_eq!(output.warnings.len(), 1);
    }

    #[test]
    fn test_non_decimal_base_has_no_critical_values() {
        let mut inp = input(benford_data());
        inp.base = 16;
        let output = analyze_leading_digits(&inp).unwrap();
        assert_eq!(output.result.digit_frequencies.len(), 15);
        assert_eq!(output.result.cho_gaines_critical, None);
        assert_eq!(output.result.leemis_conforms, None);
        assert!(output.warnings.iter().any(|w| w.contains("base 16")));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            analyze_leading_digits(&input(vec![])),
            Err(BenfordError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_all_zero_input() {
        assert!(matches!(
            analyze_leading_digits(&input(vec![0.0, 0.0])),
            Err(BenfordError::NoValidSamples { dropped: 2 })
        ));
    }

    #[test]
    fn test_alpha_bounds() {
        for alpha in [0.0, 1.0, -0.5, f64::NAN] {
            let mut inp = input(vec![100.0]);
            inp.significance_level = alpha;
            assert!(analyze_leading_digits(&inp).is_err(), "alpha {alpha}");
        }
    }

    #[test]
    fn test_bad_base() {
        let mut inp = input(vec![100.0]);
        inp.base = 2;
        assert!(matches!(
            analyze_leading_digits(&inp),
            Err(BenfordError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_single_point() {
        let out = analyze_leading_digits(&input(vec![123.0])).unwrap().result;
        assert_eq!(out.digit_frequencies[0].observed_count, 1);
        assert_eq!(out.digit_frequencies[0].digit, 1);
    }

    #[test]
    fn test_input_defaults_from_json() {
        let inp: LeadingDigitInput = serde_json::from_str(r#"{"values": [1.5, 22]}"#).unwrap();
        assert_eq!(inp.base, 10);
        assert_eq!(inp.significance_level, 0.05);
        assert!(inp.tokens.is_empty());
    }

    #[test]
    fn test_serde() {
        let out = analyze_leading_digits(&input(benford_data())).unwrap();
        let j = serde_json::to_string(&out).unwrap();
        let back: ComputationOutput<LeadingDigitOutput> = serde_json::from_str(&j).unwrap();
        assert_eq!(back.metadata.precision, "ieee754_f64");
        assert_eq!(back.result.sample_count, out.result.sample_count);
    }
}
