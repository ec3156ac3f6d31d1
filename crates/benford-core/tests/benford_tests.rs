use benford_core::goodness_of_fit::{cho_gaines_critical_value, leemis_critical_value};
use benford_core::{
    build_distribution, build_distribution_from_strings, lead_digit, Benford, BenfordError,
    Significance,
};
use pretty_assertions::assert_eq;

#[cfg(feature = "sampling")]
use benford_core::EmpiricalDistribution;
#[cfg(feature = "sampling")]
use rand::{rngs::StdRng, SeedableRng};

#[cfg(feature = "sampling")]
const SEED: u64 = 1_234;

// ===========================================================================
// Sampling round trip
// ===========================================================================

#[cfg(feature = "sampling")]
#[test]
fn test_sampled_digits_fit_ideal_pdf() {
    const SAMPLES: usize = 1_000_000;
    let mut rng = StdRng::seed_from_u64(SEED);

    for base in [4, 8, 10, 16, 32] {
        let model = Benford::new(base).unwrap();
        let digits = model.sample_n(&mut rng, SAMPLES);
        let realized = EmpiricalDistribution::from_digits(&digits, base).unwrap();
        assert_eq!(realized.sample_count(), SAMPLES);
        assert_eq!(realized.dropped(), 0);

        let chi = model.chi_square_stat(realized.frequencies());
        assert!(chi < 0.01, "chi-square looks invalid for base {base}: {chi}");

        if base == 10 {
            // Calibration thresholds for base 10 only.
            let cg = model.cho_gaines_stat(SAMPLES, realized.frequencies());
            assert!(cg < 2.0, "Cho-Gaines looks invalid: {cg}");
            let lm = model.leemis_stat(SAMPLES, realized.frequencies());
            assert!(lm < 1.5, "Leemis looks invalid: {lm}");
        }
    }
}

#[cfg(all(feature = "sampling", feature = "significance"))]
#[test]
fn test_sampled_digits_not_rejected() {
    let model = Benford::decimal();
    let mut rng = StdRng::seed_from_u64(SEED);
    let digits = model.sample_n(&mut rng, 50_000);
    let realized = EmpiricalDistribution::from_digits(&digits, 10).unwrap();
    let gof = model.goodness_of_fit(&realized);
    let p = gof.p_value.unwrap();
    assert!(p > 0.001, "p-value {p}");
    assert!(gof.cho_gaines < cho_gaines_critical_value(10, Significance::OnePercent).unwrap());
    assert!(gof.leemis < leemis_critical_value(10, Significance::OnePercent).unwrap());
}

// ===========================================================================
// Data pipeline: raw values -> digits -> distribution -> statistics
// ===========================================================================

#[test]
fn test_geometric_sequence_is_benford() {
    // Powers of a number whose log is irrational are Benford distributed.
    let values: Vec<f64> = (0..1_000).map(|k| 1.07f64.powi(k)).collect();
    let observed = build_distribution(&values, 10).unwrap();
    let model = Benford::decimal();
    let chi = model.chi_square_stat(observed.frequencies());
    assert!(chi < 0.01, "chi-square {chi}");
}

#[test]
fn test_perfect_distribution_scores_zero() {
    let model = Benford::new(10).unwrap();
    let ideal = model.full_pdf();
    assert_eq!(model.cho_gaines_stat(12_345, &ideal), 0.0);
    assert_eq!(model.leemis_stat(12_345, &ideal), 0.0);
}

#[test]
fn test_uniform_digits_far_from_benford() {
    let values: Vec<f64> = (1..=9).flat_map(|d| vec![f64::from(d); 1_000]).collect();
    let observed = build_distribution(&values, 10).unwrap();
    let model = Benford::decimal();
    let cg = model.cho_gaines_stat(observed.sample_count(), observed.frequencies());
    let lm = model.leemis_stat(observed.sample_count(), observed.frequencies());
    assert!(cg > cho_gaines_critical_value(10, Significance::OnePercent).unwrap());
    assert!(lm > leemis_critical_value(10, Significance::OnePercent).unwrap());
}

#[test]
fn test_text_pipeline_matches_numeric() {
    let values = [12.5, 3.0, 0.044, 910.0, 1.0e6, -27.0];
    let tokens: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    let from_values = build_distribution(&values, 10).unwrap();
    let from_tokens = build_distribution_from_strings(&tokens, 10).unwrap();
    assert_eq!(from_values, from_tokens);
}

#[test]
fn test_no_valid_samples_reported() {
    let err = build_distribution(&[0.0, f64::NAN], 10).unwrap_err();
    assert!(matches!(err, BenfordError::NoValidSamples { dropped: 2 }));
    assert!(err.to_string().contains("No valid samples"));
}

#[test]
fn test_lead_digit_examples() {
    assert_eq!(lead_digit(999.0, 10), 9);
    assert_eq!(lead_digit(0.002, 10), 2);
    assert_eq!(lead_digit(-321.0, 10), 3);
    assert_eq!(lead_digit(16.0, 16), 1);
    assert_eq!(lead_digit(3.0 * 16.0, 16), 3);
}

#[test]
#[should_panic(expected = "length mismatch")]
fn test_mismatched_base_panics() {
    let observed = build_distribution(&[1.0, 2.0, 3.0], 8).unwrap();
    Benford::decimal().leemis_stat(observed.sample_count(), observed.frequencies());
}
