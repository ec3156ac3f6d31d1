use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::Value;

use benford_core::analysis::{self, LeadingDigitInput};
use benford_core::{lead_digit, Benford, EmpiricalDistribution};

use crate::input;
use crate::input::stdin::StdinPayload;

/// Arguments for a leading-digit analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON file with `values`, `tokens`, `base`, `significance_level`
    #[arg(long)]
    pub input: Option<String>,

    /// Path to CSV file; every field is read as a number, others are skipped
    #[arg(long)]
    pub csv: Option<String>,

    /// Comma-separated observations (e.g. "1204.5,87,-33.1")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub values: Option<Vec<f64>>,

    /// Numeral base (overrides the input file)
    #[arg(long)]
    pub base: Option<u32>,

    /// Significance level for the conformity verdicts (overrides the input file)
    #[arg(long)]
    pub significance_level: Option<f64>,
}

/// Arguments for single-number digit extraction
#[derive(Args)]
pub struct LeadDigitArgs {
    /// The number to inspect
    #[arg(long, allow_hyphen_values = true)]
    pub value: f64,

    /// Numeral base
    #[arg(long, default_value = "10")]
    pub base: u32,
}

/// Arguments for printing the ideal distribution
#[derive(Args)]
pub struct PdfArgs {
    /// Numeral base
    #[arg(long, default_value = "10")]
    pub base: u32,
}

/// Arguments for sampling from the distribution
#[derive(Args)]
pub struct SampleArgs {
    /// Numeral base
    #[arg(long, default_value = "10")]
    pub base: u32,

    /// Number of digits to draw
    #[arg(long, default_value = "10000")]
    pub count: usize,

    /// Seed for a reproducible draw
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct LeadDigitOutput {
    value: f64,
    base: u32,
    lead_digit: u32,
}

#[derive(Debug, Serialize)]
struct PdfRow {
    digit: u32,
    pdf: f64,
    cdf: f64,
}

#[derive(Debug, Serialize)]
struct SampleOutput {
    base: u32,
    count: usize,
    seed: Option<u64>,
    frequencies: Vec<f64>,
    chi_square: f64,
    p_value: Option<f64>,
    cho_gaines: f64,
    leemis: f64,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut input_data: LeadingDigitInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(ref path) = args.csv {
        LeadingDigitInput {
            tokens: input::file::read_csv_tokens(path)?,
            ..Default::default()
        }
    } else if let Some(values) = args.values {
        LeadingDigitInput {
            values,
            ..Default::default()
        }
    } else {
        match input::stdin::read_stdin()? {
            Some(StdinPayload::Json(data)) => serde_json::from_value(data)?,
            Some(StdinPayload::Tokens(tokens)) => LeadingDigitInput {
                tokens,
                ..Default::default()
            },
            None => {
                return Err(
                    "--input <file.json>, --csv <file.csv>, --values or stdin required".into(),
                )
            }
        }
    };
    if let Some(base) = args.base {
        input_data.base = base;
    }
    if let Some(alpha) = args.significance_level {
        input_data.significance_level = alpha;
    }
    let result = analysis::analyze_leading_digits(&input_data)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_lead_digit(args: LeadDigitArgs) -> Result<Value, Box<dyn std::error::Error>> {
    Benford::new(args.base)?;
    if args.value == 0.0 || !args.value.is_finite() {
        return Err(format!("{} has no leading significant digit", args.value).into());
    }
    let output = LeadDigitOutput {
        value: args.value,
        base: args.base,
        lead_digit: lead_digit(args.value, args.base),
    };
    Ok(serde_json::to_value(output)?)
}

pub fn run_pdf(args: PdfArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let model = Benford::new(args.base)?;
    let rows: Vec<PdfRow> = model
        .domain()
        .into_iter()
        .zip(model.full_pdf())
        .zip(model.full_cdf())
        .map(|((digit, pdf), cdf)| PdfRow { digit, pdf, cdf })
        .collect();
    Ok(serde_json::to_value(rows)?)
}

pub fn run_sample(args: SampleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let model = Benford::new(args.base)?;
    if args.count == 0 {
        return Err("--count must be at least 1".into());
    }
    let mut rng = match args.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let digits = model.sample_n(&mut rng, args.count);
    let realized = EmpiricalDistribution::from_digits(&digits, args.base)?;
    let gof = model.goodness_of_fit(&realized);
    let output = SampleOutput {
        base: args.base,
        count: args.count,
        seed: args.seed,
        frequencies: realized.frequencies().to_vec(),
        chi_square: gof.chi_square,
        p_value: gof.p_value,
        cho_gaines: gof.cho_gaines,
        leemis: gof.leemis,
    };
    Ok(serde_json::to_value(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_digit_command() {
        let out = run_lead_digit(LeadDigitArgs {
            value: -0.0042,
            base: 10,
        })
        .unwrap();
        assert_eq!(out["lead_digit"], 4);
    }

    #[test]
    fn test_lead_digit_rejects_zero_and_bad_base() {
        assert!(run_lead_digit(LeadDigitArgs { value: 0.0, base: 10 }).is_err());
        assert!(run_lead_digit(LeadDigitArgs { value: 5.0, base: 2 }).is_err());
    }

    #[test]
    fn test_pdf_rows() {
        let out = run_pdf(PdfArgs { base: 4 }).unwrap();
        let rows = out.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["digit"], 1);
        assert!((rows[2]["cdf"].as_f64().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_seeded_sample_is_reproducible() {
        let args = || SampleArgs {
            base: 10,
            count: 2_000,
            seed: Some(7),
        };
        let a = run_sample(args()).unwrap();
        let b = run_sample(args()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a["frequencies"].as_array().unwrap().len(), 9);
    }

    #[test]
    fn test_sample_rejects_zero_count() {
        let args = SampleArgs {
            base: 10,
            count: 0,
            seed: None,
        };
        assert!(run_sample(args).is_err());
    }

    #[test]
    fn test_analyze_inline_values_with_overrides() {
        let args = AnalyzeArgs {
            input: None,
            csv: None,
            values: Some(vec![1.0, 17.0, 255.0, 4096.0, 0.0]),
            base: Some(16),
            significance_level: Some(0.01),
        };
        let out = run_analyze(args).unwrap();
        assert_eq!(out["result"]["base"], 16);
        assert_eq!(out["result"]["sample_count"], 4);
        assert_eq!(out["result"]["dropped"], 1);
    }
}
