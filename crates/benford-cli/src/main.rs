mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::benford::{AnalyzeArgs, LeadDigitArgs, PdfArgs, SampleArgs};

/// Benford's Law leading-digit analysis in any base
#[derive(Parser)]
#[command(
    name = "benford",
    version,
    about = "Benford's Law leading-digit analysis in any base",
    long_about = "A CLI for testing datasets against Benford's Law in an arbitrary base. \
                  Supports leading-digit extraction, the ideal PDF/CDF, seeded sampling, \
                  and Chi-square, Cho-Gaines and Leemis goodness-of-fit statistics."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug detail to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Test a dataset's leading digits against Benford's Law
    Analyze(AnalyzeArgs),
    /// Leading significant digit of a single number
    LeadDigit(LeadDigitArgs),
    /// Ideal Benford PDF and CDF for a base
    Pdf(PdfArgs),
    /// Draw digits from the Benford distribution and score the draw
    Sample(SampleArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::benford::run_analyze(args),
        Commands::LeadDigit(args) => commands::benford::run_lead_digit(args),
        Commands::Pdf(args) => commands::benford::run_pdf(args),
        Commands::Sample(args) => commands::benford::run_sample(args),
        Commands::Version => {
            println!("benford {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
