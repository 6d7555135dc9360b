//! CLI entry point for the exploratory data analysis pipeline.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use eda_processing::{AnalysisOutcome, OutlierMethod, Pipeline};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

/// CLI-compatible outlier method enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutlierMethod {
    /// Flag values outside the Tukey IQR fences
    Iqr,
    /// Flag values by absolute z-score
    Zscore,
}

impl From<CliOutlierMethod> for OutlierMethod {
    fn from(cli: CliOutlierMethod) -> Self {
        match cli {
            CliOutlierMethod::Iqr => OutlierMethod::Iqr,
            CliOutlierMethod::Zscore => OutlierMethod::ZScore,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Data Cleaning and Exploratory Analysis Pipeline",
    long_about = "Cleans a CSV dataset and produces an exploratory analysis.\n\n\
                  EXAMPLES:\n  \
                  # Basic usage with IQR outlier detection\n  \
                  eda-processing -i data.csv\n\n  \
                  # Z-score detection with a custom threshold\n  \
                  eda-processing -i data.csv --method zscore --zscore-threshold 2.5\n\n  \
                  # Machine-readable output\n  \
                  eda-processing -i data.csv --json | jq .outlier_summary"
)]
struct Args {
    /// Path to the CSV file to analyze
    #[arg(short, long)]
    input: String,

    /// Output directory for the cleaned dataset and report
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Outlier detection method
    #[arg(long, value_enum, default_value = "iqr")]
    method: CliOutlierMethod,

    /// Multiplier for the IQR fences
    #[arg(long, default_value = "1.5")]
    iqr_multiplier: f64,

    /// Absolute z-score above which a value is flagged
    #[arg(long, default_value = "3.0")]
    zscore_threshold: f64,

    /// Number of histogram bins per numeric column
    #[arg(long, default_value = "30")]
    bins: usize,

    /// Output the JSON report to stdout instead of a human-readable summary
    ///
    /// Disables all progress logs; only outputs the final JSON report.
    #[arg(long)]
    json: bool,

    /// Write the cleaned dataset as CSV to the output directory
    #[arg(long)]
    emit_cleaned: bool,

    /// Write the JSON report to the output directory as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    if (args.emit_cleaned || args.emit_report) && !Path::new(&args.output).exists() {
        std::fs::create_dir_all(&args.output)?;
        info!("Created output directory: {}", args.output);
    }

    info!("Loading dataset from: {}", args.input);
    let data = load_csv(&args.input)?;
    info!("Dataset loaded successfully: {:?}", data.shape());

    let pipeline = Pipeline::builder()
        .outlier_method(args.method.into())
        .iqr_multiplier(args.iqr_multiplier)
        .zscore_threshold(args.zscore_threshold)
        .histogram_bins(args.bins)
        .build()?;

    let outcome = pipeline
        .analyze(&data)
        .map_err(|e| anyhow!("Analysis failed: {}", e))?;

    handle_output(outcome, &args)
}

/// Load CSV with quote handling and schema inference over the first rows.
fn load_csv(path: &str) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
        .map_err(|e| anyhow!("Failed to read '{}': {}", path, e))
}

/// Handle pipeline output based on CLI flags.
///
/// Output behavior:
/// - Default: Print human-readable summary to stdout
/// - `--json`: Print the JSON report to stdout only (no logs)
/// - `--emit-cleaned` / `--emit-report`: Write files to the output directory
fn handle_output(mut outcome: AnalysisOutcome, args: &Args) -> Result<()> {
    if args.emit_cleaned {
        let input_stem = extract_file_stem(&args.input);
        let cleaned_path = format!("{}/{}_cleaned.csv", args.output, input_stem);
        let mut file = std::fs::File::create(&cleaned_path)?;
        CsvWriter::new(&mut file).finish(&mut outcome.cleaned)?;
        info!("Cleaned dataset written to: {}", cleaned_path);
    }

    if args.emit_report {
        let input_stem = extract_file_stem(&args.input);
        let report_path = format!("{}/{}_report.json", args.output, input_stem);
        let json = serde_json::to_string_pretty(&outcome.report)?;
        std::fs::write(&report_path, json)?;
        info!("Report written to: {}", report_path);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.report)?);
        return Ok(());
    }

    print_human_readable_summary(&outcome);
    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Print a human-readable summary of the analysis results.
///
/// This is the default output when `--json` is not specified. Uses
/// `println!` intentionally: this output should always be visible
/// regardless of log level settings.
fn print_human_readable_summary(outcome: &AnalysisOutcome) {
    let summary = &outcome.summary;
    let report = &outcome.report;

    println!();
    println!("{}", "=".repeat(80));
    println!("ANALYSIS COMPLETE");
    println!("{}", "=".repeat(80));
    println!();

    println!(
        "Rows: {} -> {} ({} duplicates removed, {:.1}%)",
        summary.rows_before,
        summary.rows_after,
        summary.duplicates_removed,
        summary.duplicates_removed_percentage()
    );
    println!("Columns: {}", report.shape.1);
    println!("Values imputed: {}", summary.total_imputed());
    println!();

    if !summary.renamed_columns.is_empty() {
        println!("Renamed Columns:");
        for (original, canonical) in &summary.renamed_columns {
            println!("  {} -> {}", original, canonical);
        }
        println!();
    }

    if !report.descriptive_stats.is_empty() {
        println!("Numeric Columns:");
        println!(
            "{:<20} {:>10} {:>10} {:>10} {:>10}",
            "Column", "Mean", "Std", "Min", "Max"
        );
        println!("{}", "-".repeat(64));
        for (name, stats) in &report.descriptive_stats {
            println!(
                "{:<20} {:>10} {:>10} {:>10} {:>10}",
                truncate_str(name, 19),
                fmt_stat(stats.mean),
                fmt_stat(stats.std),
                fmt_stat(stats.min),
                fmt_stat(stats.max)
            );
        }
        println!();
    }

    let flagged: usize = report.outlier_summary.values().map(|s| s.count).sum();
    if flagged > 0 {
        println!("Outliers:");
        for (name, outlier) in &report.outlier_summary {
            if outlier.count > 0 {
                println!(
                    "  {}: {} flagged ({:.1}%)",
                    name, outlier.count, outlier.percentage
                );
            }
        }
    } else {
        println!("Outliers: none flagged");
    }
    println!();

    println!("Use --json for machine-readable output");
    println!("Use --emit-report to save the JSON report");
    println!("{}", "=".repeat(80));
}

/// Format an optional statistic for display.
fn fmt_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

/// Truncate a string to max length (in characters) with ellipsis.
///
/// Counts characters rather than bytes so multibyte column names never
/// split inside a character.
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}
