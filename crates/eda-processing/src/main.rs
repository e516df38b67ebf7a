//! CLI entry point for missing-value analysis and imputation.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use eda_processing::{
    Delimiter, Encoding, ImputationStrategy, LoadOptions, Preview, ProcessedFrame, Report,
    Session, SessionReport, correlation_matrix, describe, preview, write_csv,
};
use std::path::Path;
use tracing::info;

/// CLI-compatible file encoding enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliEncoding {
    #[value(name = "utf-8")]
    Utf8,
    #[value(name = "iso-8859-1")]
    Iso8859_1,
    #[value(name = "us-ascii")]
    UsAscii,
}

impl From<CliEncoding> for Encoding {
    fn from(cli: CliEncoding) -> Self {
        match cli {
            CliEncoding::Utf8 => Encoding::Utf8,
            CliEncoding::Iso8859_1 => Encoding::Iso8859_1,
            CliEncoding::UsAscii => Encoding::UsAscii,
        }
    }
}

/// CLI-compatible field delimiter enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliDelimiter {
    Comma,
    Semicolon,
    Period,
    /// A single space
    Space,
    Pipe,
}

impl From<CliDelimiter> for Delimiter {
    fn from(cli: CliDelimiter) -> Self {
        match cli {
            CliDelimiter::Comma => Delimiter::Comma,
            CliDelimiter::Semicolon => Delimiter::Semicolon,
            CliDelimiter::Period => Delimiter::Period,
            CliDelimiter::Space => Delimiter::Space,
            CliDelimiter::Pipe => Delimiter::Pipe,
        }
    }
}

/// CLI-compatible imputation strategy enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliStrategy {
    /// Use the mean of non-null values (numeric columns only)
    Mean,
    /// Use the median of non-null values (numeric columns only)
    Median,
    /// Use the most frequent value
    Mode,
    /// Drop rows with missing values in the selected columns
    DropRows,
}

impl From<CliStrategy> for ImputationStrategy {
    fn from(cli: CliStrategy) -> Self {
        match cli {
            CliStrategy::Mean => ImputationStrategy::Mean,
            CliStrategy::Median => ImputationStrategy::Median,
            CliStrategy::Mode => ImputationStrategy::Mode,
            CliStrategy::DropRows => ImputationStrategy::DropRows,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Missing-value analysis and imputation for CSV datasets",
    long_about = "Reports missing values per column, fills or drops them, and writes the cleaned CSV.\n\n\
                  EXAMPLES:\n  \
                  # Missing-value report only\n  \
                  eda-processing -i data.csv\n\n  \
                  # Fill numeric gaps with the mean and save the result\n  \
                  eda-processing -i data.csv --strategy mean -c age,income -o clean.csv\n\n  \
                  # Semicolon separated Latin-1 file with the quantitative view\n  \
                  eda-processing -i data.csv --encoding iso-8859-1 --delimiter semicolon --describe --correlation"
)]
struct Args {
    /// Path to the CSV file to analyze
    #[arg(short, long)]
    input: String,

    /// Text encoding of the input file
    #[arg(long, value_enum, default_value = "utf-8")]
    encoding: CliEncoding,

    /// Field delimiter of the input file
    #[arg(long, value_enum, default_value = "comma")]
    delimiter: CliDelimiter,

    /// How to handle missing values in the selected columns
    ///
    /// Requires --columns
    #[arg(long, value_enum, requires = "columns")]
    strategy: Option<CliStrategy>,

    /// Columns to apply the strategy to (comma separated)
    #[arg(short, long, value_delimiter = ',', requires = "strategy")]
    columns: Vec<String>,

    /// Where to write the resulting CSV
    #[arg(short, long)]
    output: Option<String>,

    /// Also write the session report as JSON to this path
    #[arg(short = 'r', long, value_name = "PATH")]
    report: Option<String>,

    /// Show count, mean, std, min, quartiles and max of numeric columns
    #[arg(long)]
    describe: bool,

    /// Show the Pearson correlation matrix of numeric columns
    #[arg(long)]
    correlation: bool,

    /// Show the first N rows
    #[arg(long, value_name = "N")]
    head: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all progress logs; only outputs the session report.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is disabled so stdout holds only JSON.
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

    let options = LoadOptions::builder()
        .encoding(args.encoding.into())
        .delimiter(args.delimiter.into())
        .build()?;

    info!("Loading dataset from: {}", args.input);
    let mut session = Session::open(&args.input, &options)?;
    info!("Dataset loaded successfully: {:?}", session.original().df().shape());

    if let Some(strategy) = args.strategy {
        let strategy: ImputationStrategy = strategy.into();
        info!("Applying {} to {}", strategy, args.columns.join(", "));
        session.apply(strategy, &args.columns)?;
    }

    if let Some(ref output) = args.output {
        write_csv(session.current().df(), output)?;
    }

    let report = SessionReport::build(&session, &args.input, args.output.as_deref());
    if let Some(ref path) = args.report {
        report.write_to_file(path)?;
    }

    if args.json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    print_human_readable_summary(&session, &args)
}

/// Print the report panels.
///
/// Uses `println!` intentionally: these panels are the primary output and
/// must show regardless of the log level.
fn print_human_readable_summary(session: &Session, args: &Args) -> Result<()> {
    let original = session.original();

    println!();
    println!("{}", "=".repeat(80));
    println!("MISSING VALUE REPORT");
    println!("{}", "=".repeat(80));
    println!();
    println!(
        "Input: {} ({} rows x {} columns)",
        args.input,
        original.report().row_count,
        original.report().column_count()
    );
    println!();

    print_type_counts(original.report());
    print_missing_table(original.report());

    if let Some(n) = args.head {
        println!("FIRST {} ROWS", n);
        println!("{}", "-".repeat(40));
        println!("{}", preview(original.df(), Preview::Head(n)));
        println!();
    }

    if args.describe {
        print_describe(session)?;
    }

    if args.correlation {
        print_correlation(session)?;
    }

    if let Some(processed) = session.processed() {
        print_processed(original.report(), processed);
    }

    if let Some(ref output) = args.output {
        println!("Output: {}", output);
        println!();
    }

    Ok(())
}

fn print_type_counts(report: &Report) {
    println!("COLUMN TYPES");
    println!("{}", "-".repeat(40));
    for (column_type, count) in report.type_counts() {
        println!("  {:<10} {}", column_type, count);
    }
    println!();
}

fn print_missing_table(report: &Report) {
    println!("MISSING VALUES");
    println!("{}", "-".repeat(40));
    println!(
        "{:<20} {:<10} {:<10} {:<10}",
        "Column", "Type", "Missing", "Missing %"
    );
    println!("{}", "-".repeat(54));

    for stats in report.sorted_by_missing() {
        println!(
            "{:<20} {:<10} {:<10} {:<10.1}",
            truncate_str(&stats.name, 19),
            stats.column_type,
            stats.missing_count,
            stats.missing_percentage
        );
    }
    println!();
}

fn print_describe(session: &Session) -> Result<()> {
    println!("NUMERIC SUMMARY");
    println!("{}", "-".repeat(40));
    println!(
        "{:<20} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    );

    for summary in describe(session.original().df())? {
        println!(
            "{:<20} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
            truncate_str(&summary.column, 19),
            summary.count,
            format_stat(summary.mean),
            format_stat(summary.std),
            format_stat(summary.min),
            format_stat(summary.q25),
            format_stat(summary.median),
            format_stat(summary.q75),
            format_stat(summary.max),
        );
    }
    println!();
    Ok(())
}

fn print_correlation(session: &Session) -> Result<()> {
    let matrix = correlation_matrix(session.original().df())?;

    println!("CORRELATION MATRIX");
    println!("{}", "-".repeat(40));
    print!("{:<20}", "");
    for name in &matrix.columns {
        print!(" {:>10}", truncate_str(name, 10));
    }
    println!();

    for (name, row) in matrix.columns.iter().zip(&matrix.values) {
        print!("{:<20}", truncate_str(name, 19));
        for value in row {
            print!(" {:>10}", format_stat(*value));
        }
        println!();
    }
    println!();
    Ok(())
}

fn print_processed(before: &Report, processed: &ProcessedFrame) {
    let after = processed.frame.report();

    println!("{}", "=".repeat(80));
    println!("AFTER {}", processed.strategy.to_string().to_uppercase());
    println!("{}", "=".repeat(80));
    println!();
    println!("  Columns: {}", processed.columns.join(", "));
    for fill in &processed.fill_values {
        println!("  {} of {}: {}", processed.strategy, fill.column, fill.value);
    }
    println!(
        "  Rows: {} -> {} ({} removed)",
        before.row_count,
        after.row_count,
        before.row_count.saturating_sub(after.row_count)
    );
    println!(
        "  Missing cells: {} -> {}",
        before.total_missing(),
        after.total_missing()
    );
    println!();

    print_missing_table(after);
}

fn format_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.3}", v))
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
