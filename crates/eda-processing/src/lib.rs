//! Missing-Value Analysis Library
//!
//! Inspect a tabular dataset for missing values, fill or drop them, and export
//! the cleaned result as CSV. Built on Polars.
//!
//! # Overview
//!
//! - **Analysis**: per-column missing count and percentage, plus the semantic
//!   type (integer, float, text) of every column
//! - **Imputation**: mean, median or mode fill, or drop the affected rows, for
//!   an explicit set of columns
//! - **Export**: deterministic CSV bytes ready to be offered as a download
//! - **Quantitative view**: numeric summaries, correlations and previews
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use eda_processing::{analyze, impute, serialize, ImputationStrategy, LoadOptions};
//!
//! let df = eda_processing::load_file("data.csv", &LoadOptions::default())?;
//!
//! let report = analyze(&df);
//! for stats in report.sorted_by_missing() {
//!     println!("{}: {:.1}%", stats.name, stats.missing_percentage);
//! }
//!
//! let cleaned = impute(&df, ImputationStrategy::Mean, &report.numeric_columns_with_missing())?;
//! let bytes = serialize(&cleaned)?;
//! ```
//!
//! # Sessions
//!
//! A [`Session`] keeps the loaded dataset next to the result of the last
//! applied strategy, mirroring a "before / after" view:
//!
//! ```rust,ignore
//! use eda_processing::{ImputationStrategy, LoadOptions, Session};
//!
//! let mut session = Session::open("data.csv", &LoadOptions::default())?;
//! session.apply(ImputationStrategy::Mode, &["city"])?;
//! let download = session.export()?;
//! ```
//!
//! # Configuration
//!
//! Use [`LoadOptions`] to pick the file encoding and delimiter:
//!
//! ```rust,ignore
//! use eda_processing::config::*;
//!
//! let options = LoadOptions::builder()
//!     .encoding(Encoding::Iso8859_1)
//!     .delimiter(Delimiter::Semicolon)
//!     .build()?;
//! ```
//!
//! The library only emits `tracing` events; install a subscriber to see them.

pub mod config;
pub mod error;
pub mod imputers;
pub mod loader;
pub mod profiler;
pub mod reporting;
pub mod session;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{
    ConfigValidationError, DEFAULT_NULL_VALUES, Delimiter, Encoding, ImputationStrategy,
    LoadOptions, LoadOptionsBuilder,
};
pub use error::{EdaError, Result as EdaResult, ResultExt};
pub use imputers::{FillValue, StatisticalImputer, fill_value, impute};
pub use loader::{load, load_file};
pub use profiler::{
    CorrelationMatrix, NumericSummary, Preview, analyze, correlation_matrix, describe, preview,
};
pub use reporting::{CSV_MIME_TYPE, ImputationReport, SessionReport, serialize, write_csv};
pub use session::{ColumnFill, ProcessedFrame, Session};
pub use types::{AnalyzedFrame, ColumnStats, ColumnType, Report};
