//! Dataset profiling.
//!
//! This module provides:
//! - The per-column missing-value report ([`analyze`])
//! - A numeric summary in the style of a `describe()` table
//! - A pairwise Pearson correlation matrix
//! - Head/tail previews

mod statistics;

use polars::prelude::*;
use tracing::trace;

use crate::types::{ColumnStats, Report};
use crate::utils::column_type_of;

pub use statistics::{
    CorrelationMatrix, NumericSummary, Preview, correlation_matrix, describe, preview,
};

/// Compute the missing-value report for a dataset.
///
/// Pure and cheap: it only reads null counts and dtypes, so it can be called
/// again after every change to the data.
pub fn analyze(df: &DataFrame) -> Report {
    let row_count = df.height();
    let columns = df
        .get_columns()
        .iter()
        .map(|col| column_stats(col, row_count))
        .collect();

    Report { row_count, columns }
}

fn column_stats(col: &Column, row_count: usize) -> ColumnStats {
    let missing_count = col.null_count();
    let missing_percentage = if row_count > 0 {
        (missing_count as f64 / row_count as f64) * 100.0
    } else {
        0.0
    };

    trace!(
        column = %col.name(),
        missing_count,
        missing_percentage,
        "Profiled column"
    );

    ColumnStats {
        name: col.name().to_string(),
        column_type: column_type_of(col.dtype()),
        dtype: col.dtype().to_string(),
        missing_count,
        missing_percentage,
    }
}
