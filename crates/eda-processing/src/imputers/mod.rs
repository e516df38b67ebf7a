//! Imputation of missing values.
//!
//! [`impute`] applies one [`ImputationStrategy`] to a set of columns and
//! returns a new dataset; the input is never modified. The selection is
//! fully validated and every fill value computed before any column is
//! rewritten, so a failure never leaves a half-imputed result.

mod rows;
mod statistical;

use polars::prelude::*;
use tracing::debug;

use crate::config::ImputationStrategy;
use crate::error::{EdaError, Result};
use crate::utils::column_type_of;

pub use statistical::{FillValue, StatisticalImputer};

/// Apply `strategy` to `columns` and return the cleaned dataset.
///
/// # Errors
///
/// - [`EdaError::InvalidSelection`] if `columns` is empty or names a column
///   that does not exist
/// - [`EdaError::TypeMismatch`] if mean or median is requested for a text column
/// - [`EdaError::UndefinedStatistic`] if a column to fill has no non-missing values
///
/// Selected columns without missing values are left untouched, so imputing
/// the result again is a no-op.
pub fn impute<S: AsRef<str>>(
    df: &DataFrame,
    strategy: ImputationStrategy,
    columns: &[S],
) -> Result<DataFrame> {
    let selection = validate_selection(df, strategy, columns)?;

    debug!(
        strategy = %strategy,
        columns = ?selection,
        rows = df.height(),
        "Imputing missing values"
    );

    match strategy {
        ImputationStrategy::DropRows => rows::drop_rows_with_missing(df, &selection),
        _ => {
            let mut plan = Vec::with_capacity(selection.len());
            for name in &selection {
                if df.column(name)?.null_count() == 0 {
                    continue;
                }
                plan.push((name, StatisticalImputer::compute(df, strategy, name)?));
            }

            let mut result = df.clone();
            for (name, value) in plan {
                StatisticalImputer::apply(&mut result, name, &value)?;
                debug!(column = %name, fill = %value, "Filled missing values");
            }
            Ok(result)
        }
    }
}

/// The value `strategy` would use to fill `column`, without changing anything.
///
/// Lets a UI show e.g. "mean of age: 27.5" before the user applies it.
pub fn fill_value(
    df: &DataFrame,
    strategy: ImputationStrategy,
    column: &str,
) -> Result<FillValue> {
    if !strategy.fills_values() {
        return Err(EdaError::InvalidConfig(format!(
            "{} removes rows and has no fill value",
            strategy
        )));
    }
    let selection = validate_selection(df, strategy, &[column])?;
    StatisticalImputer::compute(df, strategy, &selection[0])
}

/// Check the selection against the dataset and the strategy's type rules.
///
/// Returns the selected names with duplicates removed, in first-seen order.
fn validate_selection<S: AsRef<str>>(
    df: &DataFrame,
    strategy: ImputationStrategy,
    columns: &[S],
) -> Result<Vec<String>> {
    if columns.is_empty() {
        return Err(EdaError::InvalidSelection(
            "no columns selected".to_string(),
        ));
    }

    let mut selection: Vec<String> = Vec::with_capacity(columns.len());
    for name in columns.iter().map(AsRef::as_ref) {
        if !selection.iter().any(|s| s == name) {
            selection.push(name.to_string());
        }
    }

    let missing: Vec<&str> = selection
        .iter()
        .map(String::as_str)
        .filter(|name| df.column(name).is_err())
        .collect();
    if !missing.is_empty() {
        return Err(EdaError::InvalidSelection(format!(
            "column(s) not found in dataset: {}",
            missing.join(", ")
        )));
    }

    if strategy.requires_numeric() {
        for name in &selection {
            let column_type = column_type_of(df.column(name)?.dtype());
            if !column_type.is_numeric() {
                return Err(EdaError::TypeMismatch {
                    column: name.clone(),
                    column_type,
                    strategy,
                });
            }
        }
    }

    Ok(selection)
}
