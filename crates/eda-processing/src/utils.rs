//! Shared helpers for dtype classification and null filling.

use polars::prelude::*;
use std::collections::HashMap;
use std::hash::Hash;

use crate::types::ColumnType;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is a signed or unsigned integer.
#[inline]
pub fn is_integer_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

#[inline]
pub fn is_float_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    is_integer_dtype(dtype) || is_float_dtype(dtype)
}

/// Semantic column type of a Polars dtype.
pub fn column_type_of(dtype: &DataType) -> ColumnType {
    if is_integer_dtype(dtype) {
        ColumnType::Integer
    } else if is_float_dtype(dtype) {
        ColumnType::Float
    } else {
        ColumnType::Text
    }
}

/// Whether a freshly loaded column has to be cast to String before it
/// enters the core (booleans, dates and anything else non-numeric).
#[inline]
pub fn needs_text_coercion(dtype: &DataType) -> bool {
    !is_numeric_dtype(dtype) && !matches!(dtype, DataType::String)
}

// =============================================================================
// Series Statistics Utilities
// =============================================================================

/// Most frequent value; ties go to the value encountered first.
pub fn first_mode<K, I>(values: I) -> Option<K>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = Option<K>>,
{
    let mut counts: HashMap<K, usize> = HashMap::new();
    let mut order: Vec<K> = Vec::new();

    for value in values.into_iter().flatten() {
        let count = counts.entry(value.clone()).or_insert_with(|| {
            order.push(value.clone());
            0
        });
        *count += 1;
    }

    let max = counts.values().copied().max()?;
    order.into_iter().find(|value| counts.get(value) == Some(&max))
}

/// Non-null values of a numeric Series as f64, in row order.
pub fn non_null_f64(series: &Series) -> PolarsResult<Vec<f64>> {
    let floats = series.cast(&DataType::Float64)?;
    Ok(floats.f64()?.into_iter().flatten().collect())
}

/// Median of already-sorted values; average of the middle pair for even lengths.
pub fn sorted_median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Fill nulls in a numeric Series with a value; the result is Float64.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let floats = series.cast(&DataType::Float64)?;
    let filled: Vec<Option<f64>> = floats
        .f64()?
        .into_iter()
        .map(|v| Some(v.unwrap_or(fill_value)))
        .collect();
    Ok(Series::new(series.name().clone(), filled))
}

/// Fill nulls in an integer Series with a value; the result is Int64.
pub fn fill_integer_nulls(series: &Series, fill_value: i64) -> PolarsResult<Series> {
    let ints = series.cast(&DataType::Int64)?;
    let filled: Vec<Option<i64>> = ints
        .i64()?
        .into_iter()
        .map(|v| Some(v.unwrap_or(fill_value)))
        .collect();
    Ok(Series::new(series.name().clone(), filled))
}

/// Fill nulls in a Series with a string; the result is String.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let strings = series.cast(&DataType::String)?;
    let filled: Vec<Option<&str>> = strings
        .str()?
        .into_iter()
        .map(|v| Some(v.unwrap_or(fill_value)))
        .collect();
    Ok(Series::new(series.name().clone(), filled))
}

// =============================================================================
// Tests
// =============================================================================
