//! Numeric summaries, correlations and previews for the quantitative view.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::utils::{is_numeric_dtype, non_null_f64, sorted_median};

/// `describe()`-style summary of one numeric column.
///
/// Statistics are `None` when the column has no non-missing values
/// (and `std` also when it has only one).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Pearson correlations between every pair of numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major, `values[i][j]` is the correlation of `columns[i]` and `columns[j]`.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values[i][j]
    }
}

/// Which rows to show in a preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preview {
    Head(usize),
    Tail(usize),
}

impl Default for Preview {
    fn default() -> Self {
        Preview::Head(5)
    }
}

/// First or last rows of the dataset.
pub fn preview(df: &DataFrame, which: Preview) -> DataFrame {
    match which {
        Preview::Head(n) => df.head(Some(n)),
        Preview::Tail(n) => df.tail(Some(n)),
    }
}

/// Summarize every numeric column, in dataset order.
pub fn describe(df: &DataFrame) -> Result<Vec<NumericSummary>> {
    let mut summaries = Vec::new();

    for col in df.get_columns() {
        if !is_numeric_dtype(col.dtype()) {
            continue;
        }
        let mut values = non_null_f64(col.as_materialized_series())?;
        values.sort_by(f64::total_cmp);
        summaries.push(summarize(col.name().to_string(), &values));
    }

    Ok(summaries)
}

fn summarize(column: String, sorted: &[f64]) -> NumericSummary {
    let count = sorted.len();
    let mean = mean(sorted);

    NumericSummary {
        column,
        count,
        mean,
        std: sample_std(sorted, mean),
        min: sorted.first().copied(),
        q25: quantile(sorted, 0.25),
        median: sorted_median(sorted),
        q75: quantile(sorted, 0.75),
        max: sorted.last().copied(),
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Sample standard deviation (n - 1 denominator).
fn sample_std(values: &[f64], mean: Option<f64>) -> Option<f64> {
    let mean = mean?;
    let n = values.len();
    if n < 2 {
        return None;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    Some(variance.sqrt())
}

/// Quantile of sorted values with linear interpolation between ranks.
fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Correlation matrix over all numeric columns, using pairwise-complete rows.
pub fn correlation_matrix(df: &DataFrame) -> Result<CorrelationMatrix> {
    let mut columns = Vec::new();
    let mut data: Vec<Vec<Option<f64>>> = Vec::new();

    for col in df.get_columns() {
        if !is_numeric_dtype(col.dtype()) {
            continue;
        }
        let floats = col.as_materialized_series().cast(&DataType::Float64)?;
        data.push(floats.f64()?.into_iter().collect());
        columns.push(col.name().to_string());
    }

    let values = data
        .iter()
        .map(|x| data.iter().map(|y| pearson(x, y)).collect())
        .collect();

    Ok(CorrelationMatrix { columns, values })
}

fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    let n = pairs.len();
    if n < 2 {
        return None;
    }

    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n as f64;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x * var_y).sqrt())
}
