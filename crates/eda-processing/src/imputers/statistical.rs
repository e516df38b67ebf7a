//! Statistical imputation methods.
//!
//! Provides mean, median and mode fill values and writes them into a column.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ImputationStrategy;
use crate::error::{EdaError, Result};
use crate::types::ColumnType;
use crate::utils::{
    column_type_of, fill_integer_nulls, fill_numeric_nulls, fill_string_nulls, first_mode,
};

/// A value used to replace the nulls of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FillValue {
    Float(f64),
    Integer(i64),
    Text(String),
}

impl fmt::Display for FillValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{}", v),
            Self::Integer(v) => write!(f, "{}", v),
            Self::Text(v) => write!(f, "{}", v),
        }
    }
}

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Compute the fill value for `col_name` under `strategy`.
    ///
    /// Only non-missing values take part. A column with none of them has no
    /// defined statistic and yields [`EdaError::UndefinedStatistic`].
    pub fn compute(
        df: &DataFrame,
        strategy: ImputationStrategy,
        col_name: &str,
    ) -> Result<FillValue> {
        let series = df.column(col_name)?.as_materialized_series();
        let undefined = || EdaError::UndefinedStatistic {
            column: col_name.to_string(),
            strategy,
        };

        match strategy {
            ImputationStrategy::Mean => series.mean().map(FillValue::Float).ok_or_else(undefined),
            ImputationStrategy::Median => {
                series.median().map(FillValue::Float).ok_or_else(undefined)
            }
            ImputationStrategy::Mode => Self::mode(series)?.ok_or_else(undefined),
            ImputationStrategy::DropRows => Err(EdaError::InvalidConfig(format!(
                "{} has no fill value",
                strategy
            ))),
        }
    }

    /// Most frequent non-missing value, ties broken by first occurrence.
    ///
    /// The value keeps the column's type family so an integer column stays
    /// integer after mode imputation.
    fn mode(series: &Series) -> Result<Option<FillValue>> {
        let value = match column_type_of(series.dtype()) {
            ColumnType::Integer => {
                let ints = series.cast(&DataType::Int64)?;
                first_mode(ints.i64()?.into_iter()).map(FillValue::Integer)
            }
            ColumnType::Float => {
                let floats = series.cast(&DataType::Float64)?;
                first_mode(floats.f64()?.into_iter().map(|v| v.map(f64::to_bits)))
                    .map(|bits| FillValue::Float(f64::from_bits(bits)))
            }
            ColumnType::Text => {
                let strings = series.cast(&DataType::String)?;
                first_mode(strings.str()?.into_iter())
                    .map(|s| FillValue::Text(s.to_string()))
            }
        };
        Ok(value)
    }

    /// Replace the nulls of `col_name` with `value`.
    pub fn apply(df: &mut DataFrame, col_name: &str, value: &FillValue) -> Result<()> {
        let series = df.column(col_name)?.as_materialized_series();
        let filled = match value {
            FillValue::Float(v) => fill_numeric_nulls(series, *v)?,
            FillValue::Integer(v) => fill_integer_nulls(series, *v)?,
            FillValue::Text(v) => fill_string_nulls(series, v)?,
        };
        df.replace(col_name, filled)?;
        Ok(())
    }
}
