use polars::prelude::*;
use tracing::debug;

use crate::error::Result;

/// Drop every row with a null in at least one of `columns`.
pub(crate) fn drop_rows_with_missing(df: &DataFrame, columns: &[String]) -> Result<DataFrame> {
    let mut keep: Option<BooleanChunked> = None;

    for name in columns {
        let present = df.column(name)?.as_materialized_series().is_not_null();
        keep = Some(match keep {
            Some(mask) => &mask & &present,
            None => present,
        });
    }

    let Some(mask) = keep else {
        return Ok(df.clone());
    };

    let result = df.filter(&mask)?;
    debug!(
        rows_before = df.height(),
        rows_after = result.height(),
        "Dropped rows with missing values"
    );
    Ok(result)
}
