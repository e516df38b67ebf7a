use polars::prelude::*;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{EdaError, Result, ResultExt};

/// MIME type for the exported bytes.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Serialize a dataset to CSV.
///
/// Header row first, then one line per row in dataset order; comma
/// separated, no index column, nulls as empty fields. The same frame always
/// yields the same bytes.
pub fn serialize(df: &DataFrame) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    // CsvWriter needs a mutable frame to rechunk
    let mut df = df.clone();

    CsvWriter::new(&mut buffer)
        .include_header(true)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(&mut df)
        .context("Failed to serialize dataset")?;

    Ok(buffer)
}

/// Serialize a dataset and write it to `path`.
pub fn write_csv(df: &DataFrame, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = serialize(df)?;
    fs::write(path, bytes)
        .map_err(EdaError::from)
        .context(format!("Failed to write {}", path.display()))?;

    info!("Dataset saved: {}", path.display());
    Ok(())
}
