//! CSV loading with user-selected encoding and delimiter.
//!
//! Bytes are decoded to UTF-8 first, then parsed by Polars. Columns that are
//! neither numeric nor string after parsing are cast to String here, at the
//! load boundary, so the rest of the crate only deals with integer, float
//! and text columns.

use encoding_rs::{UTF_8, mem};
use polars::io::csv::read::{CsvReadOptions, NullValues};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

use crate::config::{Encoding, LoadOptions};
use crate::error::{EdaError, Result, ResultExt};
use crate::utils::needs_text_coercion;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Parse CSV bytes into a dataset.
pub fn load(source: &[u8], options: &LoadOptions) -> Result<DataFrame> {
    options.validate()?;

    let text = decode(source, options.encoding)?;
    let null_values = (!options.null_values.is_empty()).then(|| {
        NullValues::AllColumns(options.null_values.iter().map(|s| s.as_str().into()).collect())
    });

    let df = CsvReadOptions::default()
        .with_has_header(options.has_header)
        .with_infer_schema_length(options.infer_schema_length)
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(options.delimiter.as_byte())
                .with_quote_char(Some(b'"'))
                .with_null_values(null_values),
        )
        .into_reader_with_file_handle(Cursor::new(text))
        .finish()
        .context("Failed to parse CSV")?;

    let df = coerce_to_core_types(df)?;
    debug!(shape = ?df.shape(), encoding = %options.encoding, "Dataset loaded");
    Ok(df)
}

/// Read a CSV file from disk and parse it with [`load`].
pub fn load_file(path: impl AsRef<Path>, options: &LoadOptions) -> Result<DataFrame> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(EdaError::from)
        .context(format!("Failed to read {}", path.display()))?;
    load(&bytes, options)
}

/// Decode raw bytes to a UTF-8 string.
pub fn decode(source: &[u8], encoding: Encoding) -> Result<String> {
    let decode_error = |reason: String| EdaError::Decode {
        encoding: encoding.label().to_string(),
        reason,
    };

    match encoding {
        Encoding::Utf8 => {
            let bytes = source.strip_prefix(UTF8_BOM).unwrap_or(source);
            UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned())
                .ok_or_else(|| {
                    let offset = encoding_rs::Encoding::utf8_valid_up_to(bytes);
                    decode_error(format!("invalid UTF-8 sequence at offset {}", offset))
                })
        }
        // Latin-1 code points coincide with their byte values
        Encoding::Iso8859_1 => Ok(mem::decode_latin1(source).into_owned()),
        Encoding::UsAscii => {
            let offset = encoding_rs::Encoding::ascii_valid_up_to(source);
            match source.get(offset) {
                Some(byte) => Err(decode_error(format!(
                    "non-ASCII byte 0x{:02X} at offset {}",
                    byte, offset
                ))),
                None => Ok(mem::decode_latin1(source).into_owned()),
            }
        }
    }
}

/// Cast every non-numeric, non-string column to String.
fn coerce_to_core_types(mut df: DataFrame) -> Result<DataFrame> {
    let to_coerce: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|col| needs_text_coercion(col.dtype()))
        .map(|col| col.name().to_string())
        .collect();

    for name in &to_coerce {
        let converted = df.column(name)?.cast(&DataType::String)?;
        df.replace(name, converted.take_materialized_series())?;
        debug!(column = %name, "Coerced column to text");
    }

    Ok(df)
}
