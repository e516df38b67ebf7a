//! Configuration types for loading and cleaning a dataset.
//!
//! Strategy and load choices are plain values passed to the operations that
//! use them; nothing is read from ambient state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EdaError;

/// Strategy for handling missing values in the selected columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ImputationStrategy {
    /// Replace nulls with the arithmetic mean of the non-null values
    #[default]
    Mean,
    /// Replace nulls with the median of the non-null values
    Median,
    /// Replace nulls with the most frequent non-null value
    Mode,
    /// Remove every row that has a null in any selected column
    DropRows,
}

impl ImputationStrategy {
    /// All strategies, in the order a UI should offer them.
    pub const ALL: [ImputationStrategy; 4] = [
        ImputationStrategy::Mean,
        ImputationStrategy::Median,
        ImputationStrategy::Mode,
        ImputationStrategy::DropRows,
    ];

    /// Mean and median are only defined over numeric columns.
    pub fn requires_numeric(self) -> bool {
        matches!(self, Self::Mean | Self::Median)
    }

    /// Whether the strategy fills values (as opposed to removing rows).
    pub fn fills_values(self) -> bool {
        !matches!(self, Self::DropRows)
    }
}

impl fmt::Display for ImputationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Mode => "mode",
            Self::DropRows => "drop-rows",
        };
        f.write_str(name)
    }
}

/// Text encoding of the uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    /// Latin-1: every byte maps to the code point of the same value
    Iso8859_1,
    /// 7-bit ASCII; bytes >= 0x80 are rejected
    UsAscii,
}

impl Encoding {
    /// Conventional label for the encoding.
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Iso8859_1 => "ISO-8859-1",
            Self::UsAscii => "us-ascii",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Field separator of the uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Semicolon,
    Period,
    Space,
    Pipe,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Semicolon => b';',
            Self::Period => b'.',
            Self::Space => b' ',
            Self::Pipe => b'|',
        }
    }
}

/// Options for turning raw CSV bytes into a dataset.
///
/// Use [`LoadOptions::builder()`] for a fluent, validated setup.
///
/// # Example
///
/// ```rust,ignore
/// use eda_processing::config::{Delimiter, Encoding, LoadOptions};
///
/// let options = LoadOptions::builder()
///     .encoding(Encoding::Iso8859_1)
///     .delimiter(Delimiter::Semicolon)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Encoding of the source bytes.
    /// Default: UTF-8
    pub encoding: Encoding,

    /// Field separator.
    /// Default: comma
    pub delimiter: Delimiter,

    /// Whether the first row holds column names.
    /// Default: true
    pub has_header: bool,

    /// Number of rows used to infer column types.
    /// `None` scans the whole file.
    /// Default: None
    pub infer_schema_length: Option<usize>,

    /// Cell values read as missing, in every column. Empty fields are
    /// always missing.
    /// Default: [`DEFAULT_NULL_VALUES`]
    #[serde(default = "default_null_values")]
    pub null_values: Vec<String>,
}

/// Tokens read as missing by default, the usual NA spellings of CSV exports.
pub const DEFAULT_NULL_VALUES: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn default_null_values() -> Vec<String> {
    DEFAULT_NULL_VALUES.iter().map(|s| s.to_string()).collect()
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            encoding: Encoding::default(),
            delimiter: Delimiter::default(),
            has_header: true,
            infer_schema_length: None,
            null_values: default_null_values(),
        }
    }
}

impl LoadOptions {
    /// Create a new options builder.
    pub fn builder() -> LoadOptionsBuilder {
        LoadOptionsBuilder::default()
    }

    /// Validate the options and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.infer_schema_length == Some(0) {
            return Err(ConfigValidationError::ZeroInferSchemaLength);
        }
        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Schema inference length must be at least 1 (use None to scan every row)")]
    ZeroInferSchemaLength,
}

impl From<ConfigValidationError> for EdaError {
    fn from(err: ConfigValidationError) -> Self {
        EdaError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`LoadOptions`].
#[derive(Debug, Default)]
pub struct LoadOptionsBuilder {
    encoding: Option<Encoding>,
    delimiter: Option<Delimiter>,
    has_header: Option<bool>,
    infer_schema_length: Option<Option<usize>>,
    null_values: Option<Vec<String>>,
}

impl LoadOptionsBuilder {
    /// Set the source encoding.
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Set the field separator.
    pub fn delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Set whether the first row is a header.
    pub fn has_header(mut self, has_header: bool) -> Self {
        self.has_header = Some(has_header);
        self
    }

    /// Set how many rows are scanned for type inference (`None` = all).
    pub fn infer_schema_length(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_length = Some(rows);
        self
    }

    /// Set the tokens read as missing (empty to only treat empty fields so).
    pub fn null_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Build and validate the options.
    pub fn build(self) -> Result<LoadOptions, ConfigValidationError> {
        let defaults = LoadOptions::default();
        let options = LoadOptions {
            encoding: self.encoding.unwrap_or(defaults.encoding),
            delimiter: self.delimiter.unwrap_or(defaults.delimiter),
            has_header: self.has_header.unwrap_or(defaults.has_header),
            infer_schema_length: self
                .infer_schema_length
                .unwrap_or(defaults.infer_schema_length),
            null_values: self.null_values.unwrap_or(defaults.null_values),
        };

        options.validate()?;
        Ok(options)
    }
}
