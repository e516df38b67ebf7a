//! One user's working state: the loaded dataset and, once a strategy has
//! been applied, the cleaned copy shown next to it.
//!
//! ```text
//! ┌───────────────────────────┐   apply(strategy, columns)   ┌─────────────────────────────┐
//! │ original: AnalyzedFrame   │ ───────────────────────────▶ │ processed: ProcessedFrame   │
//! │ - df (as loaded)          │                              │ - frame: AnalyzedFrame      │
//! │ - report                  │ ◀─────── reset() ─────────── │ - strategy, columns, fills  │
//! └───────────────────────────┘                              └─────────────────────────────┘
//! ```
//!
//! Every `apply` starts again from the original data, so choosing a different
//! strategy replaces the previous result instead of stacking on top of it.

use std::path::Path;

use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::debug;

use crate::config::{ImputationStrategy, LoadOptions};
use crate::error::Result;
use crate::imputers::{FillValue, fill_value, impute};
use crate::loader;
use crate::reporting::serialize;
use crate::types::AnalyzedFrame;

/// Result of applying one strategy to the original data.
#[derive(Debug, Clone)]
pub struct ProcessedFrame {
    pub frame: AnalyzedFrame,
    pub strategy: ImputationStrategy,
    pub columns: Vec<String>,
    /// Value written into each filled column (empty for drop-rows).
    pub fill_values: Vec<ColumnFill>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnFill {
    pub column: String,
    pub value: FillValue,
}

/// An in-memory analysis session over a single dataset.
#[derive(Debug, Clone)]
pub struct Session {
    original: AnalyzedFrame,
    processed: Option<ProcessedFrame>,
}

static_assertions::assert_impl_all!(Session: Send);

impl Session {
    pub fn new(df: DataFrame) -> Self {
        Self {
            original: AnalyzedFrame::new(df),
            processed: None,
        }
    }

    /// Start a session from raw CSV bytes.
    pub fn load(source: &[u8], options: &LoadOptions) -> Result<Self> {
        Ok(Self::new(loader::load(source, options)?))
    }

    /// Start a session from a CSV file on disk.
    pub fn open(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        Ok(Self::new(loader::load_file(path, options)?))
    }

    pub fn original(&self) -> &AnalyzedFrame {
        &self.original
    }

    pub fn processed(&self) -> Option<&ProcessedFrame> {
        self.processed.as_ref()
    }

    /// The processed frame if there is one, otherwise the original.
    pub fn current(&self) -> &AnalyzedFrame {
        self.processed
            .as_ref()
            .map(|p| &p.frame)
            .unwrap_or(&self.original)
    }

    /// Apply `strategy` to `columns` of the original dataset.
    ///
    /// On error the previous processed frame, if any, is kept.
    pub fn apply<S: AsRef<str>>(
        &mut self,
        strategy: ImputationStrategy,
        columns: &[S],
    ) -> Result<&ProcessedFrame> {
        let source = self.original.df();
        let cleaned = impute(source, strategy, columns)?;

        let columns: Vec<String> = columns.iter().map(|c| c.as_ref().to_string()).collect();
        let mut fill_values = Vec::new();
        if strategy.fills_values() {
            for column in &columns {
                let already_filled = fill_values.iter().any(|f: &ColumnFill| &f.column == column);
                if already_filled || source.column(column)?.null_count() == 0 {
                    continue;
                }
                fill_values.push(ColumnFill {
                    column: column.clone(),
                    value: fill_value(source, strategy, column)?,
                });
            }
        }

        let frame = AnalyzedFrame::new(cleaned);
        debug!(
            strategy = %strategy,
            rows_before = self.original.report().row_count,
            rows_after = frame.report().row_count,
            missing_after = frame.report().total_missing(),
            "Applied imputation"
        );

        Ok(self.processed.insert(ProcessedFrame {
            frame,
            strategy,
            columns,
            fill_values,
        }))
    }

    /// Discard the processed frame.
    pub fn reset(&mut self) {
        self.processed = None;
    }

    /// CSV bytes of the current frame, ready to offer as a download.
    pub fn export(&self) -> Result<Vec<u8>> {
        serialize(self.current().df())
    }
}
