use chrono::Local;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::config::ImputationStrategy;
use crate::error::{EdaError, Result, ResultExt};
use crate::session::{ColumnFill, Session};
use crate::types::Report;

// ============================================================================
// Report Types
// ============================================================================

/// Machine-readable summary of a session.
///
/// Holds the report of the loaded dataset and, when a strategy was applied,
/// what was done and the report of the result. Printed by `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,
    /// Path to the output file (if written)
    pub output_file: Option<String>,
    /// Missing-value report of the data as loaded
    pub original: Report,
    /// Present once a strategy has been applied
    pub imputation: Option<ImputationReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImputationReport {
    pub strategy: ImputationStrategy,
    pub columns: Vec<String>,
    pub fill_values: Vec<ColumnFill>,
    pub rows_removed: usize,
    pub missing_before: usize,
    pub missing_after: usize,
    pub result: Report,
}

impl SessionReport {
    /// Build a report from the current state of `session`.
    pub fn build(session: &Session, input_file: &str, output_file: Option<&str>) -> Self {
        let original = session.original().report();

        let imputation = session.processed().map(|processed| {
            let result = processed.frame.report();
            ImputationReport {
                strategy: processed.strategy,
                columns: processed.columns.clone(),
                fill_values: processed.fill_values.clone(),
                rows_removed: original.row_count.saturating_sub(result.row_count),
                missing_before: original.total_missing(),
                missing_after: result.total_missing(),
                result: result.clone(),
            }
        });

        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.to_string(),
            output_file: output_file.map(String::from),
            original: original.clone(),
            imputation,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty JSON to `path`.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)
            .map_err(EdaError::from)
            .context(format!("Failed to write {}", path.display()))?;

        info!("Report saved: {}", path.display());
        Ok(())
    }
}
