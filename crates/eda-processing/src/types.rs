use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::profiler::analyze;

/// Semantic type of a column, fixed when the dataset is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Float,
    /// Categorical or free text (anything that is not a number)
    Text,
}

impl ColumnType {
    pub const ALL: [ColumnType; 3] = [ColumnType::Integer, ColumnType::Float, ColumnType::Text];

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
        };
        f.write_str(name)
    }
}

/// Missing-value statistics for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub name: String,
    pub column_type: ColumnType,
    /// Polars dtype as displayed (e.g. `i64`, `f64`, `str`).
    pub dtype: String,
    pub missing_count: usize,
    /// `missing_count / row_count * 100`, or 0 for an empty dataset.
    pub missing_percentage: f64,
}

impl ColumnStats {
    pub fn has_missing(&self) -> bool {
        self.missing_count > 0
    }
}

/// Per-column missing-value report, one entry per column in dataset order.
///
/// A report is derived from a dataset and never edited; after any change to
/// the data, analyze the new dataset to get a new report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub row_count: usize,
    pub columns: Vec<ColumnStats>,
}

impl Report {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Look up the entry for a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnStats> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Total number of missing cells across all columns.
    pub fn total_missing(&self) -> usize {
        self.columns.iter().map(|c| c.missing_count).sum()
    }

    /// Columns eligible for mode imputation or row dropping.
    pub fn columns_with_missing(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.has_missing())
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Columns eligible for mean or median imputation.
    pub fn numeric_columns_with_missing(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.has_missing() && c.column_type.is_numeric())
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn columns_of_type(&self, column_type: ColumnType) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.column_type == column_type)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Number of columns per type, for the types present.
    pub fn type_counts(&self) -> Vec<(ColumnType, usize)> {
        ColumnType::ALL
            .into_iter()
            .map(|ty| (ty, self.columns.iter().filter(|c| c.column_type == ty).count()))
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    /// Entries ordered by missing percentage, highest first.
    /// Ties keep dataset column order.
    pub fn sorted_by_missing(&self) -> Vec<&ColumnStats> {
        let mut sorted: Vec<&ColumnStats> = self.columns.iter().collect();
        sorted.sort_by(|a, b| b.missing_percentage.total_cmp(&a.missing_percentage));
        sorted
    }
}

/// A dataset together with the report computed from it.
///
/// The report can only be produced by analyzing the frame held alongside
/// it, so the two never drift apart.
#[derive(Debug, Clone)]
pub struct AnalyzedFrame {
    df: DataFrame,
    report: Report,
}

impl AnalyzedFrame {
    pub fn new(df: DataFrame) -> Self {
        let report = analyze(&df);
        Self { df, report }
    }

    pub fn df(&self) -> &DataFrame {
        &self.df
    }

    pub fn report(&self) -> &Report {
        &self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn stats(name: &str, column_type: ColumnType, missing: usize, pct: f64) -> ColumnStats {
        ColumnStats {
            name: name.to_string(),
            column_type,
            dtype: String::new(),
            missing_count: missing,
            missing_percentage: pct,
        }
    }

    fn sample_report() -> Report {
        Report {
            row_count: 4,
            columns: vec![
                stats("id", ColumnType::Integer, 0, 0.0),
                stats("age", ColumnType::Integer, 1, 25.0),
                stats("score", ColumnType::Float, 2, 50.0),
                stats("city", ColumnType::Text, 1, 25.0),
            ],
        }
    }

    #[test]
    fn test_selection_lists() {
        let report = sample_report();
        assert_eq!(report.columns_with_missing(), vec!["age", "score", "city"]);
        assert_eq!(report.numeric_columns_with_missing(), vec!["age", "score"]);
        assert_eq!(report.columns_of_type(ColumnType::Integer), vec!["id", "age"]);
        assert_eq!(report.total_missing(), 4);
    }

    #[test]
    fn test_type_counts_skips_absent_types() {
        let report = Report {
            row_count: 1,
            columns: vec![
                stats("a", ColumnType::Text, 0, 0.0),
                stats("b", ColumnType::Integer, 0, 0.0),
                stats("c", ColumnType::Text, 0, 0.0),
            ],
        };
        assert_eq!(
            report.type_counts(),
            vec![(ColumnType::Integer, 1), (ColumnType::Text, 2)]
        );
    }

    #[test]
    fn test_sorted_by_missing_is_stable() {
        let report = sample_report();
        let order: Vec<&str> = report
            .sorted_by_missing()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(order, vec!["score", "age", "city", "id"]);
    }

    #[test]
    fn test_analyzed_frame_report_matches_frame() {
        let df = df![
            "x" => [Some(1i64), None],
        ]
        .unwrap();
        let frame = AnalyzedFrame::new(df);
        assert_eq!(frame.report().row_count, frame.df().height());
        assert_eq!(frame.report().column("x").unwrap().missing_count, 1);
    }

    #[test]
    fn test_column_type_serialization() {
        let json = serde_json::to_string(&ColumnType::Float).unwrap();
        assert_eq!(json, "\"float\"");
    }
}
