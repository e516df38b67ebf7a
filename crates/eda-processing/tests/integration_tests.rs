//! Integration tests for loading, analysis, imputation and export.
//!
//! These tests run the public API end to end against the CSV fixtures.

use eda_processing::{
    ColumnType, Delimiter, EdaError, Encoding, FillValue, ImputationStrategy, LoadOptions,
    Session, SessionReport, analyze, correlation_matrix, describe, fill_value, impute, load,
    load_file, serialize,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixture(filename: &str) -> DataFrame {
    load_file(fixtures_path().join(filename), &LoadOptions::default())
        .expect("Failed to load fixture")
}

fn f64_values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name)
        .unwrap()
        .as_materialized_series()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// Analysis
// ============================================================================

#[test]
fn test_scenario_report() {
    let df = load_fixture("scenario.csv");
    let report = analyze(&df);

    assert_eq!(report.row_count, 3);
    let summary: Vec<(&str, ColumnType, usize, f64)> = report
        .columns
        .iter()
        .map(|c| {
            (
                c.name.as_str(),
                c.column_type,
                c.missing_count,
                round2(c.missing_percentage),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("age", ColumnType::Integer, 1, 33.33),
            ("income", ColumnType::Float, 1, 33.33),
            ("city", ColumnType::Text, 0, 0.0),
        ]
    );
    assert_eq!(report.numeric_columns_with_missing(), vec!["age", "income"]);
}

#[test]
fn test_header_only_file_reports_zero_percent() {
    let df = load_fixture("header_only.csv");
    let report = analyze(&df);

    assert_eq!(report.row_count, 0);
    assert_eq!(report.column_count(), 3);
    assert!(report.columns.iter().all(|c| c.missing_percentage == 0.0));
}

#[test]
fn test_latin1_semicolon_file() {
    let options = LoadOptions::builder()
        .encoding(Encoding::Iso8859_1)
        .delimiter(Delimiter::Semicolon)
        .build()
        .unwrap();

    let df = load_file(fixtures_path().join("latin1_semicolon.csv"), &options).unwrap();
    let report = analyze(&df);

    assert_eq!(df.shape(), (3, 3));
    assert_eq!(report.columns_with_missing(), vec!["population", "zone"]);
    let cities: Vec<Option<&str>> = df
        .column("city")
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(
        cities,
        vec![Some("São Paulo"), Some("Malmö"), Some("København")]
    );
}

#[test]
fn test_na_tokens_count_as_missing() {
    let df = load_fixture("na_tokens.csv");
    let report = analyze(&df);

    let missing: Vec<(&str, ColumnType, usize)> = report
        .columns
        .iter()
        .map(|c| (c.name.as_str(), c.column_type, c.missing_count))
        .collect();
    assert_eq!(
        missing,
        vec![
            ("age", ColumnType::Integer, 1),
            ("income", ColumnType::Float, 2),
            ("city", ColumnType::Text, 1),
        ]
    );

    let cleaned = impute(&df, ImputationStrategy::Median, &["age", "income"]).unwrap();
    assert_eq!(
        f64_values(&cleaned, "age"),
        vec![Some(25.0), Some(30.0), Some(30.0), Some(41.0)]
    );
}

#[test]
fn test_latin1_file_as_utf8_is_decode_error() {
    let options = LoadOptions::builder()
        .delimiter(Delimiter::Semicolon)
        .build()
        .unwrap();

    let err = load_file(fixtures_path().join("latin1_semicolon.csv"), &options).unwrap_err();
    assert_eq!(err.error_code(), "DECODE_ERROR");
}

// ============================================================================
// Imputation
// ============================================================================

#[test]
fn test_scenario_mean_age() {
    let df = load_fixture("scenario.csv");
    let cleaned = impute(&df, ImputationStrategy::Mean, &["age"]).unwrap();

    assert_eq!(
        f64_values(&cleaned, "age"),
        vec![Some(25.0), Some(27.5), Some(30.0)]
    );
    // other columns untouched
    assert!(cleaned.column("income").unwrap().equals_missing(df.column("income").unwrap()));
    assert!(cleaned.column("city").unwrap().equals_missing(df.column("city").unwrap()));
}

#[test]
fn test_mean_is_idempotent() {
    let df = load_fixture("scenario.csv");
    let once = impute(&df, ImputationStrategy::Mean, &["age", "income"]).unwrap();
    let twice = impute(&once, ImputationStrategy::Mean, &["age", "income"]).unwrap();

    assert!(once.equals_missing(&twice));
    assert_eq!(analyze(&twice).total_missing(), 0);
}

#[test]
fn test_mode_tie_takes_first_value() {
    let df = load_fixture("mode_tie.csv");

    assert_eq!(
        fill_value(&df, ImputationStrategy::Mode, "value").unwrap(),
        FillValue::Integer(1)
    );
    assert_eq!(
        fill_value(&df, ImputationStrategy::Mode, "label").unwrap(),
        FillValue::Text("x".to_string())
    );

    let cleaned = impute(&df, ImputationStrategy::Mode, &["value", "label"]).unwrap();
    let values: Vec<Option<i64>> = cleaned
        .column("value")
        .unwrap()
        .as_materialized_series()
        .i64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(values, vec![Some(1), Some(1), Some(2), Some(2), Some(1)]);
}

#[test]
fn test_drop_rows_across_columns() {
    let df = load_fixture("drop_rows.csv");
    let cleaned = impute(&df, ImputationStrategy::DropRows, &["a", "b"]).unwrap();

    assert_eq!(cleaned.height(), 3);
    let a: Vec<Option<i64>> = cleaned
        .column("a")
        .unwrap()
        .as_materialized_series()
        .i64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(a, vec![Some(1), Some(3), Some(5)]);
}

#[test]
fn test_mean_on_text_column_leaves_input_unchanged() {
    let df = load_fixture("scenario.csv");
    let before = df.clone();

    let err = impute(&df, ImputationStrategy::Mean, &["age", "city"]).unwrap_err();
    assert!(matches!(
        err,
        EdaError::TypeMismatch {
            column_type: ColumnType::Text,
            ..
        }
    ));
    assert!(df.equals_missing(&before));
}

#[test]
fn test_all_null_column_has_no_statistic() {
    let df = load_fixture("all_null_column.csv");
    assert_eq!(analyze(&df).column("empty").unwrap().missing_percentage, 100.0);

    let err = impute(&df, ImputationStrategy::Mode, &["empty"]).unwrap_err();
    assert_eq!(err.error_code(), "UNDEFINED_STATISTIC");
}

#[test]
fn test_unknown_column_is_invalid_selection() {
    let df = load_fixture("scenario.csv");
    let err = impute(&df, ImputationStrategy::Median, &["salary"]).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_SELECTION");
}

// ============================================================================
// Export
// ============================================================================

#[test]
fn test_export_round_trip() {
    let df = load_fixture("scenario.csv");
    let cleaned = impute(&df, ImputationStrategy::Mean, &["age"]).unwrap();

    let bytes = serialize(&cleaned).unwrap();
    let reloaded = load(&bytes, &LoadOptions::default()).unwrap();

    assert_eq!(reloaded.get_column_names(), cleaned.get_column_names());
    assert!(reloaded.equals_missing(&cleaned));
}

#[test]
fn test_export_writes_nulls_as_empty_fields() {
    let df = load_fixture("drop_rows.csv");
    let csv = String::from_utf8(serialize(&df).unwrap()).unwrap();

    assert_eq!(csv.lines().next(), Some("a,b"));
    assert_eq!(csv.lines().nth(2), Some(",2"));
    assert_eq!(csv.lines().nth(4), Some("4,"));
}

// ============================================================================
// Quantitative view
// ============================================================================

#[test]
fn test_describe_and_correlation_on_scenario() {
    let df = load_fixture("scenario.csv");

    let summaries = describe(&df).unwrap();
    let columns: Vec<&str> = summaries.iter().map(|s| s.column.as_str()).collect();
    assert_eq!(columns, vec!["age", "income"]);
    assert_eq!(summaries[0].count, 2);
    assert_eq!(summaries[0].mean, Some(27.5));

    // age and income share only one complete row
    let matrix = correlation_matrix(&df).unwrap();
    assert_eq!(matrix.get("age", "income"), None);
    let diagonal = matrix.get("age", "age").unwrap();
    assert!((diagonal - 1.0).abs() < 1e-12);
}

// ============================================================================
// Session
// ============================================================================

#[test]
fn test_session_end_to_end() {
    let mut session =
        Session::open(fixtures_path().join("mode_tie.csv"), &LoadOptions::default()).unwrap();

    session
        .apply(ImputationStrategy::Mode, &["value", "label"])
        .unwrap();
    let exported = load(&session.export().unwrap(), &LoadOptions::default()).unwrap();
    assert_eq!(analyze(&exported).total_missing(), 0);
    assert_eq!(session.original().report().total_missing(), 2);

    let report = SessionReport::build(&session, "mode_tie.csv", None);
    let imputation = report.imputation.unwrap();
    assert_eq!(imputation.missing_before, 2);
    assert_eq!(imputation.missing_after, 0);
    assert_eq!(imputation.fill_values.len(), 2);

    session.reset();
    assert_eq!(session.current().report().total_missing(), 2);
}
