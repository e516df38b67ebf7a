//! Export and report generation.
//!
//! - [`serialize`] turns a dataset into CSV bytes for download
//! - [`SessionReport`] bundles the before/after reports of a session as JSON
//!
//! # Example
//!
//! ```rust,ignore
//! use eda_processing::reporting::{serialize, SessionReport, CSV_MIME_TYPE};
//!
//! let bytes = serialize(session.current().df())?;
//! offer_download("cleaned.csv", CSV_MIME_TYPE, bytes);
//!
//! let report = SessionReport::build(&session, "data.csv", None);
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! ```

mod export;
mod generator;

pub use export::{CSV_MIME_TYPE, serialize, write_csv};
pub use generator::{ImputationReport, SessionReport};
