//! Output format writers.
//!
//! - [`write_csv`] / [`to_csv`] - record table as CSV with `;` delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - full [`AnalysisReport`](crate::core::report::AnalysisReport) as pretty JSON - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - record table as JSON Lines, one record per line - requires `json-output` feature
//!
//! CSV and JSONL rows carry every derived calendar column, so the table can
//! be loaded into a spreadsheet or dataframe without re-parsing.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::core::output::{to_csv, write_jsonl};
//! use chatlens::parser::TranscriptParser;
//!
//! let table = TranscriptParser::new().parse("chat.txt")?;
//!
//! write_jsonl(&table, "records.jsonl")?;
//! let csv_string = to_csv(&table)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
