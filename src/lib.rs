//! # Chatlens
//!
//! A Rust library for analyzing WhatsApp chat exports.
//!
//! ## Overview
//!
//! Chatlens turns a raw `.txt` export (Android or iOS, 12- or 24-hour
//! clock, day-first or month-first dates) into a table of timestamped
//! records, then computes:
//! - headline counts, monthly timeline, weekday/month histograms and an
//!   hour-by-weekday heatmap
//! - most active users and their share of the conversation
//! - word frequency (with stopwords) and emoji frequency
//! - inferred replies and per-user response latency
//! - lexicon-based sentiment with per-user comparison and a monthly trend
//!
//! Every analysis can be scoped to one participant or the whole chat.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatlens::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let table = TranscriptParser::new().parse("WhatsApp Chat.txt")?;
//!
//!     let report = Analyzer::new(Stopwords::bundled())
//!         .analyze(&table, &UserFilter::user("Alice"))?;
//!
//!     println!("{} messages", report.headline.message_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`TranscriptParser`](parser::TranscriptParser), raw text to [`ChatTable`]
//! - [`parsing`] - line normalization and header grammar
//! - [`table`] - [`ChatTable`] and [`Record`](table::Record) with derived time fields
//! - [`temporal`] - calendar features and hour buckets
//! - [`config`] - [`ParserConfig`](config::ParserConfig), [`AnalysisConfig`](config::AnalysisConfig)
//! - [`core`] - the analyses
//!   - [`core::filter`] - [`UserFilter`](core::filter::UserFilter), [`DateRange`](core::filter::DateRange)
//!   - [`core::stats`] - counts, timelines, heatmap, contributors
//!   - [`core::lexical`] - stopwords, word and emoji frequency
//!   - [`core::response`] - reply inference and latency
//!   - [`core::sentiment`] - polarity scoring and summaries
//!   - [`core::report`] - [`Analyzer`](core::report::Analyzer), everything in one call
//!   - [`core::output`] - CSV, JSON and JSONL writers
//! - [`format`] - output format selection
//! - [`error`] - [`ChatlensError`], [`Result`]
//! - [`prelude`] - convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsing;
pub mod table;
pub mod temporal;

pub use error::{ChatlensError, Result};
pub use message::Message;
pub use table::ChatTable;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{ChatTable, Message};

    pub use crate::error::{ChatlensError, Result};

    pub use crate::config::{AnalysisConfig, DateOrder, ParserConfig};
    pub use crate::parser::TranscriptParser;
    pub use crate::table::Record;

    pub use crate::core::filter::{DateRange, UserFilter};
    pub use crate::core::lexical::Stopwords;
    pub use crate::core::report::{AnalysisReport, Analyzer};

    pub use crate::format::{OutputFormat, write_to_format};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
}
