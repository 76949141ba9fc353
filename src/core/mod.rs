//! Analyses over a parsed [`ChatTable`](crate::ChatTable).
//!
//! This module contains:
//! - [`filter`] - user scope and date window
//! - [`stats`] - headline counts, timelines, histograms, contributors
//! - [`lexical`] - stopwords, word and emoji frequency
//! - [`response`] - reply inference and response latency
//! - [`sentiment`] - polarity scoring and aggregation
//! - [`report`] - every analysis in one call
//! - [`output`] - format writers (CSV, JSON, JSONL)
//!
//! All analyses take a [`UserFilter`]; `UserFilter::Overall` means the
//! whole chat.

pub mod filter;
pub mod lexical;
pub mod output;
pub mod report;
pub mod response;
pub mod sentiment;
pub mod stats;

pub use filter::{DateRange, OVERALL, UserFilter};
pub use lexical::{EmojiExtractor, Stopwords, UrlFinder};
pub use report::{AnalysisReport, Analyzer};
pub use sentiment::PolarityScorer;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
