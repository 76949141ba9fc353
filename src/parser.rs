//! Transcript parser: raw export text to [`ChatTable`].
//!
//! Parsing runs in three steps:
//!
//! 1. every line goes through the [`LineNormalizer`];
//! 2. lines matching the `DATE, TIME - REST` grammar become headers, all
//!    others are dropped (continuation lines, blank lines, corrupted input);
//! 3. the transcript's day/month order is resolved once, then each header
//!    becomes a [`Message`] with its author split off.
//!
//! Export order is kept as-is. A transcript without a single matching line
//! parses to an empty table, which callers present as "invalid or empty".
//!
//! # Example
//!
//! ```rust
//! use chatlens::parser::TranscriptParser;
//!
//! let table = TranscriptParser::new().parse_str(
//!     "5/1/24, 2:30 PM - Alice: hello\n\
//!      5/1/24, 2:31 PM - Bob joined using this group's invite link",
//! );
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.records()[0].author(), "Alice");
//! assert_eq!(table.records()[0].temporal.hour, 14);
//! assert!(table.records()[1].is_notification());
//! ```

use std::path::Path;

use crate::config::{DateOrder, ParserConfig};
use crate::error::Result;
use crate::message::Message;
use crate::parsing::{
    Header, LineNormalizer, detect_date_order, header_timestamp, match_header, split_author,
};
use crate::table::ChatTable;

/// Parser for WhatsApp TXT exports.
#[derive(Debug, Clone, Default)]
pub struct TranscriptParser {
    config: ParserConfig,
}

impl TranscriptParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Reads and parses an export file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not UTF-8.
    pub fn parse(&self, path: impl AsRef<Path>) -> Result<ChatTable> {
        let bytes = std::fs::read(path.as_ref())?;
        self.parse_bytes(&bytes)
    }

    /// Parses raw uploaded bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::Utf8`](crate::ChatlensError::Utf8) if the
    /// input is not valid UTF-8.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ChatTable> {
        let content = String::from_utf8(bytes.to_vec())?;
        Ok(self.parse_str(&content))
    }

    /// Parses an export held in memory.
    pub fn parse_str(&self, content: &str) -> ChatTable {
        self.parse_lines(content.lines())
    }

    /// Parses already split lines.
    pub fn parse_lines<I, S>(&self, lines: I) -> ChatTable
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalizer = LineNormalizer::new().with_convert_meridiem(self.config.convert_meridiem);
        let normalized = normalizer.normalize_lines(lines);

        let headers: Vec<Header<'_>> = normalized.iter().filter_map(|l| match_header(l)).collect();
        let dropped_lines = normalized.len() - headers.len();

        let order = match self.config.date_order {
            DateOrder::Auto => detect_date_order(&headers),
            fixed => fixed,
        };

        let mut messages = Vec::with_capacity(headers.len());
        for header in &headers {
            let Some(timestamp) = header_timestamp(header, order) else {
                tracing::debug!(
                    day_or_month = header.first,
                    month_or_day = header.second,
                    year = header.year,
                    "dropping header with impossible date or time"
                );
                continue;
            };
            let (author, body) = split_author(header.rest);
            messages.push(Message::new(timestamp, author, body));
        }

        let out_of_order = messages
            .windows(2)
            .filter(|pair| pair[1].timestamp < pair[0].timestamp)
            .count();
        if out_of_order > 0 {
            tracing::debug!(out_of_order, "timestamps go backwards; export order kept");
        }

        tracing::info!(
            lines = normalized.len(),
            messages = messages.len(),
            dropped_lines,
            date_order = %order,
            "parsed transcript"
        );

        ChatTable::from(messages)
    }
}
