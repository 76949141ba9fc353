//! Configuration types for parsing and analysis.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ParserConfig`] - how transcript headers are interpreted
//! - [`AnalysisConfig`] - limits and thresholds of the aggregations
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::{AnalysisConfig, DateOrder, ParserConfig};
//! use chatlens::parser::TranscriptParser;
//!
//! let config = ParserConfig::new().with_date_order(DateOrder::DayFirst);
//! let parser = TranscriptParser::with_config(config);
//!
//! let analysis = AnalysisConfig::new().with_top_words(10);
//! assert!(analysis.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ChatlensError, Result};

/// Order of the day and month fields in a header date.
///
/// Exports write `D/M/YY` or `M/D/YY` depending on the phone's locale and
/// the line itself does not say which.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// Guess from the transcript: day-first if more headers have a first
    /// field above 12 than a second field above 12, month-first otherwise.
    #[default]
    Auto,
    /// `D/M/YY`
    DayFirst,
    /// `M/D/YY`
    MonthFirst,
}

impl std::fmt::Display for DateOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateOrder::Auto => write!(f, "auto"),
            DateOrder::DayFirst => write!(f, "day-first"),
            DateOrder::MonthFirst => write!(f, "month-first"),
        }
    }
}

/// Configuration for transcript parsing.
///
/// # Example
///
/// ```rust
/// use chatlens::config::{DateOrder, ParserConfig};
///
/// let config = ParserConfig::new()
///     .with_date_order(DateOrder::MonthFirst)
///     .with_convert_meridiem(false);
/// assert!(!config.convert_meridiem);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Day/month order of header dates (default: auto-detect)
    pub date_order: DateOrder,

    /// Rewrite `2:30 PM` headers to `14:30` before the marker is stripped
    /// (default: true). When disabled the marker is dropped and the clock
    /// value is taken as-is.
    pub convert_meridiem: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            date_order: DateOrder::Auto,
            convert_meridiem: true,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the day/month order.
    #[must_use]
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }

    /// Enables or disables 12-hour to 24-hour conversion.
    #[must_use]
    pub fn with_convert_meridiem(mut self, enabled: bool) -> Self {
        self.convert_meridiem = enabled;
        self
    }
}

/// Configuration for the aggregation, response-time and sentiment analyses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// How many users the contributor leaderboard keeps (default: 5)
    pub top_users: usize,

    /// How many words the lexical frequency table keeps (default: 20)
    pub top_words: usize,

    /// Quantile of inter-message gaps used as the session threshold (default: 0.90)
    pub session_percentile: f64,

    /// Half-width of the neutral sentiment band (default: 0.05)
    pub neutral_band: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_users: 5,
            top_words: 20,
            session_percentile: 0.90,
            neutral_band: 0.05,
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the contributor leaderboard size.
    #[must_use]
    pub fn with_top_users(mut self, n: usize) -> Self {
        self.top_users = n;
        self
    }

    /// Sets the lexical frequency table size.
    #[must_use]
    pub fn with_top_words(mut self, n: usize) -> Self {
        self.top_words = n;
        self
    }

    /// Sets the session threshold quantile.
    #[must_use]
    pub fn with_session_percentile(mut self, q: f64) -> Self {
        self.session_percentile = q;
        self
    }

    /// Sets the neutral sentiment band.
    #[must_use]
    pub fn with_neutral_band(mut self, band: f64) -> Self {
        self.neutral_band = band;
        self
    }

    /// Checks that every value is in range.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.session_percentile) {
            return Err(ChatlensError::invalid_config(format!(
                "session_percentile must be within [0, 1], got {}",
                self.session_percentile
            )));
        }
        if !(0.0..1.0).contains(&self.neutral_band) {
            return Err(ChatlensError::invalid_config(format!(
                "neutral_band must be within [0, 1), got {}",
                self.neutral_band
            )));
        }
        Ok(())
    }

    /// Loads and validates a configuration from a JSON file.
    ///
    /// Missing keys take their default values.
    #[cfg(feature = "json-output")]
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ChatlensError::missing_resource("config file", path, e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| ChatlensError::invalid_config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }
}
