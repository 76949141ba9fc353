//! Scope selection for analyses.
//!
//! - [`UserFilter`] picks one author or the whole chat (`"Overall"`).
//! - [`DateRange`] narrows a table to an inclusive calendar window.
//!
//! # Examples
//!
//! ## Filter by user
//!
//! ```
//! use chatlens::core::filter::UserFilter;
//!
//! assert_eq!(UserFilter::from("Overall"), UserFilter::Overall);
//! assert!(UserFilter::from("Alice").matches("Alice"));
//! assert!(!UserFilter::from("Alice").matches("Bob"));
//! ```
//!
//! ## Filter by date range
//!
//! ```
//! use chatlens::core::filter::DateRange;
//!
//! # fn main() -> chatlens::Result<()> {
//! let range = DateRange::new()
//!     .with_date_from("2024-06-01")?
//!     .with_date_to("2024-12-31")?;
//! assert!(range.is_active());
//! # Ok(())
//! # }
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ChatlensError;

/// Sentinel user name meaning "no filter".
pub const OVERALL: &str = "Overall";

/// Selects which author's records an aggregation looks at.
///
/// Matching is exact: display names in exports are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UserFilter {
    /// The full table.
    #[default]
    Overall,
    /// Only records written by this author.
    User(String),
}

impl UserFilter {
    /// Creates a single-user filter.
    pub fn user(name: impl Into<String>) -> Self {
        UserFilter::User(name.into())
    }

    /// Returns `true` if an author passes the filter.
    pub fn matches(&self, author: &str) -> bool {
        match self {
            UserFilter::Overall => true,
            UserFilter::User(name) => name == author,
        }
    }

    /// Returns the selected user, if any.
    pub fn as_user(&self) -> Option<&str> {
        match self {
            UserFilter::Overall => None,
            UserFilter::User(name) => Some(name),
        }
    }
}

impl From<&str> for UserFilter {
    fn from(name: &str) -> Self {
        if name == OVERALL {
            UserFilter::Overall
        } else {
            UserFilter::User(name.to_string())
        }
    }
}

impl std::fmt::Display for UserFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserFilter::Overall => write!(f, "{OVERALL}"),
            UserFilter::User(name) => write!(f, "{name}"),
        }
    }
}

/// Inclusive date window over message timestamps.
///
/// Both bounds are optional; an empty range keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Include only messages on or after this instant.
    pub after: Option<NaiveDateTime>,

    /// Include only messages on or before this instant.
    pub before: Option<NaiveDateTime>,
}

impl DateRange {
    /// Creates an open range.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date (inclusive, `YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        let date = parse_date(date_str)?;
        self.after = Some(date.and_time(chrono::NaiveTime::MIN));
        Ok(self)
    }

    /// Sets the end date (inclusive, `YYYY-MM-DD`), up to 23:59:59.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        let date = parse_date(date_str)?;
        let end = date
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| ChatlensError::invalid_date(date_str))?;
        self.before = Some(end);
        Ok(self)
    }

    /// Sets the start instant directly.
    #[must_use]
    pub fn with_after(mut self, dt: NaiveDateTime) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end instant directly.
    #[must_use]
    pub fn with_before(mut self, dt: NaiveDateTime) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if either bound is set.
    pub fn is_active(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if `ts` lies inside the range.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        if self.after.is_some_and(|after| ts < after) {
            return false;
        }
        if self.before.is_some_and(|before| ts > before) {
            return false;
        }
        true
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate, ChatlensError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| ChatlensError::invalid_date(date_str))
}
