//! The parsed record table.
//!
//! [`ChatTable`] is the single value every analysis reads from. It is built
//! once per transcript, keeps export order, and is never mutated: filters and
//! annotations produce new views instead.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::filter::{DateRange, UserFilter};
use crate::message::Message;
use crate::temporal::TemporalFeatures;

/// A message together with its derived calendar features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(flatten)]
    pub message: Message,
    #[serde(flatten)]
    pub temporal: TemporalFeatures,
}

impl Record {
    /// Builds a record, deriving its calendar features.
    pub fn new(message: Message) -> Self {
        let temporal = TemporalFeatures::from_timestamp(message.timestamp);
        Self { message, temporal }
    }
}

impl std::ops::Deref for Record {
    type Target = Message;

    fn deref(&self) -> &Message {
        &self.message
    }
}

/// Ordered, immutable table of parsed messages.
///
/// # Example
///
/// ```rust
/// use chatlens::{ChatTable, Message};
/// use chatlens::core::filter::UserFilter;
/// use chrono::NaiveDate;
///
/// let ts = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let table = ChatTable::from_messages(vec![
///     Message::new(ts, "Alice", "hi"),
///     Message::new(ts, "Bob", "hey"),
/// ]);
///
/// assert_eq!(table.users(), vec!["Alice", "Bob"]);
/// assert_eq!(table.scoped(&UserFilter::user("Bob")).count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTable {
    records: Vec<Record>,
}

impl ChatTable {
    /// Builds a table from messages in export order.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self {
            records: messages.into_iter().map(Record::new).collect(),
        }
    }

    /// Returns all records in export order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when nothing was parsed ("invalid or empty file").
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct human authors, sorted, without the notification sentinel.
    pub fn users(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| !r.is_notification())
            .map(|r| r.author())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Iterates the records selected by a user filter, in export order.
    pub fn scoped<'a>(&'a self, filter: &'a UserFilter) -> impl Iterator<Item = &'a Record> + 'a {
        self.records.iter().filter(move |r| filter.matches(r.author()))
    }

    /// Returns a new table restricted to a date range.
    pub fn within(&self, range: &DateRange) -> Self {
        if !range.is_active() {
            return self.clone();
        }
        Self {
            records: self
                .records
                .iter()
                .filter(|r| range.contains(r.timestamp))
                .cloned()
                .collect(),
        }
    }
}

impl From<Vec<Message>> for ChatTable {
    fn from(messages: Vec<Message>) -> Self {
        Self::from_messages(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn sample() -> ChatTable {
        ChatTable::from_messages(vec![
            Message::notification(at(1), "Carol created group"),
            Message::new(at(2), "Bob", "hi"),
            Message::new(at(3), "Alice", "hello"),
            Message::new(at(4), "Bob", "bye"),
        ])
    }

    #[test]
    fn test_users_sorted_without_notifications() {
        assert_eq!(sample().users(), vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_scoped_overall_and_user() {
        let table = sample();
        assert_eq!(table.scoped(&UserFilter::Overall).count(), 4);
        let bob_filter = UserFilter::user("Bob");
        let bob: Vec<_> = table.scoped(&bob_filter).collect();
        assert_eq!(bob.len(), 2);
        assert_eq!(bob[1].body(), "bye");
    }

    #[test]
    fn test_records_carry_features() {
        let table = sample();
        assert_eq!(table.records()[1].temporal.day, 2);
        assert_eq!(table.records()[1].temporal.period, "12-00");
    }

    #[test]
    fn test_within_date_range() {
        let range = DateRange::new()
            .with_date_from("2024-06-02")
            .unwrap()
            .with_date_to("2024-06-03")
            .unwrap();
        let narrowed = sample().within(&range);
        assert_eq!(narrowed.len(), 2);
        assert_eq!(narrowed.records()[0].author(), "Bob");
    }

    #[test]
    fn test_empty_table() {
        let table = ChatTable::default();
        assert!(table.is_empty());
        assert!(table.users().is_empty());
    }
}
