//! The parsed chat message.
//!
//! This module provides [`Message`], one record per matched transcript line.
//! Every message has exactly one author and one body. Two reserved values
//! carry meaning downstream:
//!
//! - [`GROUP_NOTIFICATION`] as the author marks a system line (joins, leaves,
//!   subject changes) that had no `"Sender: "` prefix.
//! - [`MEDIA_OMITTED`] as the body marks an attachment placeholder.
//!
//! # Examples
//!
//! ```
//! use chatlens::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(14, 30, 0).unwrap();
//! let msg = Message::new(ts, "Alice", "hello");
//!
//! assert_eq!(msg.author(), "Alice");
//! assert!(!msg.is_notification());
//! assert!(!msg.is_media());
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Author assigned to lines without a `"Sender: "` prefix.
pub const GROUP_NOTIFICATION: &str = "group_notification";

/// Body WhatsApp writes in place of an attachment.
pub const MEDIA_OMITTED: &str = "<Media omitted>";

/// A single parsed chat message.
///
/// Timestamps are naive: exports carry no timezone, and every analysis is
/// relative to the transcript's own clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent, as written in the export.
    pub timestamp: NaiveDateTime,

    /// Display name of the sender, or [`GROUP_NOTIFICATION`].
    pub author: String,

    /// Message text. Single line: continuation lines are not attached.
    pub body: String,
}

impl Message {
    /// Creates a new message.
    pub fn new(timestamp: NaiveDateTime, author: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            timestamp,
            author: author.into(),
            body: body.into(),
        }
    }

    /// Creates a system notification with the reserved author.
    pub fn notification(timestamp: NaiveDateTime, body: impl Into<String>) -> Self {
        Self::new(timestamp, GROUP_NOTIFICATION, body)
    }

    /// Returns the author.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns `true` for system-generated lines.
    pub fn is_notification(&self) -> bool {
        self.author == GROUP_NOTIFICATION
    }

    /// Returns `true` if the body is exactly the media placeholder.
    pub fn is_media(&self) -> bool {
        self.body == MEDIA_OMITTED
    }

    /// Returns `true` if the body mentions the media placeholder anywhere.
    ///
    /// Response-time and sentiment analyses use this looser test.
    pub fn mentions_media(&self) -> bool {
        self.body.contains(MEDIA_OMITTED)
    }

    /// Returns `true` if the body contains an `@` mention.
    pub fn has_mention(&self) -> bool {
        self.body.contains('@')
    }

    /// Formats the message as `"author: body: timestamp"`.
    pub fn summary_line(&self) -> String {
        format!(
            "{}: {}: {}",
            self.author,
            self.body,
            self.timestamp.format("%Y-%m-%d %H:%M:%S")
        )
    }
}
