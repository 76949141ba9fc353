//! Header grammar for normalized WhatsApp export lines.
//!
//! A message line looks like `DATE, TIME - REST` where
//! - `DATE` is `D/M/YY`, `D/M/YYYY` or the same with `-` separators,
//! - `TIME` is `H:MM`, `HH:MM` or `HH:MM:SS` on a 24-hour clock,
//! - `REST` is either `Sender: text` or a bare system notice.
//!
//! Day/month order is not encoded in the line. [`detect_date_order`] scores
//! the whole transcript the same way format detection scores sample lines.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::config::DateOrder;
use crate::message::GROUP_NOTIFICATION;

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{1,2})[/-](\d{1,2})[/-](\d{4}|\d{2}),\s(\d{1,2}):(\d{2})(?::(\d{2}))?\s-\s(.+)$",
    )
    .expect("valid regex")
});

/// Shortest run of non-colon characters followed by `": "`.
static AUTHOR_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^([^:]+?): (.*)$").expect("valid regex"));

/// The pieces of a matched header, before calendar validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    /// First numeric date field (day or month).
    pub first: u32,
    /// Second numeric date field (month or day).
    pub second: u32,
    /// Four-digit year.
    pub year: i32,
    pub hour: u32,
    pub minute: u32,
    pub sec: u32,
    /// Everything after the ` - ` separator.
    pub rest: &'a str,
}

/// Matches a normalized line against the header grammar.
///
/// Returns `None` for continuation lines, blank lines and anything else
/// that does not start with a date and time.
pub fn match_header(line: &str) -> Option<Header<'_>> {
    let caps = HEADER.captures(line)?;
    let num = |i: usize| caps.get(i).map_or("0", |m| m.as_str());

    let year_raw = num(3);
    let year: i32 = year_raw.parse().ok()?;
    let year = if year_raw.len() == 2 { 2000 + year } else { year };

    Some(Header {
        first: num(1).parse().ok()?,
        second: num(2).parse().ok()?,
        year,
        hour: num(4).parse().ok()?,
        minute: num(5).parse().ok()?,
        sec: num(6).parse().ok()?,
        rest: caps.get(7)?.as_str(),
    })
}

/// Decides the day/month order for a whole transcript.
///
/// Each header whose first field cannot be a month votes day-first, each
/// whose second field cannot be a month votes month-first. Ties, including
/// the all-ambiguous case, resolve to month-first.
pub fn detect_date_order(headers: &[Header<'_>]) -> DateOrder {
    let day_first_votes = headers.iter().filter(|h| h.first > 12).count();
    let month_first_votes = headers.iter().filter(|h| h.second > 12).count();

    if day_first_votes > month_first_votes {
        DateOrder::DayFirst
    } else {
        DateOrder::MonthFirst
    }
}

/// Builds the timestamp for a header.
///
/// `order` must be resolved (not [`DateOrder::Auto`]); if it yields an
/// impossible date the other order is tried before giving up.
pub fn header_timestamp(header: &Header<'_>, order: DateOrder) -> Option<NaiveDateTime> {
    let (day_first, month_first) = (
        (header.first, header.second),
        (header.second, header.first),
    );
    let candidates = match order {
        DateOrder::DayFirst => [day_first, month_first],
        DateOrder::MonthFirst | DateOrder::Auto => [month_first, day_first],
    };

    candidates.into_iter().find_map(|(day, month)| {
        NaiveDate::from_ymd_opt(header.year, month, day)?.and_hms_opt(
            header.hour,
            header.minute,
            header.sec,
        )
    })
}

/// Splits `REST` into `(author, body)`.
///
/// Without a `"Sender: "` prefix the whole text is the body and the author
/// is [`GROUP_NOTIFICATION`].
pub fn split_author(rest: &str) -> (&str, &str) {
    match AUTHOR_PREFIX.captures(rest) {
        Some(caps) => match (caps.get(1), caps.get(2)) {
            (Some(author), Some(body)) => (author.as_str(), body.as_str()),
            _ => (GROUP_NOTIFICATION, rest),
        },
        None => (GROUP_NOTIFICATION, rest),
    }
}
