//! Counting and grouping over a [`ChatTable`].
//!
//! Every function here is pure: it takes the table plus a [`UserFilter`] and
//! returns a new view. Nothing is cached on the table.

use std::collections::{BTreeMap, HashMap};

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::core::filter::UserFilter;
use crate::core::lexical::UrlFinder;
use crate::table::{ChatTable, Record};
use crate::temporal::hour_bucket;

/// A label with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

impl LabelCount {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Counts labels, keeping the order in which each label first appeared.
pub(crate) fn tally<I, S>(labels: I) -> Vec<LabelCount>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<LabelCount> = Vec::new();

    for label in labels {
        let label = label.as_ref();
        if let Some(&i) = index.get(label) {
            out[i].count += 1;
        } else {
            index.insert(label.to_string(), out.len());
            out.push(LabelCount::new(label, 1));
        }
    }
    out
}

/// Sorts by count descending. The sort is stable, so ties keep first-seen order.
pub(crate) fn ranked(mut counts: Vec<LabelCount>) -> Vec<LabelCount> {
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Headline numbers for a scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlineStats {
    /// All records in scope, notifications included.
    pub message_count: usize,
    /// Whitespace-separated tokens over every body.
    pub word_count: usize,
    /// Bodies that are exactly the media placeholder.
    pub media_count: usize,
    pub link_count: usize,
    /// First human message as `"author: body: timestamp"`.
    pub first_message: Option<String>,
    /// Last human message as `"author: body: timestamp"`.
    pub last_message: Option<String>,
}

/// Computes message, word, media and link counts plus the first and last
/// human messages.
pub fn headline_stats(table: &ChatTable, filter: &UserFilter, urls: &dyn UrlFinder) -> HeadlineStats {
    let mut stats = HeadlineStats::default();
    let mut first: Option<&Record> = None;
    let mut last: Option<&Record> = None;

    for record in table.scoped(filter) {
        stats.message_count += 1;
        stats.word_count += record.body().split_whitespace().count();
        if record.is_media() {
            stats.media_count += 1;
        }
        stats.link_count += urls.find_urls(record.body()).len();

        if !record.is_notification() {
            first.get_or_insert(record);
            last = Some(record);
        }
    }

    stats.first_message = first.map(|r| r.summary_line());
    stats.last_message = last.map(|r| r.summary_line());
    stats
}

/// One bucket of the monthly timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub year: i32,
    pub month: String,
    pub month_num: u32,
    pub count: usize,
    /// `"MonthName-Year"`, e.g. `"January-2024"`.
    pub label: String,
}

/// Messages per calendar month, oldest first.
pub fn monthly_timeline(table: &ChatTable, filter: &UserFilter) -> Vec<TimelinePoint> {
    let mut buckets: BTreeMap<(i32, u32), (String, usize)> = BTreeMap::new();
    for record in table.scoped(filter) {
        let t = &record.temporal;
        buckets
            .entry((t.year, t.month_num))
            .or_insert_with(|| (t.month.clone(), 0))
            .1 += 1;
    }

    buckets
        .into_iter()
        .map(|((year, month_num), (month, count))| TimelinePoint {
            label: format!("{month}-{year}"),
            year,
            month,
            month_num,
            count,
        })
        .collect()
}

/// Messages per weekday name, in order of first appearance.
pub fn weekday_activity(table: &ChatTable, filter: &UserFilter) -> Vec<LabelCount> {
    tally(table.scoped(filter).map(|r| r.temporal.day_name.as_str()))
}

/// Messages per month name, in order of first appearance.
pub fn month_activity(table: &ChatTable, filter: &UserFilter) -> Vec<LabelCount> {
    tally(table.scoped(filter).map(|r| r.temporal.month.as_str()))
}

/// Weekday by hour-bucket message counts.
///
/// Rows are weekdays Monday to Sunday and columns are hour buckets from
/// midnight onwards; only rows and columns with at least one message are
/// present. Missing combinations are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heatmap {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    /// `cells[row][column]`
    pub cells: Vec<Vec<usize>>,
}

impl Heatmap {
    /// Looks up a cell by labels. Unknown labels count as zero.
    pub fn get(&self, day: &str, period: &str) -> usize {
        let row = self.rows.iter().position(|r| r == day);
        let col = self.columns.iter().position(|c| c == period);
        match (row, col) {
            (Some(r), Some(c)) => self.cells[r][c],
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn activity_heatmap(table: &ChatTable, filter: &UserFilter) -> Heatmap {
    let mut counts: BTreeMap<(u32, u32), usize> = BTreeMap::new();
    let mut days: BTreeMap<u32, String> = BTreeMap::new();
    let mut hours: BTreeMap<u32, String> = BTreeMap::new();

    for record in table.scoped(filter) {
        let day = weekday_index(&record.temporal.day_name);
        let hour = record.temporal.hour;
        *counts.entry((day, hour)).or_default() += 1;
        days.entry(day).or_insert_with(|| record.temporal.day_name.clone());
        hours.entry(hour).or_insert_with(|| hour_bucket(hour));
    }

    let cells = days
        .keys()
        .map(|day| {
            hours
                .keys()
                .map(|hour| counts.get(&(*day, *hour)).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    Heatmap {
        rows: days.into_values().collect(),
        columns: hours.into_values().collect(),
        cells,
    }
}

fn weekday_index(name: &str) -> u32 {
    name.parse::<Weekday>().map_or(7, |w| w.num_days_from_monday())
}

/// The `n` most active authors, most messages first.
///
/// Ties keep the order in which authors first appear in the transcript.
pub fn top_contributors(table: &ChatTable, filter: &UserFilter, n: usize) -> Vec<LabelCount> {
    let mut counts = ranked(tally(table.scoped(filter).map(|r| r.author())));
    counts.truncate(n);
    counts
}

/// An author's share of the scoped messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributorShare {
    pub user: String,
    /// Percentage of all scoped messages, rounded to two decimals.
    pub percent: f64,
}

/// Every author with their percentage of messages, largest first.
pub fn contributor_shares(table: &ChatTable, filter: &UserFilter) -> Vec<ContributorShare> {
    let counts = ranked(tally(table.scoped(filter).map(|r| r.author())));
    let total: usize = counts.iter().map(|c| c.count).sum();
    if total == 0 {
        return Vec::new();
    }

    counts
        .into_iter()
        .map(|c| ContributorShare {
            percent: round2(c.count as f64 / total as f64 * 100.0),
            user: c.label,
        })
        .collect()
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
