//! Response-time inference.
//!
//! Exports carry no reply metadata, so "who answered whom" is reconstructed
//! from timing alone:
//!
//! 1. Keep human, text-only messages without `@` mentions and order them by
//!    timestamp (stable, so equal timestamps keep export order).
//! 2. Take the gap of every message to its predecessor (the first gap is 0)
//!    and use a high quantile of those gaps as the *session threshold*: a
//!    silence longer than that starts a new conversation.
//! 3. For every message, walk forward while the elapsed time stays within
//!    the threshold. The first message of each other participant in that
//!    window is that participant's reply.
//!
//! The inner walk stops at the first message beyond the threshold, so the
//! cost follows conversation density rather than transcript length.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::stats::round2;
use crate::table::{ChatTable, Record};

/// An inferred reply: `responder` answered a message of `sender`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEdge {
    pub sender: String,
    pub responder: String,
    /// Minutes between the two messages, rounded to two decimals.
    pub latency_minutes: f64,
}

/// Average latency of one participant over a set of edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyStat {
    pub user: String,
    pub average_minutes: f64,
    pub replies: usize,
}

/// Records eligible for reply matching, in chronological order.
pub fn qualifying_records(table: &ChatTable) -> Vec<&Record> {
    let mut records: Vec<&Record> = table
        .records()
        .iter()
        .filter(|r| !r.is_notification() && !r.has_mention() && !r.mentions_media())
        .collect();
    records.sort_by_key(|r| r.timestamp);
    records
}

fn minutes_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_milliseconds() as f64 / 60_000.0
}

/// Gap in minutes from each record to the previous one; the first is 0.
pub fn inter_message_gaps(records: &[&Record]) -> Vec<f64> {
    let mut gaps = Vec::with_capacity(records.len());
    if let Some(first) = records.first() {
        gaps.push(0.0);
        let mut prev = first.timestamp;
        for record in &records[1..] {
            gaps.push(minutes_between(prev, record.timestamp));
            prev = record.timestamp;
        }
    }
    gaps
}

/// The `percentile` quantile of `gaps`, linearly interpolated between the
/// two nearest ranks.
///
/// Returns `None` for an empty slice.
pub fn session_threshold(gaps: &[f64], percentile: f64) -> Option<f64> {
    if gaps.is_empty() {
        return None;
    }
    let mut sorted = gaps.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pos = percentile.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Reply edges together with the session threshold that bounded them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseInference {
    pub edges: Vec<ResponseEdge>,
    /// `None` when fewer than two messages qualified.
    pub threshold_minutes: Option<f64>,
}

/// Infers reply edges across the whole table.
///
/// Fewer than two qualifying messages yields no edges.
pub fn infer_response_edges(table: &ChatTable, percentile: f64) -> Vec<ResponseEdge> {
    infer_responses(table, percentile).edges
}

/// Like [`infer_response_edges`], also reporting the session threshold.
pub fn infer_responses(table: &ChatTable, percentile: f64) -> ResponseInference {
    let records = qualifying_records(table);
    if records.len() < 2 {
        tracing::info!(
            qualifying = records.len(),
            "not enough messages for response-time inference"
        );
        return ResponseInference::default();
    }

    let gaps = inter_message_gaps(&records);
    let Some(threshold) = session_threshold(&gaps, percentile) else {
        return ResponseInference::default();
    };

    let mut edges = Vec::new();
    for (i, sender) in records.iter().enumerate() {
        let mut responded: HashSet<&str> = HashSet::new();

        for reply in &records[i + 1..] {
            let latency = minutes_between(sender.timestamp, reply.timestamp);
            if latency > threshold {
                break;
            }
            if reply.author() != sender.author() && responded.insert(reply.author()) {
                edges.push(ResponseEdge {
                    sender: sender.author().to_string(),
                    responder: reply.author().to_string(),
                    latency_minutes: round2(latency),
                });
            }
        }
    }

    tracing::info!(
        qualifying = records.len(),
        threshold_minutes = threshold,
        edges = edges.len(),
        "inferred response edges"
    );
    ResponseInference {
        edges,
        threshold_minutes: Some(threshold),
    }
}

/// Averages latency per key, fastest first. Ties keep first-seen order.
fn average_by<'a, F>(edges: impl Iterator<Item = &'a ResponseEdge>, key: F) -> Vec<LatencyStat>
where
    F: Fn(&'a ResponseEdge) -> &'a str,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut sums: Vec<(&str, f64, usize)> = Vec::new();

    for edge in edges {
        let user = key(edge);
        let i = *index.entry(user).or_insert_with(|| {
            sums.push((user, 0.0, 0));
            sums.len() - 1
        });
        sums[i].1 += edge.latency_minutes;
        sums[i].2 += 1;
    }

    let mut stats: Vec<(&str, f64, usize)> = sums
        .into_iter()
        .map(|(user, total, n)| (user, total / n as f64, n))
        .collect();
    stats.sort_by(|a, b| a.1.total_cmp(&b.1));

    stats
        .into_iter()
        .map(|(user, mean, replies)| LatencyStat {
            user: user.to_string(),
            average_minutes: round2(mean),
            replies,
        })
        .collect()
}

/// Responders ranked by average reply latency, fastest first.
pub fn responder_leaderboard(edges: &[ResponseEdge]) -> Vec<LatencyStat> {
    average_by(edges.iter(), |e| e.responder.as_str())
}

/// How fast `user` replies to each sender, fastest first.
pub fn user_response_profile(edges: &[ResponseEdge], user: &str) -> Vec<LatencyStat> {
    average_by(
        edges.iter().filter(|e| e.responder == user),
        |e| e.sender.as_str(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{MEDIA_OMITTED, Message};
    use chrono::{Duration, NaiveDate};

    fn base() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn table(rows: &[(i64, &str, &str)]) -> ChatTable {
        ChatTable::from_messages(
            rows.iter()
                .map(|(min, author, body)| {
                    Message::new(base() + Duration::minutes(*min), *author, *body)
                })
                .collect(),
        )
    }

    fn pairs(edges: &[ResponseEdge]) -> Vec<(&str, &str, f64)> {
        edges
            .iter()
            .map(|e| (e.sender.as_str(), e.responder.as_str(), e.latency_minutes))
            .collect()
    }

    #[test]
    fn test_session_threshold_interpolates() {
        let t = session_threshold(&[0.0, 1.0, 1.0, 60.0], 0.9).unwrap();
        assert!((t - 42.3).abs() < 1e-9);
        assert_eq!(session_threshold(&[5.0], 0.9), Some(5.0));
        assert_eq!(session_threshold(&[], 0.9), None);
        assert_eq!(session_threshold(&[3.0, 1.0, 2.0], 0.0), Some(1.0));
        assert_eq!(session_threshold(&[3.0, 1.0, 2.0], 1.0), Some(3.0));
    }

    #[test]
    fn test_gaps_start_at_zero() {
        let t = table(&[(0, "A", "x"), (5, "B", "y"), (7, "A", "z")]);
        let records = qualifying_records(&t);
        assert_eq!(inter_message_gaps(&records), vec![0.0, 5.0, 2.0]);
    }

    #[test]
    fn test_early_exit_past_threshold() {
        // gaps [0, 1, 1, 60] -> threshold 42.3
        let t = table(&[(0, "A", "q"), (1, "B", "r"), (2, "C", "s"), (62, "A", "t")]);
        let edges = infer_response_edges(&t, 0.9);
        assert_eq!(
            pairs(&edges),
            vec![("A", "B", 1.0), ("A", "C", 2.0), ("B", "C", 1.0)]
        );
    }

    #[test]
    fn test_inference_reports_threshold() {
        let t = table(&[(0, "A", "q"), (1, "B", "r"), (2, "C", "s"), (62, "A", "t")]);
        let inferred = infer_responses(&t, 0.9);
        let threshold = inferred.threshold_minutes.unwrap();
        assert!((threshold - 42.3).abs() < 1e-9);
        assert_eq!(inferred.edges, infer_response_edges(&t, 0.9));

        assert_eq!(infer_responses(&table(&[(0, "A", "solo")]), 0.9).threshold_minutes, None);
        assert_eq!(infer_responses(&ChatTable::default(), 0.9), ResponseInference::default());
    }

    #[test]
    fn test_early_exit_blocks_later_authors() {
        let t = table(&[(0, "A", "q"), (1, "B", "r"), (2, "C", "s"), (62, "D", "t")]);
        let edges = infer_response_edges(&t, 0.9);
        assert!(edges.iter().all(|e| e.responder != "D"));
    }

    #[test]
    fn test_single_edge_per_responder() {
        // gaps [0, 1, 1, 1, 97] -> threshold 58.6
        let t = table(&[
            (0, "A", "question"),
            (1, "B", "first"),
            (2, "B", "second"),
            (3, "C", "third"),
            (100, "D", "late"),
        ]);
        let edges = infer_response_edges(&t, 0.9);
        let from_a: Vec<_> = edges.iter().filter(|e| e.sender == "A").collect();
        assert_eq!(from_a.len(), 2);
        assert_eq!(from_a[0].responder, "B");
        assert!((from_a[0].latency_minutes - 1.0).abs() < 1e-9);
        assert_eq!(from_a[1].responder, "C");
    }

    #[test]
    fn test_filters_notifications_mentions_media() {
        let mut msgs = vec![
            Message::new(base(), "A", "hi"),
            Message::notification(base() + Duration::minutes(1), "B joined"),
            Message::new(base() + Duration::minutes(2), "B", "@A hello"),
            Message::new(base() + Duration::minutes(3), "C", MEDIA_OMITTED),
            Message::new(base() + Duration::minutes(4), "D", "hey"),
        ];
        msgs.push(Message::new(base() + Duration::minutes(5), "A", "yo"));
        let t = ChatTable::from_messages(msgs);

        let authors: Vec<_> = qualifying_records(&t).iter().map(|r| r.author()).collect();
        assert_eq!(authors, vec!["A", "D", "A"]);
    }

    #[test]
    fn test_sorts_out_of_order_input_stably() {
        let t = table(&[(5, "B", "later"), (0, "A", "first"), (5, "C", "tie")]);
        let authors: Vec<_> = qualifying_records(&t).iter().map(|r| r.author()).collect();
        assert_eq!(authors, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_insufficient_data() {
        assert!(infer_response_edges(&ChatTable::default(), 0.9).is_empty());
        assert!(infer_response_edges(&table(&[(0, "A", "solo")]), 0.9).is_empty());
    }

    #[test]
    fn test_leaderboard_and_profile() {
        let edges = vec![
            ResponseEdge { sender: "A".into(), responder: "B".into(), latency_minutes: 4.0 },
            ResponseEdge { sender: "C".into(), responder: "B".into(), latency_minutes: 2.0 },
            ResponseEdge { sender: "A".into(), responder: "C".into(), latency_minutes: 1.0 },
            ResponseEdge { sender: "A".into(), responder: "B".into(), latency_minutes: 6.0 },
        ];

        let board = responder_leaderboard(&edges);
        assert_eq!(board[0].user, "C");
        assert_eq!(board[1].user, "B");
        assert!((board[1].average_minutes - 4.0).abs() < 1e-9);
        assert_eq!(board[1].replies, 3);

        let profile = user_response_profile(&edges, "B");
        assert_eq!(profile.len(), 2);
        assert_eq!(profile[0].user, "C");
        assert!((profile[1].average_minutes - 5.0).abs() < 1e-9);

        assert!(user_response_profile(&edges, "Z").is_empty());
        assert!(responder_leaderboard(&[]).is_empty());
    }
}
