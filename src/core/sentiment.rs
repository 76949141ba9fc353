//! Message-level sentiment.
//!
//! Scoring itself is a [`PolarityScorer`]: anything that maps text to a
//! compound score in `[-1, 1]`. [`LexiconScorer`] is the built-in one, a
//! small valence lexicon with negation and intensifier handling that
//! normalizes the same way VADER does.
//!
//! [`annotate`] produces [`ScoredMessage`]s without touching the table;
//! every summary below reads from that list.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::filter::UserFilter;
use crate::core::stats::round2;
use crate::error::{ChatlensError, Result};
use crate::table::ChatTable;

/// Links and `@mentions` carry no sentiment.
static SCORING_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:https?://|www\.)\S+|@\w+").expect("valid regex"));

/// Maps text to a compound polarity score in `[-1, 1]`.
pub trait PolarityScorer {
    fn score(&self, text: &str) -> f64;
}

/// Valence on the usual -4..4 scale, one `token valence` pair per line.
const BUNDLED_LEXICON: &str = include_str!("../../assets/sentiment_lexicon.txt");

const BOOSTERS: &[&str] = &[
    "absolutely", "really", "so", "such", "super", "totally", "very", "extremely", "bahut", "bohot",
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "don't", "dont", "doesn't", "didn't", "isn't", "wasn't",
    "can't", "cant", "won't", "nahi", "nahin", "nhi", "mat",
];

const BOOSTER_INCREMENT: f64 = 0.293;
const NEGATION_SCALAR: f64 = -0.74;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const NORMALIZATION_ALPHA: f64 = 15.0;

/// Lexicon-based polarity scorer.
///
/// [`LexiconScorer::new`] uses the bundled lexicon, a minimal default of a
/// few hundred common English and Hinglish words and emoji. Load a fuller
/// list with [`LexiconScorer::from_file`].
///
/// # Example
///
/// ```rust
/// use chatlens::core::sentiment::{LexiconScorer, PolarityScorer};
///
/// let scorer = LexiconScorer::new();
/// assert!(scorer.score("I love this") > 0.5);
/// assert!(scorer.score("not good") < 0.0);
/// assert_eq!(scorer.score("meeting at 5"), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    lexicon: HashMap<String, f64>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    /// Scorer over the bundled lexicon.
    pub fn new() -> Self {
        Self::from_text(BUNDLED_LEXICON)
    }

    /// Parses `token valence` lines. Blank lines and `#` comments are
    /// ignored, as are lines whose valence is not a number.
    pub fn from_text(text: &str) -> Self {
        let mut lexicon = HashMap::new();
        let mut malformed = 0usize;
        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next().and_then(|v| v.parse::<f64>().ok())) {
                (Some(token), Some(valence)) => {
                    lexicon.insert(token.to_lowercase(), valence);
                }
                _ => malformed += 1,
            }
        }
        if malformed > 0 {
            tracing::warn!(malformed, "skipped malformed lexicon lines");
        }
        Self { lexicon }
    }

    /// Loads a lexicon from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::MissingResource`] if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ChatlensError::missing_resource("sentiment lexicon", path, e))?;
        let scorer = Self::from_text(&text);
        tracing::debug!(path = %path.display(), words = scorer.len(), "loaded sentiment lexicon");
        Ok(scorer)
    }

    /// Number of scored tokens.
    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }

    fn valence(&self, tokens: &[String], i: usize) -> Option<f64> {
        let mut v = *self.lexicon.get(tokens[i].as_str())?;

        if i > 0 && BOOSTERS.contains(&tokens[i - 1].as_str()) {
            v += BOOSTER_INCREMENT.copysign(v);
        }
        let window = &tokens[i.saturating_sub(3)..i];
        if window.iter().any(|t| NEGATIONS.contains(&t.as_str())) {
            v *= NEGATION_SCALAR;
        }
        Some(v)
    }
}

impl PolarityScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let tokens: Vec<String> = lowered
            .split_whitespace()
            .map(|t| {
                t.trim_matches(|c: char| c.is_ascii_punctuation() && c != '\'')
                    .to_string()
            })
            .filter(|t| !t.is_empty())
            .collect();

        let mut sum: f64 = (0..tokens.len()).filter_map(|i| self.valence(&tokens, i)).sum();
        if sum == 0.0 {
            return 0.0;
        }

        let bangs = text.matches('!').count().min(4) as f64;
        sum += (bangs * EXCLAMATION_INCREMENT).copysign(sum);

        (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
    }
}

/// Three-way sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    /// `score <= -band` is negative, `score >= band` positive, anything
    /// strictly between is neutral.
    pub fn from_score(score: f64, band: f64) -> Self {
        if score <= -band {
            SentimentLabel::Negative
        } else if score >= band {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Negative => write!(f, "Negative"),
            SentimentLabel::Neutral => write!(f, "Neutral"),
            SentimentLabel::Positive => write!(f, "Positive"),
        }
    }
}

/// A message with its sentiment annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMessage {
    pub timestamp: NaiveDateTime,
    pub author: String,
    /// The original, unstripped body.
    pub body: String,
    pub score: f64,
    pub label: SentimentLabel,
}

/// Scores every human, non-media message.
///
/// Links and mentions are removed before scoring; a message that is empty
/// afterwards is skipped.
pub fn annotate(table: &ChatTable, scorer: &dyn PolarityScorer, band: f64) -> Vec<ScoredMessage> {
    let mut skipped = 0usize;
    let scored: Vec<ScoredMessage> = table
        .records()
        .iter()
        .filter(|r| !r.is_notification() && !r.mentions_media())
        .filter_map(|r| {
            let cleaned = SCORING_NOISE.replace_all(r.body(), "");
            let cleaned = cleaned.trim();
            if cleaned.is_empty() {
                skipped += 1;
                return None;
            }
            let score = scorer.score(cleaned);
            Some(ScoredMessage {
                timestamp: r.timestamp,
                author: r.author().to_string(),
                body: r.body().to_string(),
                score,
                label: SentimentLabel::from_score(score, band),
            })
        })
        .collect();

    tracing::info!(scored = scored.len(), skipped, "annotated sentiment");
    scored
}

/// Messages per label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    pub negative: usize,
    pub neutral: usize,
    pub positive: usize,
}

impl LabelCounts {
    fn add(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Negative => self.negative += 1,
            SentimentLabel::Neutral => self.neutral += 1,
            SentimentLabel::Positive => self.positive += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.negative + self.neutral + self.positive
    }
}

/// Average score and label distribution of a scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub average: f64,
    pub counts: LabelCounts,
}

impl SentimentSummary {
    /// Share of positive messages, in percent.
    pub fn positive_percent(&self) -> f64 {
        self.counts.positive as f64 / self.counts.total() as f64 * 100.0
    }
}

/// Summarizes the scored messages in scope. `None` if there are none.
pub fn summarize(scored: &[ScoredMessage], filter: &UserFilter) -> Option<SentimentSummary> {
    let mut counts = LabelCounts::default();
    let mut total = 0.0;
    for m in scored.iter().filter(|m| filter.matches(&m.author)) {
        counts.add(m.label);
        total += m.score;
    }
    if counts.total() == 0 {
        return None;
    }
    Some(SentimentSummary {
        average: total / counts.total() as f64,
        counts,
    })
}

/// One user's sentiment set against the whole chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentComparison {
    pub user: String,
    pub user_average: f64,
    pub group_average: f64,
    pub user_positive_percent: f64,
    pub group_positive_percent: f64,
    /// `user_average - group_average`
    pub average_delta: f64,
    /// `user_positive_percent - group_positive_percent`
    pub positive_percent_delta: f64,
}

/// Compares a user with everyone. `None` if the user has no scored messages.
pub fn compare_with_group(scored: &[ScoredMessage], user: &str) -> Option<SentimentComparison> {
    let mine = summarize(scored, &UserFilter::user(user))?;
    let group = summarize(scored, &UserFilter::Overall)?;

    let user_positive_percent = round2(mine.positive_percent());
    let group_positive_percent = round2(group.positive_percent());
    Some(SentimentComparison {
        user: user.to_string(),
        user_average: mine.average,
        group_average: group.average,
        user_positive_percent,
        group_positive_percent,
        average_delta: mine.average - group.average,
        positive_percent_delta: user_positive_percent - group_positive_percent,
    })
}

/// Average sentiment of one author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSentiment {
    pub user: String,
    pub average: f64,
    pub messages: usize,
}

/// Authors ranked by average score, most positive first, at most `n`.
/// Ties keep first-seen order.
pub fn sentiment_by_user(scored: &[ScoredMessage], n: usize) -> Vec<UserSentiment> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut sums: Vec<(&str, f64, usize)> = Vec::new();
    for m in scored {
        let i = *index.entry(m.author.as_str()).or_insert_with(|| {
            sums.push((m.author.as_str(), 0.0, 0));
            sums.len() - 1
        });
        sums[i].1 += m.score;
        sums[i].2 += 1;
    }

    let mut ranked: Vec<UserSentiment> = sums
        .into_iter()
        .map(|(user, total, messages)| UserSentiment {
            user: user.to_string(),
            average: total / messages as f64,
            messages,
        })
        .collect();
    ranked.sort_by(|a, b| b.average.total_cmp(&a.average));
    ranked.truncate(n);
    ranked
}

/// The most positive and most negative message of a scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentExtremes {
    pub most_positive: ScoredMessage,
    pub most_negative: ScoredMessage,
}

/// Finds the highest and lowest scoring messages. Ties go to the earliest.
pub fn extreme_messages(scored: &[ScoredMessage], filter: &UserFilter) -> Option<SentimentExtremes> {
    let mut in_scope = scored.iter().filter(|m| filter.matches(&m.author));
    let first = in_scope.next()?;
    let (mut best, mut worst) = (first, first);

    for m in in_scope {
        if m.score > best.score {
            best = m;
        }
        if m.score < worst.score {
            worst = m;
        }
    }

    Some(SentimentExtremes {
        most_positive: best.clone(),
        most_negative: worst.clone(),
    })
}

/// Average sentiment of one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySentiment {
    /// `"Jan-2024"` style label.
    pub label: String,
    pub average: f64,
    pub messages: usize,
}

/// Average score per calendar month, oldest first.
pub fn monthly_trend(scored: &[ScoredMessage], filter: &UserFilter) -> Vec<MonthlySentiment> {
    let mut months: BTreeMap<(i32, u32), (String, f64, usize)> = BTreeMap::new();
    for m in scored.iter().filter(|m| filter.matches(&m.author)) {
        let entry = months
            .entry((m.timestamp.year(), m.timestamp.month()))
            .or_insert_with(|| (m.timestamp.format("%b-%Y").to_string(), 0.0, 0));
        entry.1 += m.score;
        entry.2 += 1;
    }

    months
        .into_values()
        .map(|(label, sum, n)| MonthlySentiment {
            label,
            average: sum / n as f64,
            messages: n,
        })
        .collect()
}
