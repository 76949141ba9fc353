//! One-call analysis of a parsed table.
//!
//! [`Analyzer`] owns the injected capabilities (URL finder, emoji extractor,
//! polarity scorer, stopwords) and the [`AnalysisConfig`]. It is built once
//! and can analyze any number of tables and scopes.
//!
//! # Example
//!
//! ```rust
//! use chatlens::core::filter::UserFilter;
//! use chatlens::core::lexical::Stopwords;
//! use chatlens::core::report::Analyzer;
//! use chatlens::parser::TranscriptParser;
//!
//! # fn main() -> chatlens::Result<()> {
//! let table = TranscriptParser::new().parse_str(
//!     "5/1/24, 14:30 - Alice: hello\n5/1/24, 14:31 - Bob: great to see you",
//! );
//! let analyzer = Analyzer::new(Stopwords::bundled());
//! let report = analyzer.analyze(&table, &UserFilter::Overall)?;
//!
//! assert_eq!(report.headline.message_count, 2);
//! assert_eq!(report.users, vec!["Alice", "Bob"]);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::core::filter::UserFilter;
use crate::core::lexical::{
    EmojiExtractor, RegexEmojiExtractor, RegexUrlFinder, Stopwords, UrlFinder, emoji_frequency,
    word_frequency,
};
use crate::core::response::{
    LatencyStat, infer_responses, responder_leaderboard, user_response_profile,
};
use crate::core::sentiment::{
    LexiconScorer, MonthlySentiment, PolarityScorer, SentimentComparison, SentimentExtremes,
    SentimentSummary, UserSentiment, annotate, compare_with_group, extreme_messages,
    monthly_trend, sentiment_by_user, summarize,
};
use crate::core::stats::{
    ContributorShare, HeadlineStats, Heatmap, LabelCount, TimelinePoint, activity_heatmap,
    contributor_shares, headline_stats, month_activity, monthly_timeline, round2,
    top_contributors, weekday_activity,
};
use crate::error::{ChatlensError, Result};
use crate::table::ChatTable;

/// Every analysis for one scope.
///
/// Analyses without enough data are `None` or empty rather than errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// `"Overall"` or the selected user.
    pub scope: String,
    /// All human authors in the transcript.
    pub users: Vec<String>,
    pub headline: HeadlineStats,
    pub monthly_timeline: Vec<TimelinePoint>,
    pub weekday_activity: Vec<LabelCount>,
    pub month_activity: Vec<LabelCount>,
    pub heatmap: Heatmap,
    /// Only filled for the `"Overall"` scope.
    pub top_contributors: Vec<LabelCount>,
    /// Only filled for the `"Overall"` scope.
    pub contributor_shares: Vec<ContributorShare>,
    pub top_words: Vec<LabelCount>,
    pub emoji: Vec<LabelCount>,
    /// Number of inferred replies across the whole chat.
    pub response_edges: usize,
    /// Silence that ends a conversation, in minutes; `None` with fewer
    /// than two qualifying messages.
    pub session_threshold_minutes: Option<f64>,
    pub response_leaderboard: Vec<LatencyStat>,
    /// Who the selected user answers fastest; `None` for `"Overall"`.
    pub response_profile: Option<Vec<LatencyStat>>,
    pub sentiment: Option<SentimentSummary>,
    pub sentiment_comparison: Option<SentimentComparison>,
    pub sentiment_extremes: Option<SentimentExtremes>,
    pub sentiment_trend: Vec<MonthlySentiment>,
    /// Authors with the highest average sentiment. Only filled for the
    /// `"Overall"` scope.
    pub positive_contributors: Vec<UserSentiment>,
}

/// Runs every analysis with a fixed set of capabilities.
pub struct Analyzer {
    urls: Box<dyn UrlFinder>,
    emoji: Box<dyn EmojiExtractor>,
    scorer: Box<dyn PolarityScorer>,
    stopwords: Stopwords,
    config: AnalysisConfig,
}

impl Analyzer {
    /// Creates an analyzer with the built-in capabilities and default config.
    pub fn new(stopwords: Stopwords) -> Self {
        Self {
            urls: Box::new(RegexUrlFinder),
            emoji: Box::new(RegexEmojiExtractor),
            scorer: Box::new(LexiconScorer::new()),
            stopwords,
            config: AnalysisConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_url_finder(mut self, finder: impl UrlFinder + 'static) -> Self {
        self.urls = Box::new(finder);
        self
    }

    #[must_use]
    pub fn with_emoji_extractor(mut self, extractor: impl EmojiExtractor + 'static) -> Self {
        self.emoji = Box::new(extractor);
        self
    }

    #[must_use]
    pub fn with_scorer(mut self, scorer: impl PolarityScorer + 'static) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Builds the full report for `filter`.
    ///
    /// # Errors
    ///
    /// - [`ChatlensError::EmptyTranscript`] if the table has no records.
    /// - [`ChatlensError::InvalidConfig`] if the config is out of range.
    pub fn analyze(&self, table: &ChatTable, filter: &UserFilter) -> Result<AnalysisReport> {
        if table.is_empty() {
            return Err(ChatlensError::EmptyTranscript);
        }
        self.config.validate()?;

        let overall = *filter == UserFilter::Overall;
        let (top_contributors, contributor_shares) = if overall {
            (
                top_contributors(table, filter, self.config.top_users),
                contributor_shares(table, filter),
            )
        } else {
            (Vec::new(), Vec::new())
        };

        let inferred = infer_responses(table, self.config.session_percentile);
        let edges = inferred.edges;
        let response_profile = filter
            .as_user()
            .map(|user| user_response_profile(&edges, user));

        let scored = annotate(table, self.scorer.as_ref(), self.config.neutral_band);
        let sentiment_comparison = filter
            .as_user()
            .and_then(|user| compare_with_group(&scored, user));
        let positive_contributors = if overall {
            sentiment_by_user(&scored, self.config.top_users)
        } else {
            Vec::new()
        };

        tracing::debug!(scope = %filter, "analysis complete");

        Ok(AnalysisReport {
            scope: filter.to_string(),
            users: table.users().into_iter().map(str::to_string).collect(),
            headline: headline_stats(table, filter, self.urls.as_ref()),
            monthly_timeline: monthly_timeline(table, filter),
            weekday_activity: weekday_activity(table, filter),
            month_activity: month_activity(table, filter),
            heatmap: activity_heatmap(table, filter),
            top_contributors,
            contributor_shares,
            top_words: word_frequency(table, filter, &self.stopwords, self.config.top_words),
            emoji: emoji_frequency(table, filter, self.emoji.as_ref()),
            response_edges: edges.len(),
            session_threshold_minutes: inferred.threshold_minutes.map(round2),
            response_leaderboard: responder_leaderboard(&edges),
            response_profile,
            sentiment: summarize(&scored, filter),
            sentiment_comparison,
            sentiment_extremes: extreme_messages(&scored, filter),
            sentiment_trend: monthly_trend(&scored, filter),
            positive_contributors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn at(min: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
            + Duration::minutes(min)
    }

    fn table() -> ChatTable {
        ChatTable::from_messages(vec![
            Message::notification(at(0), "Alice created group"),
            Message::new(at(1), "Alice", "good morning 😀"),
            Message::new(at(2), "Bob", "morning! this is great"),
            Message::new(at(4), "Alice", "terrible traffic today"),
            Message::new(at(5), "Bob", "😀 bad luck"),
        ])
    }

    struct NoUrls;

    impl UrlFinder for NoUrls {
        fn find_urls<'a>(&self, _text: &'a str) -> Vec<&'a str> {
            Vec::new()
        }
    }

    #[test]
    fn test_analyze_overall() {
        let report = Analyzer::new(Stopwords::from_text("is this"))
            .analyze(&table(), &UserFilter::Overall)
            .unwrap();

        assert_eq!(report.scope, "Overall");
        assert_eq!(report.users, vec!["Alice", "Bob"]);
        assert_eq!(report.headline.message_count, 5);
        assert_eq!(report.top_contributors.len(), 3);
        assert_eq!(report.contributor_shares.len(), 3);
        assert_eq!(report.top_words[0], LabelCount::new("😀", 2));
        assert!(report.top_words.iter().all(|w| w.label != "this"));
        assert_eq!(report.emoji, vec![LabelCount::new("😀", 2)]);
        assert!(report.response_edges > 0);
        assert!(report.response_profile.is_none());
        assert!(report.sentiment_comparison.is_none());
        assert_eq!(report.sentiment.unwrap().counts.total(), 4);
        // gaps [0, 1, 2, 1] -> 0.9 quantile 1.7
        assert_eq!(report.session_threshold_minutes, Some(1.7));
        let positive: Vec<_> = report
            .positive_contributors
            .iter()
            .map(|u| u.user.as_str())
            .collect();
        assert_eq!(positive, vec!["Bob", "Alice"]);
    }

    #[test]
    fn test_analyze_single_user() {
        let report = Analyzer::new(Stopwords::default())
            .analyze(&table(), &UserFilter::user("Bob"))
            .unwrap();

        assert_eq!(report.scope, "Bob");
        assert_eq!(report.headline.message_count, 2);
        assert!(report.top_contributors.is_empty());
        assert!(report.response_profile.is_some());
        assert!(report.sentiment_comparison.is_some());
        assert!(report.positive_contributors.is_empty());
        assert!(report.session_threshold_minutes.is_some());
    }

    #[test]
    fn test_empty_table_is_error() {
        let err = Analyzer::new(Stopwords::default())
            .analyze(&ChatTable::default(), &UserFilter::Overall)
            .unwrap_err();
        assert!(err.is_empty_transcript());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let analyzer = Analyzer::new(Stopwords::default())
            .with_config(AnalysisConfig::new().with_session_percentile(2.0));
        let err = analyzer.analyze(&table(), &UserFilter::Overall).unwrap_err();
        assert!(err.is_invalid_config());
    }

    #[test]
    fn test_injected_capability() {
        let t = ChatTable::from_messages(vec![Message::new(at(0), "A", "https://x.io")]);
        let report = Analyzer::new(Stopwords::default())
            .with_url_finder(NoUrls)
            .analyze(&t, &UserFilter::Overall)
            .unwrap();
        assert_eq!(report.headline.link_count, 0);
    }
}
