//! Word and emoji frequency, plus the text capabilities they rely on.
//!
//! URL and emoji detection sit behind single-method traits so a caller can
//! swap in another implementation; the regex-backed defaults cover what
//! WhatsApp exports contain.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::filter::UserFilter;
use crate::core::stats::{LabelCount, ranked, tally};
use crate::error::{ChatlensError, Result};
use crate::table::ChatTable;

/// Stopword list shipped with the crate (Hinglish and common English).
const BUNDLED_STOPWORDS: &str = include_str!("../../assets/stop_hinglish.txt");

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:https?://|www\.)\S+").expect("valid regex"));

/// One emoji glyph: a flag pair, a keycap, or a pictograph with its
/// modifiers, tag sequence (subdivision flags) and any ZWJ continuation.
static EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"[\x{1F1E6}-\x{1F1FF}]{2}",
        r"|[0-9#*]\x{FE0F}?\x{20E3}",
        r"|\p{Extended_Pictographic}[\x{FE0F}\x{1F3FB}-\x{1F3FF}]*(?:[\x{E0020}-\x{E007E}]+\x{E007F})?",
        r"(?:\x{200D}\p{Extended_Pictographic}[\x{FE0F}\x{1F3FB}-\x{1F3FF}]*)*",
    ))
    .expect("valid regex")
});

/// Finds URLs in a message body.
pub trait UrlFinder {
    fn find_urls<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Matches `http://`, `https://` and bare `www.` links up to the next
/// whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexUrlFinder;

impl UrlFinder for RegexUrlFinder {
    fn find_urls<'a>(&self, text: &'a str) -> Vec<&'a str> {
        URL.find_iter(text).map(|m| m.as_str()).collect()
    }
}

/// Extracts emoji from a message body, one item per visible glyph.
pub trait EmojiExtractor {
    fn extract_emoji<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Regex-based extractor that keeps multi-codepoint sequences together
/// (skin tones, ZWJ families, flags, keycaps).
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexEmojiExtractor;

impl EmojiExtractor for RegexEmojiExtractor {
    fn extract_emoji<'a>(&self, text: &'a str) -> Vec<&'a str> {
        EMOJI.find_iter(text).map(|m| m.as_str()).collect()
    }
}

/// A lower-cased stopword set.
///
/// # Example
///
/// ```rust
/// use chatlens::core::lexical::Stopwords;
///
/// let stop = Stopwords::from_text("the\nand  hai\n");
/// assert!(stop.contains("hai"));
/// assert!(stop.contains("The"));
/// assert!(!stop.contains("rust"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// Parses a whitespace or newline separated list.
    pub fn from_text(text: &str) -> Self {
        Self {
            words: text.split_whitespace().map(str::to_lowercase).collect(),
        }
    }

    /// Loads a list from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::MissingResource`] if the file cannot be
    /// read. There is no fallback to an empty list.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ChatlensError::missing_resource("stopword list", path, e))?;
        let stopwords = Self::from_text(&text);
        tracing::debug!(path = %path.display(), words = stopwords.len(), "loaded stopwords");
        Ok(stopwords)
    }

    /// The list bundled with the crate.
    pub fn bundled() -> Self {
        Self::from_text(BUNDLED_STOPWORDS)
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Most frequent words in human, non-media messages.
///
/// Bodies are lower-cased and split on whitespace, stopwords are removed and
/// the `top_n` most common tokens are returned. Ties keep first-seen order.
pub fn word_frequency(
    table: &ChatTable,
    filter: &UserFilter,
    stopwords: &Stopwords,
    top_n: usize,
) -> Vec<LabelCount> {
    let tokens = table
        .scoped(filter)
        .filter(|r| !r.is_notification() && !r.is_media())
        .flat_map(|r| {
            r.body()
                .to_lowercase()
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|word| !stopwords.contains(word));

    let mut counts = ranked(tally(tokens));
    counts.truncate(top_n);
    counts
}

/// Every emoji used in scope with its count, most frequent first.
pub fn emoji_frequency(
    table: &ChatTable,
    filter: &UserFilter,
    extractor: &dyn EmojiExtractor,
) -> Vec<LabelCount> {
    let glyphs = table
        .scoped(filter)
        .flat_map(|r| extractor.extract_emoji(r.body()));
    ranked(tally(glyphs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{MEDIA_OMITTED, Message};
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_url_finder() {
        let urls = RegexUrlFinder.find_urls("see https://a.io/x and www.b.com, or http://c.org");
        assert_eq!(urls, vec!["https://a.io/x", "www.b.com,", "http://c.org"]);
        assert!(RegexUrlFinder.find_urls("no links here").is_empty());
    }

    #[test]
    fn test_emoji_single_and_sequences() {
        let ex = RegexEmojiExtractor;
        assert_eq!(ex.extract_emoji("hi 😀 there 😀"), vec!["😀", "😀"]);
        assert_eq!(ex.extract_emoji("👍🏽"), vec!["👍🏽"]);
        assert_eq!(ex.extract_emoji("👨\u{200d}👩\u{200d}👧"), vec!["👨\u{200d}👩\u{200d}👧"]);
        assert_eq!(ex.extract_emoji("🇮🇳🇺🇸"), vec!["🇮🇳", "🇺🇸"]);
        assert_eq!(ex.extract_emoji("❤\u{fe0f}"), vec!["❤\u{fe0f}"]);
        assert!(ex.extract_emoji("plain text 123").is_empty());
    }

    #[test]
    fn test_emoji_subdivision_flags() {
        let england = "🏴\u{E0067}\u{E0062}\u{E0065}\u{E006E}\u{E0067}\u{E007F}";
        let scotland = "🏴\u{E0067}\u{E0062}\u{E0073}\u{E0063}\u{E0074}\u{E007F}";
        let ex = RegexEmojiExtractor;
        assert_eq!(ex.extract_emoji(england), vec![england]);
        assert_eq!(
            ex.extract_emoji(&format!("{england} vs {scotland} 🏴")),
            vec![england, scotland, "🏴"]
        );

        let table = ChatTable::from_messages(vec![
            Message::new(ts(), "Alice", england),
            Message::new(ts(), "Bob", scotland),
        ]);
        let counts = emoji_frequency(&table, &UserFilter::Overall, &ex);
        assert_eq!(counts, vec![LabelCount::new(england, 1), LabelCount::new(scotland, 1)]);
    }

    #[test]
    fn test_stopwords_from_file_missing() {
        let err = Stopwords::from_file("/no/such/stopwords.txt").unwrap_err();
        assert!(err.is_missing_resource());
    }

    #[test]
    fn test_stopwords_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stop.txt");
        std::fs::write(&path, "Hai\nthe\n").unwrap();
        let stop = Stopwords::from_file(&path).unwrap();
        assert_eq!(stop.len(), 2);
        assert!(stop.contains("hai"));
    }

    #[test]
    fn test_bundled_stopwords() {
        let stop = Stopwords::bundled();
        assert!(!stop.is_empty());
        assert!(stop.contains("hai"));
        assert!(stop.contains("the"));
    }

    #[test]
    fn test_word_frequency() {
        let table = ChatTable::from_messages(vec![
            Message::notification(ts(), "rust rust rust group"),
            Message::new(ts(), "Alice", "Rust is the best"),
            Message::new(ts(), "Bob", MEDIA_OMITTED),
            Message::new(ts(), "Bob", "best rust crab"),
            Message::new(ts(), "Alice", "crab"),
        ]);
        let stop = Stopwords::from_text("the is");
        let words = word_frequency(&table, &UserFilter::Overall, &stop, 20);
        assert_eq!(
            words,
            vec![
                LabelCount::new("rust", 2),
                LabelCount::new("best", 2),
                LabelCount::new("crab", 2),
            ]
        );

        let top1 = word_frequency(&table, &UserFilter::user("Alice"), &stop, 1);
        assert_eq!(top1, vec![LabelCount::new("rust", 1)]);
    }

    #[test]
    fn test_emoji_frequency() {
        let table = ChatTable::from_messages(vec![
            Message::new(ts(), "Alice", "😂😂 ok 👍"),
            Message::new(ts(), "Bob", "👍 👍"),
            Message::new(ts(), "Bob", "😎"),
        ]);
        let counts = emoji_frequency(&table, &UserFilter::Overall, &RegexEmojiExtractor);
        assert_eq!(
            counts,
            vec![
                LabelCount::new("👍", 3),
                LabelCount::new("😂", 2),
                LabelCount::new("😎", 1),
            ]
        );
        assert!(emoji_frequency(&ChatTable::default(), &UserFilter::Overall, &RegexEmojiExtractor).is_empty());
    }
}
