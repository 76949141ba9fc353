//! Line normalization for raw export text.
//!
//! Exports differ by phone and locale in ways that have nothing to do with
//! the message itself: `AM`/`PM` markers separated by a narrow no-break
//! space, iOS-style `[date, time]` brackets, stray quotes and commas around
//! the line, doubled spaces before the ` - ` separator. [`LineNormalizer`]
//! removes these so that the header grammar in
//! [`whatsapp`](super::whatsapp) only has to describe one shape.
//!
//! Only the header is rewritten; message bodies pass through untouched
//! apart from the outer trimming. One input line always yields one output
//! line, possibly empty.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `[5/1/24, 2:30:05 PM] Alice: hi` (iOS)
static BRACKETED_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(\d{1,2}[/-]\d{1,2}[/-]\d{2,4}),\s*([^\]]+)\]\s*(.*)$").expect("valid regex")
});

/// Header time followed by a meridiem marker, any whitespace variant in between.
/// Repeated markers are consumed together; the first one decides.
static MERIDIEM_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<date>\d{1,2}[/-]\d{1,2}[/-]\d{2,4}),\s*(?P<hour>\d{1,2}):(?P<minute>\d{2})(?P<second>:\d{2})?\s*(?P<mer>[AaPp])\.?\s?[Mm]\.?(?:\s*[AaPp]\.?\s?[Mm]\.?)*(?P<rest>[^\p{L}\p{N}].*|)$",
    )
    .expect("valid regex")
});

/// Irregular spacing between the header time and the ` - ` separator.
static SEPARATOR_SPACING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<date>\d{1,2}[/-]\d{1,2}[/-]\d{2,4}),\s*(?P<time>\d{1,2}:\d{2}(?::\d{2})?)\s+-")
        .expect("valid regex")
});

/// Characters trimmed from both ends of every line.
fn is_clutter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\'' | ',' | '\u{feff}' | '\u{200e}' | '\u{200f}')
}

/// Normalizes raw export lines.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::LineNormalizer;
///
/// let normalizer = LineNormalizer::new();
/// assert_eq!(
///     normalizer.normalize("5/1/24, 2:30\u{202f}PM - Alice: hi"),
///     "5/1/24, 14:30 - Alice: hi"
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LineNormalizer {
    convert_meridiem: bool,
}

impl Default for LineNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineNormalizer {
    /// Creates a normalizer that converts 12-hour header times to 24-hour.
    pub fn new() -> Self {
        Self {
            convert_meridiem: true,
        }
    }

    /// Chooses whether `PM` adds twelve hours or is simply dropped.
    #[must_use]
    pub fn with_convert_meridiem(mut self, enabled: bool) -> Self {
        self.convert_meridiem = enabled;
        self
    }

    /// Normalizes a single line.
    pub fn normalize(&self, line: &str) -> String {
        let mut out = line.trim_matches(is_clutter).to_string();

        if let Some(rewritten) = unbracket(&out) {
            out = rewritten;
        }
        if let Some(rewritten) = self.strip_meridiem(&out) {
            out = rewritten;
        }
        if let Some(rewritten) = fix_separator_spacing(&out) {
            out = rewritten;
        }

        out.trim_matches(is_clutter).to_string()
    }

    /// Normalizes every line, preserving count and order.
    pub fn normalize_lines<I, S>(&self, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .map(|line| self.normalize(line.as_ref()))
            .collect()
    }

    fn strip_meridiem(&self, line: &str) -> Option<String> {
        let caps = MERIDIEM_HEADER.captures(line)?;
        let hour: u32 = caps["hour"].parse().ok()?;
        let is_pm = caps["mer"].eq_ignore_ascii_case("p");
        let hour = if self.convert_meridiem {
            to_24_hour(hour, is_pm)
        } else {
            hour
        };

        Some(format!(
            "{}, {:02}:{}{}{}",
            &caps["date"],
            hour,
            &caps["minute"],
            caps.name("second").map_or("", |m| m.as_str()),
            &caps["rest"],
        ))
    }
}

/// Converts a 12-hour clock value. Out-of-range hours are kept as written.
fn to_24_hour(hour: u32, is_pm: bool) -> u32 {
    match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (1..=11, true) => hour + 12,
        _ => hour,
    }
}

fn unbracket(line: &str) -> Option<String> {
    let caps = BRACKETED_HEADER.captures(line)?;
    Some(format!("{}, {} - {}", &caps[1], caps[2].trim(), &caps[3]))
}

fn fix_separator_spacing(line: &str) -> Option<String> {
    let caps = SEPARATOR_SPACING.captures(line)?;
    let matched_len = caps.get(0).map_or(0, |m| m.end());
    Some(format!("{} -{}", header_prefix(&caps), &line[matched_len..]))
}

fn header_prefix(caps: &Captures<'_>) -> String {
    format!("{}, {}", &caps["date"], &caps["time"])
}
