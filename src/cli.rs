//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`DateOrderArg`] - day/month order of header dates
//! - [`OutputFormat`] - Output format options
//!
//! Both enums convert into their library counterparts, so code that only
//! needs the library never depends on clap.

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::DateOrder;

/// Analyze a WhatsApp chat export: activity, top words and emoji,
/// response times and sentiment.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens chat.txt
    chatlens chat.txt -u Alice
    chatlens chat.txt --date-order dmy --after 2024-01-01
    chatlens chat.txt -f csv -o records.csv
    chatlens chat.txt --stopwords stop_hinglish.txt --config analysis.json")]
pub struct Args {
    /// Path to the exported chat (.txt)
    pub input: String,

    /// Analyze a single user instead of the whole chat
    #[arg(short, long, value_name = "USER", default_value = "Overall")]
    pub user: String,

    /// Stopword list (whitespace separated); the bundled list is used if omitted
    #[arg(long, value_name = "PATH")]
    pub stopwords: Option<String>,

    /// Sentiment lexicon (`token valence` per line); the bundled list is used if omitted
    #[arg(long, value_name = "PATH")]
    pub lexicon: Option<String>,

    /// Analysis config file (JSON)
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Day/month order of dates in the export
    #[arg(long, value_enum, default_value = "auto")]
    pub date_order: DateOrderArg,

    /// Keep only messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep only messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Path to output file
    #[arg(short, long, default_value = "chat_report.json")]
    pub output: String,

    /// Log parser and analysis details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Day/month order of header dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum DateOrderArg {
    /// Decide from the transcript
    #[default]
    Auto,

    /// Day first (`15/01/24`)
    #[value(alias = "day-first")]
    Dmy,

    /// Month first (`01/15/24`)
    #[value(alias = "month-first")]
    Mdy,
}

impl From<DateOrderArg> for DateOrder {
    fn from(arg: DateOrderArg) -> DateOrder {
        match arg {
            DateOrderArg::Auto => DateOrder::Auto,
            DateOrderArg::Dmy => DateOrder::DayFirst,
            DateOrderArg::Mdy => DateOrder::MonthFirst,
        }
    }
}

/// Output format options.
///
/// - [`Csv`](OutputFormat::Csv) - parsed records, semicolon-delimited
/// - [`Json`](OutputFormat::Json) - full analysis report
/// - [`Jsonl`](OutputFormat::Jsonl) - parsed records, one JSON per line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,

    #[default]
    Json,

    #[value(alias = "ndjson")]
    Jsonl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}
