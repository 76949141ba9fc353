//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatlens::cli::Args;
use chatlens::config::{AnalysisConfig, ParserConfig};
use chatlens::core::filter::{DateRange, UserFilter};
use chatlens::core::lexical::Stopwords;
use chatlens::core::report::{AnalysisReport, Analyzer};
use chatlens::core::sentiment::LexiconScorer;
use chatlens::format::{OutputFormat, write_to_format};
use chatlens::parser::TranscriptParser;
use chatlens::{ChatTable, ChatlensError};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatlensError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    setup_logging(args.verbose);

    let output_path = adjust_output_extension(&args.output, args.format);

    println!("🔎 chatlens v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    println!("💾 Output:  {}", output_path);
    println!("📄 Format:  {}", args.format);
    println!("👤 Scope:   {}", args.user);

    let mut range = DateRange::new();
    if let Some(ref after) = args.after {
        range = range.with_date_from(after)?;
        println!("📅 After:   {}", after);
    }
    if let Some(ref before) = args.before {
        range = range.with_date_to(before)?;
        println!("📅 Before:  {}", before);
    }
    println!();

    // Step 1: Parse
    println!("⏳ Parsing transcript...");
    let parse_start = Instant::now();
    let parser = TranscriptParser::with_config(
        ParserConfig::new().with_date_order(args.date_order.into()),
    );
    let mut table = parser.parse(&args.input)?;
    println!(
        "   Found {} messages ({:.2}s)",
        table.len(),
        parse_start.elapsed().as_secs_f64()
    );

    // Step 2: Date window
    if range.is_active() {
        table = table.within(&range);
        println!("🔍 {} messages in date range", table.len());
    }

    if table.is_empty() {
        return Err(ChatlensError::EmptyTranscript);
    }

    let filter = UserFilter::from(args.user.as_str());
    if let Some(user) = filter.as_user() {
        let users = table.users();
        if !users.contains(&user) {
            return Err(ChatlensError::invalid_config(format!(
                "User '{}' not found. Available: {}",
                user,
                users.join(", ")
            )));
        }
    }

    let stopwords = match args.stopwords {
        Some(ref path) => Stopwords::from_file(path)?,
        None => Stopwords::bundled(),
    };
    let scorer = match args.lexicon {
        Some(ref path) => LexiconScorer::from_file(path)?,
        None => LexiconScorer::new(),
    };
    let config = match args.config {
        Some(ref path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };

    // Step 3: Analyze
    println!("📊 Analyzing...");
    let analyze_start = Instant::now();
    let report = Analyzer::new(stopwords)
        .with_scorer(scorer)
        .with_config(config)
        .analyze(&table, &filter)?;
    println!("   Done ({:.2}s)", analyze_start.elapsed().as_secs_f64());
    println!();

    print_summary(&report);

    // Step 4: Write
    let format: OutputFormat = args.format.into();
    println!("💾 Writing {}...", format);
    write_to_format(&table, &report, &output_path, format)?;

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "✅ Done! Output saved to {} ({:.2}s total)",
        output_path,
        total_start.elapsed().as_secs_f64()
    );
    print_export_note(&table, format);

    Ok(())
}

/// `RUST_LOG` wins; otherwise `-v` turns on debug output for this crate.
fn setup_logging(verbose: bool) {
    let default = if verbose { "chatlens=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

fn print_summary(report: &AnalysisReport) {
    let h = &report.headline;
    println!("📈 Summary ({})", report.scope);
    println!("   Messages: {}", h.message_count);
    println!("   Words:    {}", h.word_count);
    println!("   Media:    {}", h.media_count);
    println!("   Links:    {}", h.link_count);
    if let Some(ref first) = h.first_message {
        println!("   First:    {}", first);
    }
    if let Some(ref last) = h.last_message {
        println!("   Last:     {}", last);
    }

    if !report.top_contributors.is_empty() {
        println!("🏆 Most active:");
        for c in &report.top_contributors {
            println!("   {:<20} {}", c.label, c.count);
        }
    }

    if !report.top_words.is_empty() {
        let words: Vec<String> = report
            .top_words
            .iter()
            .take(5)
            .map(|w| format!("{} ({})", w.label, w.count))
            .collect();
        println!("💬 Top words: {}", words.join(", "));
    }

    if !report.emoji.is_empty() {
        let emoji: Vec<String> = report
            .emoji
            .iter()
            .take(5)
            .map(|e| format!("{} ({})", e.label, e.count))
            .collect();
        println!("😀 Top emoji: {}", emoji.join(", "));
    }

    if !report.response_leaderboard.is_empty() {
        println!("⚡ Fastest responders ({} replies inferred):", report.response_edges);
        for stat in report.response_leaderboard.iter().take(3) {
            println!("   {:<20} {:.2} min", stat.user, stat.average_minutes);
        }
    }
    if let Some(threshold) = report.session_threshold_minutes {
        println!("⏱️  Session threshold: {:.1} min", threshold);
    }

    if let Some(ref s) = report.sentiment {
        println!(
            "🙂 Sentiment: {:.3} avg (+{} / ={} / -{})",
            s.average, s.counts.positive, s.counts.neutral, s.counts.negative
        );
    }
    if let Some(ref cmp) = report.sentiment_comparison {
        println!(
            "   vs group: {:+.3} avg, {:+.1}% positive",
            cmp.average_delta, cmp.positive_percent_delta
        );
    }
    if !report.positive_contributors.is_empty() {
        println!("🌟 Most positive:");
        for u in &report.positive_contributors {
            println!("   {:<20} {:+.3}", u.user, u.average);
        }
    }
    println!();
}

fn print_export_note(table: &ChatTable, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("   Full analysis report written as JSON"),
        OutputFormat::Csv | OutputFormat::Jsonl => {
            println!("   {} records written", table.len());
        }
    }
}

fn adjust_output_extension(output: &str, format: chatlens::cli::OutputFormat) -> String {
    if output != "chat_report.json" {
        return output.to_string();
    }

    let lib_format: OutputFormat = format.into();
    format!("chat_report.{}", lib_format.extension())
}
