//! Tubescore CLI - YouTube SEO metadata and transcript analysis
//!
//! The analysis logic is contained in lib.rs, and this file is responsible
//! for parsing arguments, sequencing fetches, and rendering reports.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::Read;
use std::path::PathBuf;
use tubescore::score::{self, SectionReport};
use tubescore::transcript::{self, TranscriptMetrics};
use tubescore::youtube::{self, SearchResult, VideoMetadata};
use tubescore::Config;

#[derive(Parser)]
#[command(name = "tubescore")]
#[command(author, version, about = "YouTube SEO metadata and transcript analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a video's title, description, and tags against SEO heuristics
    Analyze {
        /// YouTube video URL or 11-character video id
        input: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare a video against the top 5 results for its primary keyword
    Compete {
        /// YouTube video URL or 11-character video id
        input: String,
        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Analyze a transcript for keywords, readability, and tone
    Transcript {
        /// Transcript file to read (stdin when omitted)
        file: Option<PathBuf>,
        /// Print the metrics as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { input, json } => {
            let video_id = parse_input(&input)?;
            let config = Config::load()?;
            let api_key = config.api_key()?;

            let metadata = youtube::fetch_video(&video_id, api_key).await?;
            let report = score::score_metadata(&metadata);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Analyzing: {}\n", metadata.title.bold());
                print_overall_score(report.total_score, report.max_score());
                print_section("Title Analysis", &report.title);
                print_section("Description Analysis", &report.description);
                print_section("Keywords / Tags Analysis", &report.tags);
            }
        }
        Commands::Compete { input, json } => {
            let video_id = parse_input(&input)?;
            let config = Config::load()?;
            let api_key = config.api_key()?;

            let metadata = youtube::fetch_video(&video_id, api_key).await?;
            let keyword = metadata.search_keyword();
            let competitors = youtube::search_videos(&keyword, api_key).await?;

            if json {
                let payload = serde_json::json!({
                    "keyword": keyword,
                    "video": metadata,
                    "competitors": competitors,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                print_competitors(&metadata, &competitors, &keyword);
            }
        }
        Commands::Transcript { file, json } => {
            let text = read_transcript(file)?;
            if text.trim().is_empty() {
                bail!("The transcript is empty. Paste or pipe some text first.");
            }

            let keywords = transcript::top_keywords(&text);
            let metrics = transcript::analyze_transcript(&text);

            if json {
                let payload = serde_json::json!({
                    "keywords": keywords,
                    "metrics": metrics,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                print_transcript_report(&keywords, &metrics);
            }
        }
    }

    Ok(())
}

/// Resolve a raw CLI input into a video id, rejecting it before any fetch
fn parse_input(input: &str) -> anyhow::Result<String> {
    if input.trim().is_empty() {
        bail!("Please enter a YouTube video URL or ID.");
    }
    youtube::extract_video_id(input)
        .context("Could not find a valid YouTube video ID in the input.")
}

/// Read the transcript from a file, or from stdin when no file is given
fn read_transcript(file: Option<PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read transcript from {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read transcript from stdin")?;
            Ok(text)
        }
    }
}

fn print_overall_score(total: u32, max: u32) {
    println!(
        "Overall Compliance Score: {}",
        format!("{}/{}", total, max).bold()
    );
}

fn print_section(name: &str, section: &SectionReport) {
    println!(
        "\n=== {} {} ===",
        name,
        format!("{}/{} pts", section.score, section.max).bold()
    );
    for item in &section.feedback {
        if item.pass {
            println!("  {} {}", "✔".green(), item.text);
        } else {
            println!("  {} {}", "⚠".yellow(), item.text);
            if let Some(suggestion) = &item.suggestion {
                println!("    {}", suggestion.dimmed());
            }
        }
    }
}

fn print_competitors(metadata: &VideoMetadata, competitors: &[SearchResult], keyword: &str) {
    println!(
        "Your video vs. top {} for \"{}\":\n",
        competitors.len(),
        keyword
    );

    println!("  {} {}", "▶".green(), metadata.title.bold());
    if let Some(url) = &metadata.thumbnail {
        println!("    {}", url.dimmed());
    }

    for result in competitors {
        println!("  • {}", result.snippet.title);
        if let Some(url) = result.snippet.thumbnails.best_url() {
            println!("    {}", url.dimmed());
        }
    }
}

fn print_transcript_report(keywords: &[String], metrics: &TranscriptMetrics) {
    println!("=== Advanced Transcript Analysis ===\n");

    println!(
        "Readability Score: {} {}",
        metrics.readability_score.to_string().bold(),
        "(60-80 is ideal)".dimmed()
    );
    let sentiment = if metrics.sentiment_score > 0 {
        format!("+{}", metrics.sentiment_score)
    } else {
        metrics.sentiment_score.to_string()
    };
    println!(
        "Sentiment Score:   {} {}",
        sentiment.bold(),
        "(positive/negative tone)".dimmed()
    );

    println!("\nActionable Language Detected:");
    if metrics.found_action_words.is_empty() {
        println!("  None detected.");
    } else {
        println!("  {}", metrics.found_action_words.join(", "));
    }

    println!("\nSuggested Keywords & Topics:");
    if keywords.is_empty() {
        println!("  No unique keywords found.");
    } else {
        println!("  {}", keywords.join(", "));
    }
}
