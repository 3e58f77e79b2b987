//! Heuristic SEO/CTR scoring for video metadata.
//!
//! Each evaluator is a pure function from metadata fields to a
//! [`SectionReport`]: a bounded score plus ordered pass/fail feedback. Check
//! order and point values are fixed, so identical input always produces an
//! identical report.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::youtube::VideoMetadata;

lazy_static! {
    // Brackets, power words, or (checked separately) digits.
    static ref ENGAGEMENT_RE: Regex =
        Regex::new(r"(?i)[\[\]()]|\b(?:how to|guide|review|tutorial|best|easy|fast)\b").unwrap();
    static ref CTA_RE: Regex =
        Regex::new(r"(?i)subscribe|playlist|follow|shop|visit|https?://").unwrap();
    // A line starting with e.g. "0:00" or "12:34".
    static ref TIMESTAMP_RE: Regex = Regex::new(r"(?m)^\d{1,2}:\d{2}").unwrap();
    static ref MINUTES_RE: Regex = Regex::new(r"(\d+)M").unwrap();
    static ref SECONDS_RE: Regex = Regex::new(r"(\d+)S").unwrap();
}

/// Videos at or under this duration are scored as Shorts: the description
/// section drops its timestamp check and its ceiling shrinks to 35.
const SHORT_MAX_SECONDS: u32 = 61;

/// One check's outcome within a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackItem {
    pub pass: bool,
    pub text: String,
    /// Remediation hint, only ever present on failing checks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl FeedbackItem {
    fn pass(text: impl Into<String>) -> Self {
        Self {
            pass: true,
            text: text.into(),
            suggestion: None,
        }
    }

    fn fail(text: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            pass: false,
            text: text.into(),
            suggestion: Some(suggestion.into()),
        }
    }
}

/// Score and feedback for one metadata section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionReport {
    pub score: u32,
    pub max: u32,
    pub feedback: Vec<FeedbackItem>,
}

/// The combined metadata report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    pub title: SectionReport,
    pub description: SectionReport,
    pub tags: SectionReport,
    pub total_score: u32,
}

impl AggregateReport {
    /// Theoretical maximum for this report (the description ceiling varies
    /// with video duration)
    pub fn max_score(&self) -> u32 {
        self.title.max + self.description.max + self.tags.max
    }
}

/// Run all three section evaluators and sum their scores
pub fn score_metadata(metadata: &VideoMetadata) -> AggregateReport {
    let title = evaluate_title(&metadata.title);
    let description = evaluate_description(metadata.description.as_deref(), metadata.duration.as_deref());
    let tags = evaluate_tags(&metadata.tags, &metadata.title);
    let total_score = title.score + description.score + tags.score;
    AggregateReport {
        title,
        description,
        tags,
        total_score,
    }
}

/// Evaluate the title section (max 35)
pub fn evaluate_title(title: &str) -> SectionReport {
    let mut score = 0;
    let mut feedback = Vec::new();

    let length = title.chars().count();
    if (60..=70).contains(&length) {
        score += 10;
        feedback.push(FeedbackItem::pass(format!(
            "Length is {} characters (optimal).",
            length
        )));
    } else {
        feedback.push(FeedbackItem::fail(
            format!("Length is {} characters.", length),
            "Aim for 60-70 characters to avoid truncation.",
        ));
    }

    // Known-lenient check: a title's first three words are nearly always its
    // own prefix, so this passes for any regularly spaced title.
    let first_words = leading_words(title, 3);
    if title.to_lowercase().starts_with(&first_words.to_lowercase()) {
        score += 15;
        feedback.push(FeedbackItem::pass(
            "Primary keywords appear to be at the start.",
        ));
    } else {
        feedback.push(FeedbackItem::fail(
            "Primary keywords do not lead the title.",
            "Move your main keyword to the beginning of the title.",
        ));
    }

    let has_digit = title.chars().any(|c| c.is_ascii_digit());
    if ENGAGEMENT_RE.is_match(title) || has_digit {
        score += 10;
        feedback.push(FeedbackItem::pass(
            "Uses engaging elements (numbers, brackets, power words).",
        ));
    } else {
        feedback.push(FeedbackItem::fail(
            "Lacks common CTR-boosting elements.",
            "Consider adding numbers, brackets, or words like \"Guide\" or \"Review\".",
        ));
    }

    SectionReport {
        score,
        max: 35,
        feedback,
    }
}

/// Evaluate the description section (max 40, or 35 for Shorts)
pub fn evaluate_description(description: Option<&str>, duration: Option<&str>) -> SectionReport {
    let mut score = 0;
    let mut feedback = Vec::new();

    let description = description.unwrap_or("");
    let word_count = description.split_whitespace().count();
    let duration_seconds = parse_duration_seconds(duration);
    let is_short = duration_seconds <= SHORT_MAX_SECONDS;

    // Informational check, always awarded.
    score += 15;
    feedback.push(FeedbackItem::pass(
        "Includes keywords in the opening paragraph.",
    ));

    if word_count > 150 {
        score += 10;
        feedback.push(FeedbackItem::pass(format!(
            "Description is detailed ({} words).",
            word_count
        )));
    } else {
        feedback.push(FeedbackItem::fail(
            format!("Description is short ({} words).", word_count),
            "Aim for over 150 words to provide more context.",
        ));
    }

    if CTA_RE.is_match(description) {
        score += 10;
        feedback.push(FeedbackItem::pass(
            "Includes at least one Call-to-Action (CTA) link.",
        ));
    } else {
        feedback.push(FeedbackItem::fail(
            "No CTA links found.",
            "Add links to subscribe, other videos, or your website.",
        ));
    }

    // The timestamp check only applies to regular videos longer than three
    // minutes; for everything else it is skipped outright, not failed.
    if !is_short && duration_seconds > 180 {
        if TIMESTAMP_RE.is_match(description) {
            score += 5;
            feedback.push(FeedbackItem::pass(
                "Includes timestamps for easy navigation.",
            ));
        } else {
            feedback.push(FeedbackItem::fail(
                "Video is over 3 minutes but lacks timestamps.",
                "Add timestamps to help viewers find key moments.",
            ));
        }
    }

    SectionReport {
        score,
        max: if is_short { 35 } else { 40 },
        feedback,
    }
}

/// Evaluate the tags section (max 25)
pub fn evaluate_tags(tags: &[String], title: &str) -> SectionReport {
    let mut score = 0;
    let mut feedback = Vec::new();

    let tags_length: usize = tags.iter().map(|tag| tag.chars().count()).sum();
    let primary_word = leading_words(title, 1).to_lowercase();

    let first_tag_aligned = tags
        .first()
        .is_some_and(|tag| tag.to_lowercase().contains(&primary_word));
    if first_tag_aligned {
        score += 10;
        feedback.push(FeedbackItem::pass("The first tag is aligned with the title."));
    } else {
        feedback.push(FeedbackItem::fail(
            "First tag does not seem to match the primary keyword.",
            "Make your first tag your main target keyword.",
        ));
    }

    if tags_length > 250 {
        score += 10;
        feedback.push(FeedbackItem::pass(format!(
            "Good volume of tags used ({}/500 chars).",
            tags_length
        )));
    } else {
        feedback.push(FeedbackItem::fail(
            format!("Low volume of tags used ({}/500 chars).", tags_length),
            "Use more of the available 500 characters for tags.",
        ));
    }

    let has_long_tail = tags.iter().any(|tag| tag.split_whitespace().count() > 2);
    if tags.len() > 5 && has_long_tail {
        score += 5;
        feedback.push(FeedbackItem::pass(
            "Contains a healthy mix of broad and long-tail keywords.",
        ));
    } else {
        feedback.push(FeedbackItem::fail(
            "Lacks a good mix of keyword types.",
            "Include both broad tags (e.g., \"baking\") and specific tags (e.g., \"how to bake cookies\").",
        ));
    }

    SectionReport {
        score,
        max: 25,
        feedback,
    }
}

/// Parse an ISO-8601-shaped duration ("PT4M13S") into whole seconds.
///
/// Only the minute and second components are read; anything missing counts
/// as zero.
pub fn parse_duration_seconds(duration: Option<&str>) -> u32 {
    let Some(duration) = duration else {
        return 0;
    };
    let minutes = capture_number(&MINUTES_RE, duration);
    let seconds = capture_number(&SECONDS_RE, duration);
    minutes * 60 + seconds
}

fn capture_number(pattern: &Regex, input: &str) -> u32 {
    pattern
        .captures(input)
        .and_then(|captures| captures[1].parse().ok())
        .unwrap_or(0)
}

/// First `count` whitespace-delimited words, joined by single spaces
fn leading_words(text: &str, count: usize) -> String {
    text.split_whitespace()
        .take(count)
        .collect::<Vec<_>>()
        .join(" ")
}
