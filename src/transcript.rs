//! Transcript analysis: keyword frequency, readability, sentiment, and
//! call-to-action detection.
//!
//! Everything in this module is local and deterministic; no network access.
//! The word lists are module-scoped statics shared by every call.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Maximum number of suggested keywords returned
const MAX_KEYWORDS: usize = 10;

lazy_static! {
    static ref NEWLINE_RE: Regex = Regex::new(r"\r\n|\n|\r").unwrap();
    // Bracketed stage directions like "[Music]" or "[Applause]".
    static ref STAGE_DIRECTION_RE: Regex = Regex::new(r"\[.*?\]").unwrap();
    static ref PUNCTUATION_RE: Regex = Regex::new(r"[.,/#!$%^&*;:{}=\-_`~()]").unwrap();
    static ref SENTENCE_END_RE: Regex = Regex::new(r"[.?!]+\s").unwrap();
    static ref NON_LETTER_RE: Regex = Regex::new(r"[^a-z\s]").unwrap();
    // Silent word endings dropped before counting syllable nuclei.
    static ref SILENT_SUFFIX_RE: Regex = Regex::new(r"(?:[^laeiouy]es|ed|[^laeiouy]e)$").unwrap();
    static ref LEADING_Y_RE: Regex = Regex::new(r"^y").unwrap();
    static ref SYLLABLE_RE: Regex = Regex::new(r"[aeiouy]{1,2}").unwrap();

    static ref STOPWORDS: HashSet<&'static str> = [
        "the", "a", "an", "and", "but", "or", "for", "nor", "on", "at", "to", "from", "by",
        "of", "in", "out", "is", "are", "was", "were", "be", "being", "been", "i", "you",
        "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my", "your",
        "his", "its", "our", "their", "this", "that", "these", "those", "what", "which",
        "who", "whom", "whose", "where", "when", "why", "how", "so", "also", "about",
        "like", "just", "gonna", "really", "s",
    ]
    .into_iter()
    .collect();
}

/// Positive tone markers for the sentiment tally
const POSITIVE_WORDS: [&str; 10] = [
    "love", "amazing", "best", "great", "awesome", "beautiful", "easy", "fun", "helpful",
    "thanks",
];

/// Negative tone markers for the sentiment tally
const NEGATIVE_WORDS: [&str; 8] = [
    "bad", "hate", "terrible", "problem", "difficult", "issue", "hard", "boring",
];

/// Call-to-action phrases detected by substring containment
const ACTION_WORDS: [&str; 7] = [
    "subscribe", "like", "comment", "share", "download", "click", "visit",
];

/// Readability, tone, and CTA metrics for a transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptMetrics {
    /// Flesch Reading-Ease score, floored at 0
    pub readability_score: u32,
    /// Positive-word count minus negative-word count
    pub sentiment_score: i32,
    pub found_action_words: Vec<String>,
}

/// Extract the top keywords from a transcript by raw frequency.
///
/// Tokens of two characters or fewer and common function words are excluded.
/// Ties keep first-appearance order, so the result is stable across calls.
pub fn top_keywords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let stripped = PUNCTUATION_RE.replace_all(&lowered, "");

    let mut frequencies: HashMap<&str, usize> = HashMap::new();
    let mut seen_order: Vec<&str> = Vec::new();
    for word in stripped.split_whitespace() {
        if word.chars().count() <= 2 || STOPWORDS.contains(word) {
            continue;
        }
        let count = frequencies.entry(word).or_insert(0);
        if *count == 0 {
            seen_order.push(word);
        }
        *count += 1;
    }

    // Stable sort: equal frequencies stay in first-appearance order.
    seen_order.sort_by(|a, b| frequencies[b].cmp(&frequencies[a]));
    seen_order
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(str::to_string)
        .collect()
}

/// Compute readability, sentiment, and action-word metrics for a transcript
pub fn analyze_transcript(text: &str) -> TranscriptMetrics {
    let unwrapped = NEWLINE_RE.replace_all(text, " ");
    let cleaned = STAGE_DIRECTION_RE.replace_all(&unwrapped, "");

    let num_sentences = SENTENCE_END_RE
        .split(&cleaned)
        .filter(|fragment| !fragment.is_empty())
        .count()
        .max(1);

    let lowered = cleaned.to_lowercase();
    let letters_only = NON_LETTER_RE.replace_all(&lowered, "");
    let words: Vec<&str> = letters_only.split_whitespace().collect();
    let num_words = words.len().max(1);

    let total_syllables: usize = words.iter().map(|word| count_syllables(word)).sum();
    let total_syllables = total_syllables.max(1);

    let readability = 206.835
        - 1.015 * (num_words as f64 / num_sentences as f64)
        - 84.6 * (total_syllables as f64 / num_words as f64);
    let readability_score = readability.round().max(0.0) as u32;

    let mut sentiment_score = 0;
    for word in &words {
        if POSITIVE_WORDS.contains(word) {
            sentiment_score += 1;
        }
        if NEGATIVE_WORDS.contains(word) {
            sentiment_score -= 1;
        }
    }

    let found_action_words = ACTION_WORDS
        .iter()
        .filter(|action| lowered.contains(*action))
        .map(|action| action.to_string())
        .collect();

    TranscriptMetrics {
        readability_score,
        sentiment_score,
        found_action_words,
    }
}

/// Estimate syllables for a single lowercase word.
///
/// Heuristic, not dictionary-based: short words count as one, silent endings
/// are stripped, then runs of vowel letters are counted as nuclei.
fn count_syllables(word: &str) -> usize {
    if word.chars().count() <= 3 {
        return 1;
    }
    let trimmed = SILENT_SUFFIX_RE.replace(word, "");
    let trimmed = LEADING_Y_RE.replace(&trimmed, "");
    SYLLABLE_RE.find_iter(&trimmed).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_ranked_by_frequency_with_stable_ties() {
        let keywords = top_keywords("apple banana apple cherry banana apple");
        assert_eq!(keywords, vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn keywords_exclude_stopwords_and_short_tokens() {
        let keywords = top_keywords("the cat sat on a mat at an odd angle");
        for keyword in &keywords {
            assert!(keyword.chars().count() > 2);
            assert!(!STOPWORDS.contains(keyword.as_str()));
        }
        assert!(keywords.contains(&"cat".to_string()));
        assert!(!keywords.contains(&"the".to_string()));
        assert!(!keywords.contains(&"on".to_string()));
    }

    #[test]
    fn keywords_strip_punctuation_before_counting() {
        let keywords = top_keywords("cookies, cookies! cookies. frosting");
        assert_eq!(keywords[0], "cookies");
        assert!(keywords.contains(&"frosting".to_string()));
    }

    #[test]
    fn keywords_cap_at_ten() {
        let text = "alpha bravo charlie delta echo foxtrot golf hotel india juliett kilo lima";
        assert_eq!(top_keywords(text).len(), 10);
    }

    #[test]
    fn keywords_are_idempotent() {
        let text = "bake the dough then bake it again until the dough rises";
        assert_eq!(top_keywords(text), top_keywords(text));
    }

    #[test]
    fn empty_keywords_for_empty_input() {
        assert!(top_keywords("").is_empty());
        assert!(top_keywords("   \n  ").is_empty());
    }

    #[test]
    fn empty_transcript_never_divides_by_zero() {
        let metrics = analyze_transcript("");
        // One pseudo-sentence, one pseudo-word, one pseudo-syllable.
        assert_eq!(metrics.readability_score, 121);
        assert_eq!(metrics.sentiment_score, 0);
        assert!(metrics.found_action_words.is_empty());
        assert_eq!(analyze_transcript("  \n\t "), metrics);
    }

    #[test]
    fn readability_of_a_simple_sentence() {
        // 1 sentence, 3 one-syllable words:
        // 206.835 - 1.015 * 3 - 84.6 * 1 = 119.19
        let metrics = analyze_transcript("The cat sat.");
        assert_eq!(metrics.readability_score, 119);
    }

    #[test]
    fn stage_directions_are_ignored() {
        let metrics = analyze_transcript("[Applause] this was terrible");
        assert_eq!(metrics.sentiment_score, -1);
        // Bracketed text never reaches the word list.
        let metrics = analyze_transcript("[great great great] plain talk");
        assert_eq!(metrics.sentiment_score, 0);
    }

    #[test]
    fn sentiment_is_zero_for_neutral_text() {
        let metrics = analyze_transcript("Today we will look at the weather in Stockholm.");
        assert_eq!(metrics.sentiment_score, 0);
    }

    #[test]
    fn sentiment_and_action_words_worked_example() {
        let text =
            "I love this tutorial, it was so easy and really great, please subscribe and like";
        let metrics = analyze_transcript(text);
        assert_eq!(metrics.sentiment_score, 3, "love + easy + great");
        assert_eq!(metrics.found_action_words, vec!["subscribe", "like"]);
    }

    #[test]
    fn action_words_match_as_substrings() {
        let metrics = analyze_transcript("Don't forget to SHARE this with a friend who clicks");
        assert!(metrics.found_action_words.contains(&"share".to_string()));
        assert!(metrics.found_action_words.contains(&"click".to_string()));
    }

    #[test]
    fn syllable_heuristic_on_known_words() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("love"), 1, "silent e stripped");
        assert_eq!(count_syllables("baking"), 2);
        assert_eq!(count_syllables("cookie"), 2);
        // Vowel runs cap at two letters, so "eau" counts twice.
        assert_eq!(count_syllables("beautiful"), 4);
    }
}
