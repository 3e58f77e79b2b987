//! # Tubescore
//!
//! A CLI for scoring YouTube video metadata against SEO/CTR heuristics.
//!
//! ## Features
//!
//! - **Metadata scoring**: rule-based title, description, and tag checks with
//!   actionable pass/fail feedback
//! - **Competitive lookup**: your video side by side with the top 5 search
//!   results for its primary keyword
//! - **Transcript analysis**: keyword frequency, Flesch readability,
//!   sentiment polarity, and call-to-action detection — fully offline

pub mod config;
pub mod score;
pub mod transcript;
pub mod youtube;

pub use config::Config;
pub use score::{AggregateReport, FeedbackItem, SectionReport};
pub use transcript::TranscriptMetrics;
pub use youtube::VideoMetadata;
