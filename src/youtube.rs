//! YouTube Data API client and video identifier extraction.
//!
//! Uses reqwest for fetching. The API key comes from [`crate::Config`].

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// User-Agent string identifying this client
const USER_AGENT: &str = concat!("tubescore/", env!("CARGO_PKG_VERSION"));

/// Default timeout for HTTP requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Base URL of the YouTube Data API v3
const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

lazy_static! {
    // URL forms: watch?v=, embed/, v/, or a bare youtu.be path, each followed
    // by an 11-character video id and optional trailing query junk.
    static ref URL_ID_RE: Regex = Regex::new(
        r"(?:https?://)?(?:www\.)?(?:youtube\.com|youtu\.be)/(?:watch\?v=|embed/|v/|)([A-Za-z0-9_-]{11})(?:\S+)?$"
    )
    .unwrap();
    static ref BARE_ID_RE: Regex = Regex::new(r"^([A-Za-z0-9_-]{11})$").unwrap();
}

#[derive(Error, Debug)]
pub enum YoutubeError {
    #[error("failed to reach the YouTube API: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Video not found.")]
    VideoNotFound,
    #[error("YouTube API error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Metadata for a single video, as returned by the `videos` endpoint.
///
/// Absent tags are normalized to an empty list; scorers never need to
/// distinguish the two.
#[derive(Debug, Clone, Serialize)]
pub struct VideoMetadata {
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    /// ISO-8601 duration string, e.g. "PT4M13S"
    pub duration: Option<String>,
    pub thumbnail: Option<String>,
}

impl VideoMetadata {
    /// Derive the search keyword used for competitive lookup: the first tag
    /// when one exists, otherwise the first three words of the title.
    pub fn search_keyword(&self) -> String {
        if let Some(first) = self.tags.first() {
            return first.clone();
        }
        self.title
            .split_whitespace()
            .take(3)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A single thumbnail variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

/// The default/medium/high thumbnail set attached to a snippet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThumbnailSet {
    #[serde(default)]
    pub default: Option<Thumbnail>,
    #[serde(default)]
    pub medium: Option<Thumbnail>,
    #[serde(default)]
    pub high: Option<Thumbnail>,
}

impl ThumbnailSet {
    /// Pick the best available thumbnail URL (high > medium > default)
    pub fn best_url(&self) -> Option<&str> {
        self.high
            .as_ref()
            .or(self.medium.as_ref())
            .or(self.default.as_ref())
            .map(|t| t.url.as_str())
    }
}

/// Snippet of a search result, passed through to rendering untouched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSnippet {
    pub title: String,
    #[serde(default)]
    pub thumbnails: ThumbnailSet,
}

/// One entry of a competitive search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub snippet: SearchSnippet,
}

// Wire types for the `videos` endpoint.

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    snippet: VideoSnippet,
    #[serde(default)]
    content_details: Option<ContentDetails>,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    thumbnails: ThumbnailSet,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    #[serde(default)]
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
}

// Google error bodies look like {"error": {"code": .., "message": ".."}}.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Extract the canonical 11-character video id from a URL or bare id.
///
/// Purely syntactic: the payload is not checked for existence.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    for pattern in [&*URL_ID_RE, &*BARE_ID_RE] {
        if let Some(captures) = pattern.captures(input) {
            return Some(captures[1].to_string());
        }
    }
    None
}

/// Create a configured HTTP client
fn create_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
}

/// Fetch metadata for a video by id
pub async fn fetch_video(video_id: &str, api_key: &str) -> Result<VideoMetadata, YoutubeError> {
    let client = create_client()?;

    let response = client
        .get(format!("{}/videos", API_BASE))
        .query(&[
            ("id", video_id),
            ("part", "snippet,contentDetails"),
            ("key", api_key),
        ])
        .send()
        .await?;

    let response = check_status(response).await?;
    let data: VideosResponse = response.json().await?;

    let item = data.items.into_iter().next().ok_or(YoutubeError::VideoNotFound)?;
    Ok(metadata_from_item(item))
}

/// Fetch the top 5 search results for a keyword
pub async fn search_videos(keyword: &str, api_key: &str) -> Result<Vec<SearchResult>, YoutubeError> {
    let client = create_client()?;

    let response = client
        .get(format!("{}/search", API_BASE))
        .query(&[
            ("part", "snippet"),
            ("type", "video"),
            ("maxResults", "5"),
            ("q", keyword),
            ("key", api_key),
        ])
        .send()
        .await?;

    let response = check_status(response).await?;
    let data: SearchResponse = response.json().await?;
    Ok(data.items)
}

/// Surface a non-2xx response as an API error, keeping the upstream message
/// when the body is parseable.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, YoutubeError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ApiErrorBody>().await {
        Ok(body) => body.error.message,
        Err(_) => "Failed to fetch video data.".to_string(),
    };
    Err(YoutubeError::Api {
        status: status.as_u16(),
        message,
    })
}

fn metadata_from_item(item: VideoItem) -> VideoMetadata {
    let thumbnail = item.snippet.thumbnails.best_url().map(str::to_string);
    VideoMetadata {
        title: item.snippet.title,
        description: item.snippet.description,
        tags: item.snippet.tags.unwrap_or_default(),
        duration: item.content_details.and_then(|d| d.duration),
        thumbnail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_id_from_watch_url() {
        let id = extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(id.as_deref(), Some("dQw4w9WgXcQ"));
    }

    #[test]
    fn extracts_id_from_short_url() {
        let id = extract_video_id("https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(id.as_deref(), Some("dQw4w9WgXcQ"));
    }

    #[test]
    fn extracts_id_from_embed_and_v_urls() {
        assert_eq!(
            extract_video_id("youtube.com/embed/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_video_id("youtube.com/v/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn extracts_bare_id_with_surrounding_whitespace() {
        assert_eq!(
            extract_video_id("  dQw4w9WgXcQ  ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn rejects_wrong_length_and_bad_characters() {
        assert!(extract_video_id("dQw4w9WgXc").is_none());
        assert!(extract_video_id("dQw4w9WgXcQQ").is_none());
        assert!(extract_video_id("dQw4w9WgXc!").is_none());
        assert!(extract_video_id("not a video").is_none());
        assert!(extract_video_id("").is_none());
    }

    #[test]
    fn search_keyword_prefers_first_tag() {
        let metadata = VideoMetadata {
            title: "Baking Perfect Cookies At Home".to_string(),
            description: None,
            tags: vec!["baking".to_string(), "cookies".to_string()],
            duration: None,
            thumbnail: None,
        };
        assert_eq!(metadata.search_keyword(), "baking");
    }

    #[test]
    fn search_keyword_falls_back_to_first_three_title_words() {
        let metadata = VideoMetadata {
            title: "Baking Perfect Cookies At Home".to_string(),
            description: None,
            tags: Vec::new(),
            duration: None,
            thumbnail: None,
        };
        assert_eq!(metadata.search_keyword(), "Baking Perfect Cookies");
    }

    #[test]
    fn best_thumbnail_prefers_high_resolution() {
        let set: ThumbnailSet = serde_json::from_str(
            r#"{"default": {"url": "d"}, "medium": {"url": "m"}, "high": {"url": "h"}}"#,
        )
        .unwrap();
        assert_eq!(set.best_url(), Some("h"));

        let set: ThumbnailSet = serde_json::from_str(r#"{"default": {"url": "d"}}"#).unwrap();
        assert_eq!(set.best_url(), Some("d"));

        let set = ThumbnailSet::default();
        assert_eq!(set.best_url(), None);
    }

    #[test]
    fn parses_videos_response_into_metadata() {
        let json = r#"{
            "items": [{
                "snippet": {
                    "title": "Baking Cookies",
                    "description": "Learn to bake.",
                    "tags": ["baking", "cookies"],
                    "thumbnails": {"high": {"url": "https://img.example/hq.jpg"}}
                },
                "contentDetails": {"duration": "PT4M13S"}
            }]
        }"#;
        let response: VideosResponse = serde_json::from_str(json).unwrap();
        let metadata = metadata_from_item(response.items.into_iter().next().unwrap());
        assert_eq!(metadata.title, "Baking Cookies");
        assert_eq!(metadata.tags, vec!["baking", "cookies"]);
        assert_eq!(metadata.duration.as_deref(), Some("PT4M13S"));
        assert_eq!(metadata.thumbnail.as_deref(), Some("https://img.example/hq.jpg"));
    }

    #[test]
    fn missing_tags_and_duration_become_defaults() {
        let json = r#"{"items": [{"snippet": {"title": "Untitled clip"}}]}"#;
        let response: VideosResponse = serde_json::from_str(json).unwrap();
        let metadata = metadata_from_item(response.items.into_iter().next().unwrap());
        assert!(metadata.tags.is_empty());
        assert!(metadata.duration.is_none());
        assert!(metadata.description.is_none());
    }

    #[test]
    fn parses_search_response_snippets() {
        let json = r#"{
            "items": [
                {"snippet": {"title": "Rival one", "thumbnails": {"medium": {"url": "m1"}}}},
                {"snippet": {"title": "Rival two", "thumbnails": {}}}
            ]
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0].snippet.title, "Rival one");
        assert_eq!(response.items[0].snippet.thumbnails.best_url(), Some("m1"));
        assert_eq!(response.items[1].snippet.thumbnails.best_url(), None);
    }
}
