//! YouTube Data API v3 client: keyword search and per-video statistics

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::MAX_SEARCH_RESULTS;

/// Parameters for a discovery search
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub text: String,
    pub max_results: u32,
    pub published_after: Option<DateTime<Utc>>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, published_after: Option<DateTime<Utc>>) -> Self {
        Self {
            text: text.into(),
            max_results: MAX_SEARCH_RESULTS,
            published_after,
        }
    }
}

/// A competitor video returned by search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredVideo {
    pub video_id: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VideoStatistics {
    #[serde(rename = "viewCount", alias = "view_count", default, deserialize_with = "count")]
    pub view_count: i64,
    #[serde(rename = "likeCount", alias = "like_count", default, deserialize_with = "count")]
    pub like_count: i64,
    #[serde(
        rename = "commentCount",
        alias = "comment_count",
        default,
        deserialize_with = "count"
    )]
    pub comment_count: i64,
}

/// Snippet and statistics for a single video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDetails {
    pub video_id: String,
    pub title: String,
    pub statistics: VideoStatistics,
}

#[derive(Debug, thiserror::Error)]
pub enum YouTubeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("YouTube API error ({status}): {body}")]
    Api { status: u16, body: String },
}

/// The video-platform operations the service depends on
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    /// Single page of search results ordered by view count
    async fn search_top_videos(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<DiscoveredVideo>, YouTubeError>;

    /// Snippet + statistics for one id, `None` if the platform doesn't know it
    async fn video_details(&self, video_id: &str) -> Result<Option<VideoDetails>, YouTubeError>;
}

#[derive(Clone)]
pub struct YouTubeClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl YouTubeClient {
    pub fn new(api_key: &str, base_url: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, YouTubeError> {
        let url = format!("{}/{}", self.base_url, path);

        let resp = self
            .http
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await?;
            return Err(YouTubeError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.json().await?)
    }
}

#[async_trait]
impl VideoPlatform for YouTubeClient {
    async fn search_top_videos(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<DiscoveredVideo>, YouTubeError> {
        let mut params = vec![
            ("part", "snippet".to_string()),
            ("type", "video".to_string()),
            ("order", "viewCount".to_string()),
            ("q", query.text.clone()),
            (
                "maxResults",
                query.max_results.min(MAX_SEARCH_RESULTS).to_string(),
            ),
        ];
        if let Some(after) = query.published_after {
            params.push((
                "publishedAfter",
                after.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }

        let response: SearchResponse = self.get_json("search", &params).await?;
        Ok(response.into_videos(query.max_results))
    }

    async fn video_details(&self, video_id: &str) -> Result<Option<VideoDetails>, YouTubeError> {
        let params = [
            ("part", "snippet,statistics".to_string()),
            ("id", video_id.to_string()),
        ];

        let response: VideoListResponse = self.get_json("videos", &params).await?;
        Ok(response.into_first(video_id))
    }
}

// Wire types

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

impl SearchResponse {
    fn into_videos(self, max_results: u32) -> Vec<DiscoveredVideo> {
        self.items
            .into_iter()
            .filter_map(|item| {
                // Channel and playlist hits carry no videoId
                let video_id = item.id.video_id?;
                Some(DiscoveredVideo {
                    video_id,
                    title: item.snippet.title,
                })
            })
            .take(max_results as usize)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

impl VideoListResponse {
    fn into_first(self, requested_id: &str) -> Option<VideoDetails> {
        self.items.into_iter().next().map(|item| VideoDetails {
            video_id: item.id.unwrap_or_else(|| requested_id.to_string()),
            title: item.snippet.title,
            statistics: item.statistics,
        })
    }
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: Option<String>,
    #[serde(default)]
    snippet: Snippet,
    #[serde(default)]
    statistics: VideoStatistics,
}

/// Counts arrive as decimal strings ("1234"); tolerate numbers, nulls and junk
fn count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0),
        Some(serde_json::Value::Number(n)) => n.as_i64().unwrap_or(0),
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_skips_non_video_hits() {
        let response: SearchResponse = serde_json::from_value(json!({
            "items": [
                { "id": { "kind": "youtube#video", "videoId": "abc123" }, "snippet": { "title": "Test Video" } },
                { "id": { "kind": "youtube#channel", "channelId": "UC1" }, "snippet": { "title": "A channel" } },
                { "id": { "kind": "youtube#video", "videoId": "def456" }, "snippet": { "title": "Term vs Whole" } }
            ]
        }))
        .unwrap();

        let videos = response.into_videos(10);
        assert_eq!(
            videos,
            vec![
                DiscoveredVideo { video_id: "abc123".into(), title: "Test Video".into() },
                DiscoveredVideo { video_id: "def456".into(), title: "Term vs Whole".into() },
            ]
        );
    }

    #[test]
    fn test_search_without_items_is_empty() {
        let response: SearchResponse = serde_json::from_value(json!({ "kind": "youtube#searchListResponse" })).unwrap();
        assert!(response.into_videos(10).is_empty());
    }

    #[test]
    fn test_statistics_default_to_zero() {
        let response: VideoListResponse = serde_json::from_value(json!({
            "items": [{
                "id": "C6a7iLnAMlQ",
                "snippet": { "title": "Final Expense in Texas" },
                "statistics": { "viewCount": "15321" }
            }]
        }))
        .unwrap();

        let details = response.into_first("C6a7iLnAMlQ").unwrap();
        assert_eq!(details.title, "Final Expense in Texas");
        assert_eq!(details.statistics.view_count, 15321);
        assert_eq!(details.statistics.like_count, 0);
        assert_eq!(details.statistics.comment_count, 0);
    }

    #[test]
    fn test_statistics_accept_snake_case_and_numbers() {
        let stats: VideoStatistics = serde_json::from_value(json!({
            "view_count": 10,
            "like_count": "4",
            "comment_count": null
        }))
        .unwrap();
        assert_eq!(stats, VideoStatistics { view_count: 10, like_count: 4, comment_count: 0 });
    }

    #[test]
    fn test_empty_video_list_is_none() {
        let response: VideoListResponse = serde_json::from_value(json!({ "items": [] })).unwrap();
        assert!(response.into_first("missing").is_none());
    }
}
