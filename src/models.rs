//! Shared data models used across modules

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A competitor video stored in `youtube_benchmarks`, with the view count of
/// its newest metric sample if it has ever been synced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct BenchmarkVideo {
    pub video_id: String,
    pub title: String,
    pub latest_view_count: Option<i64>,
}

/// One row of `youtube_video_metrics`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSample {
    pub video_id: String,
    pub captured_at: DateTime<Utc>,
    pub title: String,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
}

/// A ranked row from `v_strategic_benchmarks`, serialized as `{title, rec}`
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Recommendation {
    pub title: String,
    #[serde(rename = "rec")]
    #[sqlx(rename = "agent_recommendation")]
    pub recommendation: Option<String>,
}

/// What a script outline is built from
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ScriptSource {
    pub video_id: String,
    pub title: String,
    pub view_count: i64,
}
