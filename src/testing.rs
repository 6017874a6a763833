//! In-memory stand-ins for Postgres, YouTube and the LLM used by unit tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::models::{BenchmarkVideo, MetricSample, Recommendation, ScriptSource};
use crate::services::assistant::{AssistantError, ChatAssistant};
use crate::services::youtube::{
    DiscoveredVideo, SearchQuery, VideoDetails, VideoPlatform, YouTubeError,
};
use crate::store::ScoutStore;
use crate::{AppState, ScoutSettings};

fn db_down() -> sqlx::Error {
    sqlx::Error::Protocol("database unavailable".to_string())
}

#[derive(Default)]
pub struct MemoryStore {
    pub benchmarks: Mutex<Vec<(String, String)>>,
    pub metrics: Mutex<Vec<MetricSample>>,
    pub recommendations: Mutex<Vec<Recommendation>>,
    pub insert_attempts: AtomicUsize,
    pub fail: bool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn benchmark_rows(&self) -> Vec<(String, String)> {
        self.benchmarks.lock().unwrap().clone()
    }

    pub fn metric_rows(&self) -> Vec<MetricSample> {
        self.metrics.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScoutStore for MemoryStore {
    async fn record_benchmarks(&self, videos: &[DiscoveredVideo]) -> Result<u64, sqlx::Error> {
        if self.fail {
            return Err(db_down());
        }
        let mut rows = self.benchmarks.lock().unwrap();
        let mut inserted = 0;
        for video in videos {
            self.insert_attempts.fetch_add(1, Ordering::SeqCst);
            if rows.iter().all(|(id, _)| id != &video.video_id) {
                rows.push((video.video_id.clone(), video.title.clone()));
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn record_metric_sample(&self, sample: &MetricSample) -> Result<(), sqlx::Error> {
        if self.fail {
            return Err(db_down());
        }
        let mut rows = self.metrics.lock().unwrap();
        match rows
            .iter_mut()
            .find(|r| r.video_id == sample.video_id && r.captured_at == sample.captured_at)
        {
            Some(existing) => existing.view_count = sample.view_count,
            None => rows.push(sample.clone()),
        }
        Ok(())
    }

    async fn top_recommendations(&self, limit: i64) -> Result<Vec<Recommendation>, sqlx::Error> {
        if self.fail {
            return Err(db_down());
        }
        let rows = self.recommendations.lock().unwrap();
        Ok(rows.iter().take(limit as usize).cloned().collect())
    }

    async fn script_source(&self, video_id: &str) -> Result<Option<ScriptSource>, sqlx::Error> {
        if self.fail {
            return Err(db_down());
        }
        let latest = self
            .metrics
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.video_id == video_id)
            .max_by_key(|m| m.captured_at)
            .map(|m| ScriptSource {
                video_id: m.video_id.clone(),
                title: m.title.clone(),
                view_count: m.view_count,
            });
        if latest.is_some() {
            return Ok(latest);
        }
        Ok(self
            .benchmarks
            .lock()
            .unwrap()
            .iter()
            .find(|(id, _)| id == video_id)
            .map(|(id, title)| ScriptSource {
                video_id: id.clone(),
                title: title.clone(),
                view_count: 0,
            }))
    }

    async fn list_benchmarks(&self, limit: i64) -> Result<Vec<BenchmarkVideo>, sqlx::Error> {
        if self.fail {
            return Err(db_down());
        }
        let rows = self.benchmarks.lock().unwrap();
        Ok(rows
            .iter()
            .take(limit as usize)
            .map(|(id, title)| BenchmarkVideo {
                video_id: id.clone(),
                title: title.clone(),
                latest_view_count: None,
            })
            .collect())
    }
}

#[derive(Default)]
pub struct StubPlatform {
    pub search_results: Vec<DiscoveredVideo>,
    pub details: Option<VideoDetails>,
    pub fail: bool,
    pub searches: AtomicUsize,
    pub last_query: Mutex<Option<SearchQuery>>,
}

impl StubPlatform {
    pub fn with_results(results: &[(&str, &str)]) -> Self {
        Self {
            search_results: results
                .iter()
                .map(|(id, title)| DiscoveredVideo {
                    video_id: id.to_string(),
                    title: title.to_string(),
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn with_details(details: VideoDetails) -> Self {
        Self {
            details: Some(details),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl VideoPlatform for StubPlatform {
    async fn search_top_videos(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<DiscoveredVideo>, YouTubeError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        if self.fail {
            return Err(YouTubeError::Api {
                status: 403,
                body: "quotaExceeded".to_string(),
            });
        }
        Ok(self.search_results.clone())
    }

    async fn video_details(&self, video_id: &str) -> Result<Option<VideoDetails>, YouTubeError> {
        if self.fail {
            return Err(YouTubeError::Api {
                status: 400,
                body: "keyInvalid".to_string(),
            });
        }
        Ok(self
            .details
            .clone()
            .filter(|d| d.video_id == video_id))
    }
}

pub struct StubAssistant {
    pub reply: Result<String, String>,
    pub last_message: Mutex<Option<String>>,
}

impl StubAssistant {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            last_message: Mutex::new(None),
        }
    }

    pub fn failing(body: &str) -> Self {
        Self {
            reply: Err(body.to_string()),
            last_message: Mutex::new(None),
        }
    }
}

#[async_trait]
impl ChatAssistant for StubAssistant {
    async fn complete(
        &self,
        _system_prompt: &str,
        message: &str,
    ) -> Result<String, AssistantError> {
        *self.last_message.lock().unwrap() = Some(message.to_string());
        self.reply.clone().map_err(|body| AssistantError::Api {
            status: 500,
            body,
        })
    }
}

pub fn test_state(
    store: Arc<MemoryStore>,
    videos: Arc<StubPlatform>,
    assistant: Arc<StubAssistant>,
) -> Arc<AppState> {
    Arc::new(AppState {
        store,
        videos,
        assistant,
        settings: ScoutSettings::default(),
    })
}
