//! Persistence seam between handlers and Postgres.
//!
//! Handlers and jobs talk to `ScoutStore`; `PgStore` forwards to the
//! `domain` query functions.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{benchmarks, metrics, rankings};
use crate::models::{BenchmarkVideo, MetricSample, Recommendation, ScriptSource};
use crate::services::youtube::DiscoveredVideo;

#[async_trait]
pub trait ScoutStore: Send + Sync {
    /// Insert new benchmarks in one transaction, skipping known ids.
    /// Returns the number of rows created.
    async fn record_benchmarks(&self, videos: &[DiscoveredVideo]) -> Result<u64, sqlx::Error>;

    async fn record_metric_sample(&self, sample: &MetricSample) -> Result<(), sqlx::Error>;

    async fn top_recommendations(&self, limit: i64) -> Result<Vec<Recommendation>, sqlx::Error>;

    /// Newest metric sample for the video, else its benchmark title with zero views
    async fn script_source(&self, video_id: &str) -> Result<Option<ScriptSource>, sqlx::Error>;

    async fn list_benchmarks(&self, limit: i64) -> Result<Vec<BenchmarkVideo>, sqlx::Error>;
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScoutStore for PgStore {
    async fn record_benchmarks(&self, videos: &[DiscoveredVideo]) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let mut inserted = 0;
        for video in videos {
            if benchmarks::insert_benchmark(&mut *tx, &video.video_id, &video.title).await? {
                inserted += 1;
            }
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn record_metric_sample(&self, sample: &MetricSample) -> Result<(), sqlx::Error> {
        metrics::upsert_metric_sample(&self.pool, sample).await
    }

    async fn top_recommendations(&self, limit: i64) -> Result<Vec<Recommendation>, sqlx::Error> {
        rankings::top_recommendations(&self.pool, limit).await
    }

    async fn script_source(&self, video_id: &str) -> Result<Option<ScriptSource>, sqlx::Error> {
        if let Some(source) = metrics::latest_sample(&self.pool, video_id).await? {
            return Ok(Some(source));
        }

        let title = benchmarks::get_benchmark_title(&self.pool, video_id).await?;
        Ok(title.map(|title| ScriptSource {
            video_id: video_id.to_string(),
            title,
            view_count: 0,
        }))
    }

    async fn list_benchmarks(&self, limit: i64) -> Result<Vec<BenchmarkVideo>, sqlx::Error> {
        benchmarks::list_benchmarks(&self.pool, limit).await
    }
}
