//! Metric sync: look up one video's statistics and store a sample

use chrono::{DateTime, Utc};

use crate::models::MetricSample;
use crate::services::youtube::{VideoPlatform, YouTubeError};
use crate::store::ScoutStore;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Video not found")]
    NotFound,
    #[error(transparent)]
    Platform(#[from] YouTubeError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub async fn sync_video(
    platform: &dyn VideoPlatform,
    store: &dyn ScoutStore,
    video_id: &str,
    captured_at: DateTime<Utc>,
) -> Result<MetricSample, SyncError> {
    let details = platform
        .video_details(video_id)
        .await?
        .ok_or(SyncError::NotFound)?;

    let sample = MetricSample {
        video_id: details.video_id,
        captured_at,
        title: details.title,
        view_count: details.statistics.view_count,
        like_count: details.statistics.like_count,
        comment_count: details.statistics.comment_count,
    };
    store.record_metric_sample(&sample).await?;

    tracing::info!(
        video_id = %sample.video_id,
        views = sample.view_count,
        likes = sample.like_count,
        comments = sample.comment_count,
        "[sync] Stored metric sample"
    );

    Ok(sample)
}
