//! Competitor discovery: one search, one batch of benchmark inserts

use serde::Serialize;

use crate::services::youtube::{SearchQuery, VideoPlatform, YouTubeError};
use crate::store::ScoutStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoutReport {
    /// Videos returned by the search
    pub found: usize,
    /// Videos that were not already benchmarks
    pub inserted: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    #[error(transparent)]
    Platform(#[from] YouTubeError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub async fn run_scout(
    platform: &dyn VideoPlatform,
    store: &dyn ScoutStore,
    query: &SearchQuery,
) -> Result<ScoutReport, ScoutError> {
    let videos = platform.search_top_videos(query).await?;
    let inserted = store.record_benchmarks(&videos).await?;

    tracing::info!(
        query = %query.text,
        found = videos.len(),
        inserted,
        "[scout] Scout complete"
    );

    Ok(ScoutReport {
        found: videos.len(),
        inserted,
    })
}
