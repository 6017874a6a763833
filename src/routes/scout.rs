//! Discovery and metric sync endpoints (/api/scout, /api/sync, /api/benchmarks)

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;
use crate::constants::{DEFAULT_BENCHMARK_PAGE_SIZE, DEFAULT_SYNC_VIDEO_ID};
use crate::models::BenchmarkVideo;
use crate::services::error::{ApiError, LogErr};
use crate::services::scout::run_scout;
use crate::services::sync::{SyncError, sync_video};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/scout", get(scout))
        .route("/api/sync", get(sync))
        .route("/api/benchmarks", get(list_benchmarks))
}

#[derive(Serialize)]
struct ScoutResponse {
    status: &'static str,
    found: usize,
    inserted: u64,
}

/// GET /api/scout - Search for top competitor videos and store new ones
async fn scout(State(state): State<Arc<AppState>>) -> Result<Json<ScoutResponse>, ApiError> {
    let report = run_scout(
        state.videos.as_ref(),
        state.store.as_ref(),
        &state.settings.query,
    )
    .await
    .log_500("[scout] Scout failed")?;

    Ok(Json(ScoutResponse {
        status: "Scout complete",
        found: report.found,
        inserted: report.inserted,
    }))
}

#[derive(Deserialize)]
pub(crate) struct VideoParams {
    video_id: Option<String>,
}

impl VideoParams {
    /// Requested id, or the sample video when absent or blank
    pub(crate) fn video_id(&self) -> &str {
        self.video_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(DEFAULT_SYNC_VIDEO_ID)
    }
}

#[derive(Serialize)]
struct SyncResponse {
    status: &'static str,
    video: String,
}

/// GET /api/sync?video_id= - Capture current statistics for one video
async fn sync(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VideoParams>,
) -> Result<Json<SyncResponse>, ApiError> {
    let video_id = params.video_id();

    let result = sync_video(
        state.videos.as_ref(),
        state.store.as_ref(),
        video_id,
        Utc::now(),
    )
    .await;

    if let Err(SyncError::NotFound) = result {
        tracing::warn!(video_id, "[sync] Video not found");
        return Err(ApiError::not_found(SyncError::NotFound.to_string()));
    }
    let sample = result.log_500("[sync] Sync failed")?;

    Ok(Json(SyncResponse {
        status: "success",
        video: sample.title,
    }))
}

/// GET /api/benchmarks - Stored competitor videos with their latest view counts
async fn list_benchmarks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BenchmarkVideo>>, ApiError> {
    let rows = state
        .store
        .list_benchmarks(DEFAULT_BENCHMARK_PAGE_SIZE)
        .await
        .log_500("[benchmarks] List failed")?;

    Ok(Json(rows))
}
