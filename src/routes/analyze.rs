//! Ranking endpoint (/api/analyze)

use axum::{Json, Router, extract::State, routing::get};
use std::sync::Arc;

use crate::AppState;
use crate::models::Recommendation;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/analyze", get(analyze))
}

/// GET /api/analyze - Top strategic benchmarks
///
/// Never fails: an empty or unreachable view renders as `[]` so the dashboard
/// can show "no data yet".
async fn analyze(State(state): State<Arc<AppState>>) -> Json<Vec<Recommendation>> {
    match state
        .store
        .top_recommendations(state.settings.ranking_limit)
        .await
    {
        Ok(rows) => Json(rows),
        Err(e) => {
            tracing::warn!(error = %e, "[analyze] Ranking query failed, returning empty list");
            Json(Vec::new())
        }
    }
}
