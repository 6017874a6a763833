//! Script outline endpoint (/api/generate_script)

use axum::{
    Router,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
};
use std::sync::Arc;

use super::scout::VideoParams;
use crate::AppState;
use crate::services::error::{ApiError, LogErr};
use crate::services::scripts::render_script;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/generate_script", get(generate_script))
}

/// GET /api/generate_script?video_id= - Text outline built from stored title and views
async fn generate_script(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VideoParams>,
) -> Result<impl IntoResponse, ApiError> {
    let video_id = params.video_id();

    let source = state
        .store
        .script_source(video_id)
        .await
        .log_500("[script] Lookup failed")?
        .ok_or_else(|| ApiError::not_found("Video not found"))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_script(&source),
    ))
}
