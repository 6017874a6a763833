pub mod analyze;
pub mod chat;
pub mod scout;
pub mod scripts;

use axum::{
    Router,
    body::to_bytes,
    http::header,
    middleware::map_response,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

use crate::AppState;
use crate::services::error::ApiError;

const DASHBOARD_HTML: &str = include_str!("../../static/dashboard.html");

/// Error bodies longer than this are truncated to an empty message
const MAX_ERROR_BODY: usize = 64 * 1024;

/// Per-client quota for the `/api/*` routes
#[derive(Debug, Clone, Copy)]
pub struct RateLimit {
    /// Seconds between token refills
    pub refill_secs: u64,
    /// Requests allowed back to back
    pub burst: u32,
}

/// Build all routes for the API without rate limiting
pub fn build_routes() -> Router<Arc<AppState>> {
    assemble(api_routes())
}

/// Build all routes, rate limiting `/api/*` per client IP
pub fn build_rate_limited_routes(limit: RateLimit) -> Router<Arc<AppState>> {
    let config = GovernorConfigBuilder::default()
        .per_second(limit.refill_secs.max(1))
        .burst_size(limit.burst.max(1))
        .key_extractor(SmartIpKeyExtractor)
        .finish();

    let Some(config) = config else {
        tracing::error!(?limit, "Failed to build rate limit config, serving without limits");
        return build_routes();
    };

    let rate_limit_layer = GovernorLayer {
        config: config.into(),
    };

    assemble(api_routes().route_layer(rate_limit_layer))
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(analyze::routes())
        .merge(chat::routes())
        .merge(scout::routes())
        .merge(scripts::routes())
}

fn assemble(api: Router<Arc<AppState>>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(dashboard))
        .route("/health", get(health))
        .merge(api.route_layer(map_response(json_errors)))
}

async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

async fn health() -> &'static str {
    "ok"
}

/// Rewrite plain-text error responses from extractors and middleware
/// (rejections, 429s) into the `{"error": ...}` shape the handlers use.
async fn json_errors(response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if is_json {
        return response;
    }

    let (parts, body) = response.into_parts();
    let text = to_bytes(body, MAX_ERROR_BODY)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .unwrap_or_default();
    let message = if text.is_empty() {
        status.canonical_reason().unwrap_or("Request failed").to_string()
    } else {
        text
    };

    let mut rewritten = ApiError::new(status, message).into_response();
    for (name, value) in parts.headers.iter() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rewritten.headers_mut().insert(name.clone(), value.clone());
        }
    }
    rewritten
}
