mod config;
mod constants;
mod domain;
mod jobs;
mod models;
mod routes;
mod services;
mod store;
#[cfg(test)]
mod testing;

use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use constants::{DEFAULT_RANKING_LIMIT, DEFAULT_SCOUT_QUERY};
use routes::RateLimit;
use services::assistant::{ChatAssistant, ChatClient};
use services::youtube::{SearchQuery, VideoPlatform, YouTubeClient};
use store::{PgStore, ScoutStore};

/// Request-independent knobs shared by the handlers
#[derive(Debug, Clone)]
pub struct ScoutSettings {
    pub query: SearchQuery,
    pub ranking_limit: i64,
}

impl Default for ScoutSettings {
    fn default() -> Self {
        Self {
            query: SearchQuery::new(DEFAULT_SCOUT_QUERY, None),
            ranking_limit: DEFAULT_RANKING_LIMIT,
        }
    }
}

pub struct AppState {
    pub store: Arc<dyn ScoutStore>,
    pub videos: Arc<dyn VideoPlatform>,
    pub assistant: Arc<dyn ChatAssistant>,
    pub settings: ScoutSettings,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scout_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::error!("Invalid configuration: {}", e);
        std::process::exit(1);
    });

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        });

    let store: Arc<dyn ScoutStore> = Arc::new(PgStore::new(pool.clone()));
    let videos: Arc<dyn VideoPlatform> = Arc::new(YouTubeClient::new(
        &config.youtube_api_key,
        &config.youtube_base_url,
    ));
    let assistant: Arc<dyn ChatAssistant> = Arc::new(ChatClient::new(
        &config.llm_api_key,
        &config.llm_base_url,
        &config.llm_model,
    ));
    let settings = ScoutSettings {
        query: SearchQuery::new(config.scout_query.clone(), config.published_after),
        ranking_limit: config.ranking_limit,
    };

    if let Some(cron_seconds) = config.scout_cron_seconds {
        let ctx = jobs::ScoutJobContext {
            videos: videos.clone(),
            store: store.clone(),
            query: settings.query.clone(),
        };
        tokio::spawn(jobs::run_scout_worker(pool, ctx, cron_seconds));
    }

    let state = Arc::new(AppState {
        store,
        videos,
        assistant,
        settings,
    });

    // Scout and chat hit paid upstream quotas; cap each client at a burst of 10
    let rate_limit = RateLimit {
        refill_secs: 6,
        burst: 10,
    };

    let app = routes::build_rate_limited_routes(rate_limit)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        });

    tracing::info!("Listening on http://{}", addr);
    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    {
        tracing::error!("Server failed: {}", e);
    }
}
