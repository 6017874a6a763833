//! Application constants

/// Topic query used for competitor discovery when `SCOUT_QUERY` is unset
pub const DEFAULT_SCOUT_QUERY: &str = "Texas life insurance tips";

/// Only videos published after this instant are considered "modern" competitors
pub const DEFAULT_PUBLISHED_AFTER: &str = "2025-01-01T00:00:00Z";

/// The search endpoint returns at most one page of this many results
pub const MAX_SEARCH_RESULTS: u32 = 10;

/// Video synced when `/api/sync` is called without a `video_id`
pub const DEFAULT_SYNC_VIDEO_ID: &str = "C6a7iLnAMlQ";

/// Default number of rows returned by `/api/analyze`
pub const DEFAULT_RANKING_LIMIT: i64 = 5;

/// Upper bound for `RANKING_LIMIT`
pub const MAX_RANKING_LIMIT: i64 = 25;

/// Default page size for `/api/benchmarks`
pub const DEFAULT_BENCHMARK_PAGE_SIZE: i64 = 50;

/// Marker the assistant emits once it has enough context to draft a script
pub const READY_SENTINEL: &str = "[READY_TO_GENERATE]";

/// Persona sent as the system message with every chat request
pub const ASSISTANT_SYSTEM_PROMPT: &str = "You are a YouTube strategist for a Texas life-insurance \
creator. Help them plan videos that outperform the competitor benchmarks they track. Ask short \
clarifying questions about the target viewer, the product angle, and the hook. Once you have \
enough to write a full script, end your reply with [READY_TO_GENERATE].";
