//! Benchmarks domain - DB queries for discovered competitor videos
//!
//! All functions use the generic Executor pattern, allowing them to work with
//! both `&PgPool` (for standalone queries) and `&mut PgConnection` (for transactions).

use sqlx::{Executor, Postgres};

use crate::models::BenchmarkVideo;

/// Insert a benchmark unless the video id is already known.
/// Returns true if a row was created.
pub async fn insert_benchmark<'e, E>(
    executor: E,
    video_id: &str,
    title: &str,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO youtube_benchmarks (video_id, title)
        VALUES ($1, $2)
        ON CONFLICT (video_id) DO NOTHING
        "#,
    )
    .bind(video_id)
    .bind(title)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Get the stored title of a benchmark
pub async fn get_benchmark_title<'e, E>(
    executor: E,
    video_id: &str,
) -> Result<Option<String>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let row: Option<(String,)> =
        sqlx::query_as("SELECT title FROM youtube_benchmarks WHERE video_id = $1")
            .bind(video_id)
            .fetch_optional(executor)
            .await?;

    Ok(row.map(|(title,)| title))
}

/// List benchmarks with the view count of their newest metric sample
pub async fn list_benchmarks<'e, E>(
    executor: E,
    limit: i64,
) -> Result<Vec<BenchmarkVideo>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as::<_, BenchmarkVideo>(
        r#"
        SELECT b.video_id, b.title, latest.view_count AS latest_view_count
        FROM youtube_benchmarks b
        LEFT JOIN LATERAL (
            SELECT m.view_count
            FROM youtube_video_metrics m
            WHERE m.video_id = b.video_id
            ORDER BY m.captured_at DESC
            LIMIT 1
        ) latest ON TRUE
        ORDER BY latest.view_count DESC NULLS LAST, b.video_id ASC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(executor)
    .await
}
