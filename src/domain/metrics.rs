//! Metrics domain - DB queries for per-video metric samples

use sqlx::{Executor, Postgres};

use crate::models::{MetricSample, ScriptSource};

/// Upsert a metric sample. A second sample for the same `(video_id, captured_at)`
/// only refreshes the view count.
pub async fn upsert_metric_sample<'e, E>(
    executor: E,
    sample: &MetricSample,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        r#"
        INSERT INTO youtube_video_metrics
            (video_id, captured_at, title, view_count, like_count, comment_count)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (video_id, captured_at)
        DO UPDATE SET view_count = EXCLUDED.view_count
        "#,
    )
    .bind(&sample.video_id)
    .bind(sample.captured_at)
    .bind(&sample.title)
    .bind(sample.view_count)
    .bind(sample.like_count)
    .bind(sample.comment_count)
    .execute(executor)
    .await?;

    Ok(())
}

/// Title and view count from the newest sample of a video
pub async fn latest_sample<'e, E>(
    executor: E,
    video_id: &str,
) -> Result<Option<ScriptSource>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as::<_, ScriptSource>(
        r#"
        SELECT video_id, title, view_count
        FROM youtube_video_metrics
        WHERE video_id = $1
        ORDER BY captured_at DESC
        LIMIT 1
        "#,
    )
    .bind(video_id)
    .fetch_optional(executor)
    .await
}
