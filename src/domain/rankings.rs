//! Rankings domain - reads from the externally maintained `v_strategic_benchmarks` view

use sqlx::{Executor, Postgres};

use crate::models::Recommendation;

/// Top rows of the strategic benchmark view by engagement rate
pub async fn top_recommendations<'e, E>(
    executor: E,
    limit: i64,
) -> Result<Vec<Recommendation>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as::<_, Recommendation>(
        r#"
        SELECT title, agent_recommendation
        FROM v_strategic_benchmarks
        ORDER BY engagement_rate DESC NULLS LAST
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(executor)
    .await
}
