//! PostgreSQL usage repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::repo::UsageRepository;

/// Upsert adding `$4` to a usage count, returning the new total
pub(crate) const INCREMENT_USAGE_SQL: &str = r#"
    INSERT INTO usage (user_id, metric, period, count)
    VALUES ($1, $2, $3, $4)
    ON CONFLICT (user_id, metric, period)
    DO UPDATE SET count = usage.count + EXCLUDED.count, recorded_at = NOW()
    RETURNING count
"#;

/// PostgreSQL usage repository
#[derive(Clone)]
pub struct PgUsageRepository {
    pool: PgPool,
}

impl PgUsageRepository {
    /// Create a new usage repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsageRepository for PgUsageRepository {
    async fn get_count(&self, user_id: Uuid, metric: &str, period: &str) -> DbResult<i64> {
        let result: (Option<i64>,) = sqlx::query_as(
            r#"
            SELECT SUM(count)::BIGINT
            FROM usage
            WHERE user_id = $1 AND metric = $2 AND period = $3
            "#,
        )
        .bind(user_id)
        .bind(metric)
        .bind(period)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0.unwrap_or(0))
    }

    async fn increment(
        &self,
        user_id: Uuid,
        metric: &str,
        period: &str,
        count: i64,
    ) -> DbResult<i64> {
        let result: (i64,) = sqlx::query_as(INCREMENT_USAGE_SQL)
        .bind(user_id)
        .bind(metric)
        .bind(period)
        .bind(count)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }
}
