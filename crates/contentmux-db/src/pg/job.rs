//! PostgreSQL content job repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use contentmux_types::JobStatus;

use super::usage::INCREMENT_USAGE_SQL;
use crate::error::DbResult;
use crate::models::JobRow;
use crate::repo::{CreateJob, JobRepository};

/// PostgreSQL content job repository
#[derive(Clone)]
pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    /// Create a new job repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<JobRow>> {
        let job = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT id, user_id, content_kind, source, platforms, skipped_platforms,
                   status, created_at
            FROM content_jobs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(job)
    }

    async fn find_by_user_id(&self, user_id: Uuid, limit: i64) -> DbResult<Vec<JobRow>> {
        let jobs = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT id, user_id, content_kind, source, platforms, skipped_platforms,
                   status, created_at
            FROM content_jobs
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }

    async fn create_counted(
        &self,
        job: CreateJob,
        metric: &str,
        period: &str,
    ) -> DbResult<(JobRow, i64)> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, JobRow>(
            r#"
            INSERT INTO content_jobs
                (id, user_id, content_kind, source, platforms, skipped_platforms, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'pending')
            RETURNING id, user_id, content_kind, source, platforms, skipped_platforms,
                      status, created_at
            "#,
        )
        .bind(job.id)
        .bind(job.user_id)
        .bind(&job.content_kind)
        .bind(&job.source)
        .bind(&job.platforms)
        .bind(&job.skipped_platforms)
        .fetch_one(&mut *tx)
        .await?;

        let (total,): (i64,) = sqlx::query_as(INCREMENT_USAGE_SQL)
            .bind(job.user_id)
            .bind(metric)
            .bind(period)
            .bind(1_i64)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((row, total))
    }

    async fn update_status(&self, id: Uuid, status: &str) -> DbResult<Option<JobRow>> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            UPDATE content_jobs
            SET status = $2
            WHERE id = $1 AND status <> ALL($3)
            RETURNING id, user_id, content_kind, source, platforms, skipped_platforms,
                      status, created_at
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(terminal_statuses())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}

/// Statuses a job never leaves
fn terminal_statuses() -> Vec<String> {
    JobStatus::ALL
        .iter()
        .filter(|s| s.is_terminal())
        .map(|s| s.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert_eq!(terminal_statuses(), vec!["completed", "failed"]);
    }
}
