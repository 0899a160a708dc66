//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::*;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>>;

    /// Create a new user. An existing row with the same ID is returned unchanged.
    async fn create(&self, user: CreateUser) -> DbResult<UserRow>;

    /// Update user tier. Returns `NotFound` if no row matched.
    async fn update_tier(&self, id: Uuid, tier: &str) -> DbResult<()>;
}

/// Create user input
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub tier: String,
    pub role: String,
}

/// Usage repository trait
///
/// Counts are keyed by `(user_id, metric, period)`, with `period` a
/// `YYYY-MM` billing month.
#[async_trait]
pub trait UsageRepository: Send + Sync {
    /// Get the count for one metric, zero when nothing was recorded
    async fn get_count(&self, user_id: Uuid, metric: &str, period: &str) -> DbResult<i64>;

    /// Atomically add to a count (upsert) and return the new total
    async fn increment(
        &self,
        user_id: Uuid,
        metric: &str,
        period: &str,
        count: i64,
    ) -> DbResult<i64>;
}

/// Content job repository trait
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Find a job by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<JobRow>>;

    /// Most recent jobs for a user, newest first
    async fn find_by_user_id(&self, user_id: Uuid, limit: i64) -> DbResult<Vec<JobRow>>;

    /// Insert a pending job and add one to its owner's `metric` count for
    /// `period` in a single transaction. Returns the row and the new total.
    async fn create_counted(
        &self,
        job: CreateJob,
        metric: &str,
        period: &str,
    ) -> DbResult<(JobRow, i64)>;

    /// Set the status of a job that has not finished yet.
    ///
    /// Returns `None` when no job with this ID is pending or processing.
    async fn update_status(&self, id: Uuid, status: &str) -> DbResult<Option<JobRow>>;
}

/// Create job input
#[derive(Debug, Clone)]
pub struct CreateJob {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content_kind: String,
    pub source: String,
    pub platforms: Vec<String>,
    pub skipped_platforms: Vec<String>,
}
