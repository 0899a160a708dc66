//! Mock repositories for testing

use async_trait::async_trait;
use chrono::Utc;
use contentmux_db::{
    CreateJob, CreateUser, DbError, DbResult, JobRepository, JobRow, UsageRepository,
    UserRepository, UserRow,
};
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// In-memory user repository for testing.
///
/// Only the id is unique, matching the `users` table: an email may appear
/// on several rows.
#[derive(Default, Clone)]
pub struct MockUserRepository {
    users: Arc<DashMap<Uuid, UserRow>>,
    lookups: Arc<AtomicUsize>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a test user with the given stored tier string
    pub fn insert_with_tier(&self, tier: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.users.insert(
            id,
            UserRow {
                id,
                email: Some(format!("test-{id}@example.com")),
                tier: tier.to_string(),
                role: "user".to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        );
        id
    }

    /// Overwrite a stored tier without going through the repository trait
    pub fn set_stored_tier(&self, id: Uuid, tier: &str) {
        if let Some(mut user) = self.users.get_mut(&id) {
            user.tier = tier.to_string();
        }
    }

    /// Number of `find_by_id` calls that reached the store
    #[allow(dead_code)]
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn contains(&self, id: Uuid) -> bool {
        self.users.contains_key(&id)
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.get(&id).map(|r| r.value().clone()))
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        let row = self
            .users
            .entry(user.id)
            .or_insert_with(|| UserRow {
                id: user.id,
                email: user.email,
                tier: user.tier,
                role: user.role,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .value()
            .clone();
        Ok(row)
    }

    async fn update_tier(&self, id: Uuid, tier: &str) -> DbResult<()> {
        let mut user = self.users.get_mut(&id).ok_or(DbError::NotFound)?;
        user.tier = tier.to_string();
        user.updated_at = Utc::now();
        Ok(())
    }
}

/// In-memory usage repository for testing
#[derive(Default, Clone)]
pub struct MockUsageRepository {
    counts: Arc<DashMap<(Uuid, String, String), i64>>,
}

impl MockUsageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a count directly, including values real storage would reject
    pub fn set_count(&self, user_id: Uuid, metric: &str, period: &str, count: i64) {
        self.counts
            .insert((user_id, metric.to_string(), period.to_string()), count);
    }
}

#[async_trait]
impl UsageRepository for MockUsageRepository {
    async fn get_count(&self, user_id: Uuid, metric: &str, period: &str) -> DbResult<i64> {
        Ok(self
            .counts
            .get(&(user_id, metric.to_string(), period.to_string()))
            .map_or(0, |c| *c.value()))
    }

    async fn increment(
        &self,
        user_id: Uuid,
        metric: &str,
        period: &str,
        count: i64,
    ) -> DbResult<i64> {
        let mut entry = self
            .counts
            .entry((user_id, metric.to_string(), period.to_string()))
            .or_insert(0);
        *entry += count;
        Ok(*entry)
    }
}

/// In-memory job repository for testing.
///
/// Job inserts count against the shared [`MockUsageRepository`], and an
/// injected failure leaves both untouched, as a rolled back transaction does.
#[derive(Clone)]
#[allow(dead_code)]
pub struct MockJobRepository {
    jobs: Arc<DashMap<Uuid, JobRow>>,
    usage: MockUsageRepository,
    fail_writes: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl MockJobRepository {
    pub fn new(usage: MockUsageRepository) -> Self {
        Self {
            jobs: Arc::new(DashMap::new()),
            usage,
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent `create_counted` fail
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Insert a job with an arbitrary status, bypassing the usage count
    pub fn insert_with_status(&self, user_id: Uuid, status: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.jobs.insert(
            id,
            JobRow {
                id,
                user_id,
                content_kind: "text".to_string(),
                source: "hello".to_string(),
                platforms: vec!["twitter".to_string()],
                skipped_platforms: Vec::new(),
                status: status.to_string(),
                created_at: Utc::now(),
            },
        );
        id
    }
}

#[async_trait]
impl JobRepository for MockJobRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<JobRow>> {
        Ok(self.jobs.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_user_id(&self, user_id: Uuid, limit: i64) -> DbResult<Vec<JobRow>> {
        let mut rows: Vec<JobRow> = self
            .jobs
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.value().clone())
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(rows)
    }

    async fn create_counted(
        &self,
        job: CreateJob,
        metric: &str,
        period: &str,
    ) -> DbResult<(JobRow, i64)> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        }

        let row = JobRow {
            id: job.id,
            user_id: job.user_id,
            content_kind: job.content_kind,
            source: job.source,
            platforms: job.platforms,
            skipped_platforms: job.skipped_platforms,
            status: "pending".to_string(),
            created_at: Utc::now(),
        };
        let total = self.usage.increment(job.user_id, metric, period, 1).await?;
        self.jobs.insert(row.id, row.clone());
        Ok((row, total))
    }

    async fn update_status(&self, id: Uuid, status: &str) -> DbResult<Option<JobRow>> {
        let Some(mut row) = self.jobs.get_mut(&id) else {
            return Ok(None);
        };
        if row.job_status().is_some_and(|s| s.is_terminal()) {
            return Ok(None);
        }
        row.status = status.to_string();
        Ok(Some(row.value().clone()))
    }
}
