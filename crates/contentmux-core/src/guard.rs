//! Usage gating with tier caching

use contentmux_db::{CreateUser, UsageRepository, UserRepository};
use contentmux_types::{Tier, UsageCheck, UserId};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::{BillingPeriod, CoreError};

/// Usage metric counting content jobs
pub const JOB_METRIC: &str = "content_jobs";

/// Reads a user's tier and current-period usage and applies the usage gate.
///
/// Tiers are cached per user; usage counts are read fresh on every check.
///
/// [`check`](Self::check) and the write in
/// [`submit_job`](Self::submit_job) are separate storage round trips.
/// Concurrent requests for the same user can both pass the check before
/// either records, so a limited quota may be exceeded by the number of
/// racing requests. The job insert and the usage increment commit together,
/// so no job goes uncounted.
#[derive(Clone)]
pub struct UsageGuard<U: UserRepository, R: UsageRepository> {
    users: Arc<U>,
    usage: Arc<R>,
    /// Cache of user_id -> tier
    tier_cache: Cache<Uuid, Tier>,
}

impl<U: UserRepository, R: UsageRepository> UsageGuard<U, R> {
    /// Create a new guard with a one minute tier cache
    pub fn new(users: Arc<U>, usage: Arc<R>) -> Self {
        Self::with_cache_duration(users, usage, Duration::from_secs(60))
    }

    /// Create with custom cache duration
    pub fn with_cache_duration(users: Arc<U>, usage: Arc<R>, cache_duration: Duration) -> Self {
        Self {
            users,
            usage,
            tier_cache: Cache::builder()
                .time_to_live(cache_duration)
                .max_capacity(10_000)
                .build(),
        }
    }

    /// Get user's tier
    pub async fn get_tier(&self, user_id: &UserId) -> Result<Tier, CoreError> {
        if let Some(tier) = self.tier_cache.get(&user_id.0).await {
            return Ok(tier);
        }

        let user = self
            .users
            .find_by_id(user_id.0)
            .await?
            .ok_or(CoreError::UserNotFound)?;

        let tier = user.tier();
        self.tier_cache.insert(user_id.0, tier).await;

        Ok(tier)
    }

    /// Get user's tier, provisioning a trial account on first sight
    pub async fn ensure_user(
        &self,
        user_id: &UserId,
        email: Option<&str>,
    ) -> Result<Tier, CoreError> {
        match self.get_tier(user_id).await {
            Err(CoreError::UserNotFound) => {}
            other => return other,
        }

        let user = self
            .users
            .create(CreateUser {
                id: user_id.0,
                email: email.map(str::to_string),
                tier: Tier::DEFAULT.to_string(),
                role: "user".to_string(),
            })
            .await?;

        tracing::info!(user_id = %user_id, tier = %user.tier, "Provisioned new user");

        let tier = user.tier();
        self.tier_cache.insert(user_id.0, tier).await;
        Ok(tier)
    }

    /// Jobs the user has consumed in `period`
    pub async fn used_in_period(
        &self,
        user_id: &UserId,
        period: &BillingPeriod,
    ) -> Result<u64, CoreError> {
        let count = self
            .usage
            .get_count(user_id.0, JOB_METRIC, &period.key())
            .await?;

        u64::try_from(count).map_err(|_| {
            tracing::error!(user_id = %user_id, count, "Negative usage count in storage");
            CoreError::InvalidUsageCount(count)
        })
    }

    /// Decide whether the user may create one more job in `period`
    pub async fn check(
        &self,
        user_id: &UserId,
        period: &BillingPeriod,
    ) -> Result<UsageCheck, CoreError> {
        let tier = self.get_tier(user_id).await?;
        let used = self.used_in_period(user_id, period).await?;
        Ok(UsageCheck::evaluate(tier, used))
    }

    /// Move a user to `tier` and return the previous tier
    pub async fn set_tier(&self, user_id: &UserId, tier: Tier) -> Result<Tier, CoreError> {
        let previous = self.get_tier(user_id).await?;

        self.users.update_tier(user_id.0, tier.as_str()).await?;
        self.invalidate_tier(user_id).await;

        Ok(previous)
    }

    /// Invalidate cached tier for a user
    pub async fn invalidate_tier(&self, user_id: &UserId) {
        self.tier_cache.invalidate(&user_id.0).await;
    }
}

impl<U: UserRepository, R: UsageRepository> std::fmt::Debug for UsageGuard<U, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageGuard")
            .field("cached_tiers", &self.tier_cache.entry_count())
            .finish_non_exhaustive()
    }
}
