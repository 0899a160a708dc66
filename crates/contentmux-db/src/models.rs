//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use contentmux_types::{ContentKind, JobId, JobStatus, Platform, Tier, UserId};

/// User row from the database
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: Option<String>,
    pub tier: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Content job row from the database
#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content_kind: String,
    pub source: String,
    pub platforms: Vec<String>,
    pub skipped_platforms: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// Convert to domain UserId
    pub fn user_id(&self) -> UserId {
        UserId(self.id)
    }

    /// Resolve the stored tier, falling back to trial for unknown values
    pub fn tier(&self) -> Tier {
        match Tier::from_id(&self.tier) {
            Some(tier) => tier,
            None => {
                tracing::warn!(
                    user_id = %self.id,
                    stored_tier = %self.tier,
                    fallback = %Tier::DEFAULT,
                    "Unrecognized tier in user record"
                );
                Tier::DEFAULT
            }
        }
    }
}

impl JobRow {
    /// Convert to domain JobId
    pub fn job_id(&self) -> JobId {
        JobId(self.id)
    }

    /// Convert to domain UserId
    pub fn user_id(&self) -> UserId {
        UserId(self.user_id)
    }

    /// Stored content kind, `None` if the column holds an unknown value
    pub fn kind(&self) -> Option<ContentKind> {
        self.content_kind.parse().ok()
    }

    /// Stored job status, `None` if the column holds an unknown value
    pub fn job_status(&self) -> Option<JobStatus> {
        self.status.parse().ok()
    }

    /// Target platforms, ignoring values that no longer parse
    pub fn target_platforms(&self) -> Vec<Platform> {
        parse_platforms(&self.platforms)
    }

    /// Requested platforms that the tier could not access
    pub fn skipped(&self) -> Vec<Platform> {
        parse_platforms(&self.skipped_platforms)
    }
}

fn parse_platforms(values: &[String]) -> Vec<Platform> {
    values.iter().filter_map(|p| p.parse().ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_tier(tier: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            email: Some("test@example.com".to_string()),
            tier: tier.to_string(),
            role: "user".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_tier_resolution() {
        assert_eq!(user_with_tier("pro").tier(), Tier::Pro);
        assert_eq!(user_with_tier("enterprise").tier(), Tier::Enterprise);
        assert_eq!(user_with_tier("Enterprise").tier(), Tier::Trial);
        assert_eq!(user_with_tier(" pro").tier(), Tier::Trial);
        assert_eq!(user_with_tier("gold").tier(), Tier::Trial);
    }

    #[test]
    fn test_job_platforms_skip_unknown() {
        let row = JobRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            content_kind: "text".to_string(),
            source: "hello".to_string(),
            platforms: vec!["twitter".to_string(), "myspace".to_string()],
            skipped_platforms: vec!["tiktok".to_string()],
            status: "pending".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(row.target_platforms(), vec![Platform::Twitter]);
        assert_eq!(row.skipped(), vec![Platform::TikTok]);
        assert_eq!(row.kind(), Some(ContentKind::Text));
        assert_eq!(row.job_status(), Some(JobStatus::Pending));
    }
}
