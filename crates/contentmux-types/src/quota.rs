//! Job quotas and the usage gate
//!
//! The gate answers two questions for a tier and the number of jobs the user
//! has already consumed in the current billing period: may one more job be
//! created, and how many jobs remain.
//!
//! Both functions are total and pure. They do not guard against concurrent
//! callers observing the same count: two requests can each see capacity and
//! each record a job, overshooting a limited quota. Enforcement is best-effort
//! unless the caller serializes check and increment at the storage layer.

use std::num::NonZeroU32;

use serde::{Serialize, Serializer};

use crate::tier::{lookup, Tier};

/// Jobs allowed per billing period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobQuota {
    /// A positive job count
    Limited(NonZeroU32),
    /// No limit
    Unlimited,
}

impl JobQuota {
    /// Build a limited quota. Panics on zero, which fails compilation when
    /// used in a constant.
    pub const fn limited(jobs: u32) -> Self {
        match NonZeroU32::new(jobs) {
            Some(jobs) => Self::Limited(jobs),
            None => panic!("job quota must be positive"),
        }
    }

    /// Whether this quota is the unlimited sentinel
    pub const fn is_unlimited(&self) -> bool {
        matches!(self, Self::Unlimited)
    }

    /// The numeric limit, `None` when unlimited
    pub const fn limit(&self) -> Option<u32> {
        match self {
            Self::Limited(jobs) => Some(jobs.get()),
            Self::Unlimited => None,
        }
    }

    /// Whether one more job fits given `used` jobs already consumed
    pub fn allows(&self, used: u64) -> bool {
        match self {
            Self::Limited(jobs) => used < u64::from(jobs.get()),
            Self::Unlimited => true,
        }
    }

    /// Jobs left given `used` jobs already consumed, floored at zero
    pub fn remaining(&self, used: u64) -> Remaining {
        match self {
            Self::Limited(jobs) => Remaining::Jobs(u64::from(jobs.get()).saturating_sub(used)),
            Self::Unlimited => Remaining::Unlimited,
        }
    }
}

/// Serialized as the job count, or `null` when unlimited
impl Serialize for JobQuota {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.limit().serialize(serializer)
    }
}

/// Jobs left in the current billing period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Remaining {
    Jobs(u64),
    Unlimited,
}

impl Remaining {
    /// The numeric count, `None` when unlimited
    pub const fn jobs(&self) -> Option<u64> {
        match self {
            Self::Jobs(jobs) => Some(*jobs),
            Self::Unlimited => None,
        }
    }
}

impl std::fmt::Display for Remaining {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Jobs(jobs) => write!(f, "{jobs}"),
            Self::Unlimited => f.write_str("∞"),
        }
    }
}

/// Serialized as the job count, or `null` when unlimited
impl Serialize for Remaining {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.jobs().serialize(serializer)
    }
}

/// Whether a user on `tier_id` may create another job after `used` jobs.
///
/// Unknown tier identifiers are gated as trial.
pub fn has_capacity(tier_id: &str, used: u64) -> bool {
    lookup(tier_id).job_quota.allows(used)
}

/// Jobs remaining for a user on `tier_id` after `used` jobs.
///
/// Unknown tier identifiers are gated as trial.
pub fn remaining(tier_id: &str, used: u64) -> Remaining {
    lookup(tier_id).job_quota.remaining(used)
}

/// Outcome of gating one job request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageCheck {
    /// Tier the decision was made against
    pub tier: Tier,
    /// Jobs consumed in the current period
    pub used: u64,
    /// Tier quota, `null` when unlimited
    pub limit: JobQuota,
    /// Jobs left, `null` when unlimited
    pub remaining: Remaining,
    /// Whether another job may be created
    pub allowed: bool,
    /// Set when the user must move to a higher tier to continue
    pub requires_upgrade: bool,
    /// Next tier up, present only when denied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_tier: Option<Tier>,
}

impl UsageCheck {
    /// Gate one job for `tier` with `used` jobs consumed
    pub fn evaluate(tier: Tier, used: u64) -> Self {
        let quota = tier.job_quota();
        let allowed = quota.allows(used);
        Self {
            tier,
            used,
            limit: quota,
            remaining: quota.remaining(used),
            allowed,
            requires_upgrade: !allowed,
            suggested_tier: if allowed { None } else { tier.next() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_at_quota_is_denied() {
        assert!(!has_capacity("basic", 20));
        assert_eq!(remaining("basic", 20), Remaining::Jobs(0));
    }

    #[test]
    fn test_pro_one_below_quota() {
        assert!(has_capacity("pro", 99));
        assert_eq!(remaining("pro", 99), Remaining::Jobs(1));
    }

    #[test]
    fn test_trial_fresh_user() {
        assert!(has_capacity("trial", 0));
        assert_eq!(remaining("trial", 0), Remaining::Jobs(3));
    }

    #[test]
    fn test_enterprise_is_unlimited() {
        assert!(has_capacity("enterprise", 1_000_000_000));
        assert!(has_capacity("enterprise", u64::MAX));
        assert_eq!(remaining("enterprise", 1_000_000_000), Remaining::Unlimited);
    }

    #[test]
    fn test_remaining_floors_at_zero() {
        assert_eq!(remaining("trial", 50), Remaining::Jobs(0));
        assert_eq!(remaining("business", u64::MAX), Remaining::Jobs(0));
    }

    #[test]
    fn test_unknown_tier_gates_as_trial() {
        for used in [0, 2, 3, 10] {
            assert_eq!(has_capacity("gold", used), has_capacity("trial", used));
            assert_eq!(remaining("gold", used), remaining("trial", used));
        }
    }

    #[test]
    fn test_usage_check_denied_suggests_upgrade() {
        let check = UsageCheck::evaluate(Tier::Basic, 20);
        assert!(!check.allowed);
        assert!(check.requires_upgrade);
        assert_eq!(check.suggested_tier, Some(Tier::Pro));
        assert_eq!(check.remaining, Remaining::Jobs(0));
    }

    #[test]
    fn test_usage_check_allowed_has_no_suggestion() {
        let check = UsageCheck::evaluate(Tier::Enterprise, 42);
        assert!(check.allowed);
        assert!(!check.requires_upgrade);
        assert_eq!(check.suggested_tier, None);
    }

    #[test]
    fn test_usage_check_json_shape() {
        let json = serde_json::to_value(UsageCheck::evaluate(Tier::Trial, 3)).unwrap();
        assert_eq!(json["requiresUpgrade"], true);
        assert_eq!(json["limit"], 3);
        assert_eq!(json["remaining"], 0);
        assert_eq!(json["suggestedTier"], "basic");

        let json = serde_json::to_value(UsageCheck::evaluate(Tier::Enterprise, 3)).unwrap();
        assert!(json["limit"].is_null());
        assert!(json["remaining"].is_null());
        assert!(json.get("suggestedTier").is_none());
    }

    #[test]
    fn test_remaining_display() {
        assert_eq!(Remaining::Jobs(7).to_string(), "7");
        assert_eq!(Remaining::Unlimited.to_string(), "∞");
    }
}
