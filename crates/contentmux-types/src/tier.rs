//! Subscription tier types and the static tier registry
//!
//! The registry is a constant table built at compile time. Tier prices,
//! quotas, and platform access only change with a new deployment.
//!
//! | Tier | Price/mo | Jobs/mo | Platforms |
//! |------|----------|---------|-----------|
//! | trial | $0 | 3 | twitter, linkedin |
//! | basic | $19 | 20 | + instagram |
//! | pro | $49 | 100 | + facebook |
//! | business | $99 | 500 | all six |
//! | enterprise | $299 | unlimited | all six |

use serde::{Deserialize, Serialize};

use crate::{JobQuota, Platform};

/// Subscription tier levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Free trial - 3 jobs
    Trial,
    /// Basic - 20 jobs/mo
    Basic,
    /// Pro - 100 jobs/mo
    Pro,
    /// Business - 500 jobs/mo
    Business,
    /// Enterprise - unlimited jobs
    Enterprise,
}

impl Tier {
    /// All tiers, cheapest first
    pub const ALL: [Tier; 5] = [
        Self::Trial,
        Self::Basic,
        Self::Pro,
        Self::Business,
        Self::Enterprise,
    ];

    /// Tier used when a stored identifier is not recognized
    pub const DEFAULT: Tier = Self::Trial;

    /// Get the tier identifier string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trial => "trial",
            Self::Basic => "basic",
            Self::Pro => "pro",
            Self::Business => "business",
            Self::Enterprise => "enterprise",
        }
    }

    /// Numeric level for comparison (trial = 0)
    pub const fn level(&self) -> u8 {
        match self {
            Self::Trial => 0,
            Self::Basic => 1,
            Self::Pro => 2,
            Self::Business => 3,
            Self::Enterprise => 4,
        }
    }

    /// The next tier up, if any
    pub const fn next(&self) -> Option<Tier> {
        match self {
            Self::Trial => Some(Self::Basic),
            Self::Basic => Some(Self::Pro),
            Self::Pro => Some(Self::Business),
            Self::Business => Some(Self::Enterprise),
            Self::Enterprise => None,
        }
    }

    /// Get the registry record for this tier
    pub fn record(&self) -> &'static TierRecord {
        &TIERS[self.level() as usize]
    }

    /// Get the job quota for this tier
    pub fn job_quota(&self) -> JobQuota {
        self.record().job_quota
    }

    /// Match one of the five canonical identifiers exactly.
    ///
    /// No case folding or trimming: `"PRO"` and `" pro "` are not tiers.
    pub fn from_id(tier_id: &str) -> Option<Tier> {
        Self::ALL.into_iter().find(|t| t.as_str() == tier_id)
    }

    /// Exact lookup; anything other than a canonical identifier resolves to
    /// [`Tier::DEFAULT`].
    ///
    /// Use [`str::parse`] for operator input, which normalizes case and
    /// whitespace and rejects unknown tiers.
    pub fn resolve(tier_id: &str) -> Tier {
        Self::from_id(tier_id).unwrap_or(Self::DEFAULT)
    }
}

impl PartialOrd for Tier {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tier {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.level().cmp(&other.level())
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = TierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trial" => Ok(Self::Trial),
            "basic" => Ok(Self::Basic),
            "pro" => Ok(Self::Pro),
            "business" => Ok(Self::Business),
            "enterprise" => Ok(Self::Enterprise),
            _ => Err(TierParseError(s.to_string())),
        }
    }
}

/// Error parsing a tier string
#[derive(Debug, Clone)]
pub struct TierParseError(pub String);

impl std::fmt::Display for TierParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid tier: {}", self.0)
    }
}

impl std::error::Error for TierParseError {}

/// Immutable limits and capabilities of a tier
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierRecord {
    /// Tier identifier
    #[serde(rename = "id")]
    pub tier: Tier,
    /// Display name
    pub name: &'static str,
    /// Monthly price in cents
    pub price_cents: u32,
    /// Jobs allowed per billing period
    pub job_quota: JobQuota,
    /// Platforms this tier may generate content for, in display order
    pub platforms: &'static [Platform],
    /// Human-readable feature descriptions
    pub features: &'static [&'static str],
}

impl TierRecord {
    /// Check whether this tier may target a platform
    pub fn allows_platform(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }

    /// Split requested platforms into accessible and skipped ones.
    ///
    /// An empty request selects every platform the tier can access.
    /// Duplicates are dropped, keeping the first occurrence.
    pub fn partition_platforms(&self, requested: &[Platform]) -> PlatformSelection {
        if requested.is_empty() {
            return PlatformSelection {
                accepted: self.platforms.to_vec(),
                skipped: Vec::new(),
            };
        }

        let mut selection = PlatformSelection::default();
        for &platform in requested {
            if selection.accepted.contains(&platform) || selection.skipped.contains(&platform) {
                continue;
            }
            if self.allows_platform(platform) {
                selection.accepted.push(platform);
            } else {
                selection.skipped.push(platform);
            }
        }
        selection
    }
}

/// Result of filtering requested platforms against a tier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformSelection {
    /// Platforms the tier can access
    pub accepted: Vec<Platform>,
    /// Platforms requested but outside the tier
    pub skipped: Vec<Platform>,
}

/// Refusal for a job whose platforms are all outside the caller's tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformDenial {
    pub tier: Tier,
    pub requested: Vec<Platform>,
    pub requires_upgrade: bool,
    /// Cheapest tier that unlocks at least one requested platform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_tier: Option<Tier>,
}

impl PlatformDenial {
    pub fn new(tier: Tier, requested: Vec<Platform>) -> Self {
        let suggested_tier = requested
            .iter()
            .filter_map(|p| min_tier_for_platform(*p))
            .min();
        Self {
            tier,
            requested,
            requires_upgrade: true,
            suggested_tier,
        }
    }
}

const BASE_PLATFORMS: &[Platform] = &[Platform::Twitter, Platform::LinkedIn];

const BASIC_PLATFORMS: &[Platform] = &[Platform::Twitter, Platform::LinkedIn, Platform::Instagram];

const PRO_PLATFORMS: &[Platform] = &[
    Platform::Twitter,
    Platform::LinkedIn,
    Platform::Instagram,
    Platform::Facebook,
];

static TIERS: [TierRecord; 5] = [
    TierRecord {
        tier: Tier::Trial,
        name: "Free Trial",
        price_cents: 0,
        job_quota: JobQuota::limited(3),
        platforms: BASE_PLATFORMS,
        features: &[
            "3 content jobs",
            "Twitter and LinkedIn posts",
            "Hashtag suggestions",
        ],
    },
    TierRecord {
        tier: Tier::Basic,
        name: "Basic",
        price_cents: 1_900,
        job_quota: JobQuota::limited(20),
        platforms: BASIC_PLATFORMS,
        features: &[
            "20 content jobs per month",
            "Twitter, LinkedIn and Instagram posts",
            "Hashtag suggestions",
            "Content history",
        ],
    },
    TierRecord {
        tier: Tier::Pro,
        name: "Pro",
        price_cents: 4_900,
        job_quota: JobQuota::limited(100),
        platforms: PRO_PLATFORMS,
        features: &[
            "100 content jobs per month",
            "Twitter, LinkedIn, Instagram and Facebook posts",
            "Audio transcription",
            "Hashtag suggestions",
            "Content history",
        ],
    },
    TierRecord {
        tier: Tier::Business,
        name: "Business",
        price_cents: 9_900,
        job_quota: JobQuota::limited(500),
        platforms: &Platform::ALL,
        features: &[
            "500 content jobs per month",
            "All six platforms including YouTube and TikTok",
            "Audio and video transcription",
            "Hashtag suggestions",
            "Content history",
            "Priority processing",
        ],
    },
    TierRecord {
        tier: Tier::Enterprise,
        name: "Enterprise",
        price_cents: 29_900,
        job_quota: JobQuota::Unlimited,
        platforms: &Platform::ALL,
        features: &[
            "Unlimited content jobs",
            "All six platforms including YouTube and TikTok",
            "Audio and video transcription",
            "Hashtag suggestions",
            "Content history",
            "Priority processing",
            "Dedicated support",
        ],
    },
];

/// Look up the record for a tier identifier.
///
/// Never fails: identifiers outside the five known tiers resolve to the
/// trial record.
pub fn lookup(tier_id: &str) -> &'static TierRecord {
    Tier::resolve(tier_id).record()
}

/// All tier records, cheapest first
pub fn all_tiers() -> &'static [TierRecord] {
    &TIERS
}

/// Find the cheapest tier with access to a platform
pub fn min_tier_for_platform(platform: Platform) -> Option<Tier> {
    TIERS
        .iter()
        .find(|record| record.allows_platform(platform))
        .map(|record| record.tier)
}
