//! Target platform types

use serde::{Deserialize, Serialize};

/// Social or media destination for repurposed content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    LinkedIn,
    Instagram,
    Facebook,
    YouTube,
    TikTok,
}

impl Platform {
    /// Every platform, in display order
    pub const ALL: [Platform; 6] = [
        Self::Twitter,
        Self::LinkedIn,
        Self::Instagram,
        Self::Facebook,
        Self::YouTube,
        Self::TikTok,
    ];

    /// Get the platform identifier string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::LinkedIn => "linkedin",
            Self::Instagram => "instagram",
            Self::Facebook => "facebook",
            Self::YouTube => "youtube",
            Self::TikTok => "tiktok",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "twitter" | "x" => Ok(Self::Twitter),
            "linkedin" => Ok(Self::LinkedIn),
            "instagram" => Ok(Self::Instagram),
            "facebook" => Ok(Self::Facebook),
            "youtube" => Ok(Self::YouTube),
            "tiktok" => Ok(Self::TikTok),
            _ => Err(PlatformParseError(s.to_string())),
        }
    }
}

/// Error parsing a platform string
#[derive(Debug, Clone)]
pub struct PlatformParseError(pub String);

impl std::fmt::Display for PlatformParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid platform: {}", self.0)
    }
}

impl std::error::Error for PlatformParseError {}
