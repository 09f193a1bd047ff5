//! Role-specific identity data

use serde::{Deserialize, Serialize};

use super::Role;

/// Role-specific fields, tagged by role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Profile {
    Admin,
    Brand(BrandProfile),
    Creator(CreatorProfile),
}

impl Profile {
    pub fn role(&self) -> Role {
        match self {
            Profile::Admin => Role::Admin,
            Profile::Brand(_) => Role::Brand,
            Profile::Creator(_) => Role::Creator,
        }
    }
}

/// Brand company details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandProfile {
    pub company_name: String,
    pub industry: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub website: Option<String>,
}

impl BrandProfile {
    pub fn new(company_name: impl Into<String>, industry: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            industry: industry.into(),
            description: String::new(),
            website: None,
        }
    }
}

/// Audience statistics for one social platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformStats {
    pub platform: String,
    pub followers: u64,
    /// Percentage, e.g. `4.5` for 4.5%
    pub engagement_rate: f64,
}

/// Creator portfolio details
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreatorProfile {
    #[serde(default)]
    pub niches: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<PlatformStats>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub completed_campaigns: u32,
}

impl CreatorProfile {
    /// Followers summed across all platforms
    pub fn total_followers(&self) -> u64 {
        self.platforms.iter().map(|p| p.followers).sum()
    }
}
