//! Identity model
//!
//! An identity is a predefined account with exactly one role. The role is not
//! stored as a separate field: it is the tag of the identity's [`Profile`], so
//! a brand identity can only ever carry brand fields and a creator identity
//! only creator fields.

mod directory;
mod profile;

pub use directory::*;
pub use profile::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The three fixed account roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Platform administrator
    Admin,
    /// Brand running campaigns
    Brand,
    /// Content creator offering services
    Creator,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Brand, Role::Creator];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Brand => "brand",
            Role::Creator => "creator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "brand" => Ok(Role::Brand),
            "creator" => Ok(Role::Creator),
            other => Err(Error::Other(format!("Unknown role: {}", other))),
        }
    }
}

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Active,
    Blocked,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountStatus::Active => write!(f, "active"),
            AccountStatus::Blocked => write!(f, "blocked"),
        }
    }
}

/// An authenticated actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique identifier
    pub id: String,
    /// Email address, used as the login lookup key
    pub email: String,
    /// Display name
    pub name: String,
    /// Avatar image reference
    #[serde(default)]
    pub avatar: Option<String>,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: AccountStatus,
    /// bcrypt hash, only consulted under the bcrypt credential policy
    #[serde(default, skip_serializing)]
    password_hash: Option<String>,
    #[serde(flatten)]
    profile: Profile,
}

impl Identity {
    /// Create an active identity with the given profile
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        profile: Profile,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            avatar: None,
            created_at: Utc::now(),
            status: AccountStatus::Active,
            password_hash: None,
            profile,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    pub fn with_status(mut self, status: AccountStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    pub fn role(&self) -> Role {
        self.profile.role()
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    /// Brand fields, if this is a brand identity
    pub fn as_brand(&self) -> Option<&BrandProfile> {
        match &self.profile {
            Profile::Brand(brand) => Some(brand),
            _ => None,
        }
    }

    /// Creator fields, if this is a creator identity
    pub fn as_creator(&self) -> Option<&CreatorProfile> {
        match &self.profile {
            Profile::Creator(creator) => Some(creator),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_display_and_parse() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
        assert_eq!("BRAND".parse::<Role>().unwrap(), Role::Brand);
        assert!("viewer".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_follows_profile() {
        let admin = Identity::new("a1", "admin@example.com", "Admin", Profile::Admin);
        assert_eq!(admin.role(), Role::Admin);
        assert!(admin.as_brand().is_none());
        assert!(admin.as_creator().is_none());

        let brand = Identity::new(
            "b1",
            "brand@example.com",
            "Brand",
            Profile::Brand(BrandProfile::new("Acme", "Retail")),
        );
        assert_eq!(brand.role(), Role::Brand);
        assert_eq!(brand.as_brand().unwrap().company_name, "Acme");
        assert!(brand.as_creator().is_none());
    }

    #[test]
    fn test_identity_json_uses_role_tag() {
        let json = r#"{
            "id": "c1",
            "email": "maya@example.com",
            "name": "Maya",
            "created_at": "2024-02-01T00:00:00Z",
            "role": "creator",
            "niches": ["travel"],
            "platforms": [{"platform": "instagram", "followers": 1200, "engagement_rate": 4.5}],
            "bio": "Travel stories",
            "rating": 4.8,
            "completed_campaigns": 3
        }"#;

        let identity: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.role(), Role::Creator);
        assert_eq!(identity.status, AccountStatus::Active);
        let creator = identity.as_creator().unwrap();
        assert_eq!(creator.platforms[0].followers, 1200);
        assert_eq!(creator.total_followers(), 1200);

        let value = serde_json::to_value(&identity).unwrap();
        assert_eq!(value["role"], "creator");
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let identity = Identity::new("a1", "admin@example.com", "Admin", Profile::Admin)
            .with_password_hash("$2b$04$abc");
        let value = serde_json::to_value(&identity).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(identity.password_hash(), Some("$2b$04$abc"));
    }

    #[test]
    fn test_blocked_identity_is_not_active() {
        let identity = Identity::new("a1", "admin@example.com", "Admin", Profile::Admin)
            .with_status(AccountStatus::Blocked);
        assert!(!identity.is_active());
    }
}
