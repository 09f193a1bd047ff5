//! JWT token handling

use crate::config::AuthConfig;
use crate::error::{Error, Result};
use crate::identity::{Identity, Role};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (identity ID)
    pub sub: String,
    /// Email the identity logs in with
    pub email: String,
    /// Identity role
    pub role: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

impl Claims {
    /// Create claims for an identity, valid for `ttl_secs`
    pub fn from_identity(identity: &Identity, ttl_secs: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: identity.id.clone(),
            email: identity.email.clone(),
            role: identity.role().to_string(),
            iat: now,
            exp: now + ttl_secs,
        }
    }

    /// Get the identity role
    pub fn get_role(&self) -> Result<Role> {
        self.role.parse()
    }
}

/// Create a JWT token
pub fn create_token(identity: &Identity, config: &AuthConfig) -> Result<String> {
    let claims = Claims::from_identity(identity, config.token_ttl_secs);
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| Error::Other(format!("Failed to create token: {}", e)))
}

/// Validate and decode a JWT token
pub fn validate_token(token: &str, config: &AuthConfig) -> Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| Error::InvalidToken(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{BrandProfile, Profile};

    fn brand() -> Identity {
        Identity::new(
            "brand-1",
            "marketing@techflow.com",
            "Sarah",
            Profile::Brand(BrandProfile::new("TechFlow", "Technology")),
        )
    }

    #[test]
    fn test_create_and_validate_token() {
        let config = AuthConfig::default();
        let token = create_token(&brand(), &config).expect("Failed to create token");
        let claims = validate_token(&token, &config).expect("Failed to validate token");

        assert_eq!(claims.sub, "brand-1");
        assert_eq!(claims.email, "marketing@techflow.com");
        assert_eq!(claims.get_role().unwrap(), Role::Brand);
    }

    #[test]
    fn test_invalid_token() {
        let result = validate_token("invalid.token.here", &AuthConfig::default());
        assert!(matches!(result, Err(Error::InvalidToken(_))));
    }

    #[test]
    fn test_token_rejected_with_other_secret() {
        let config = AuthConfig::default();
        let token = create_token(&brand(), &config).unwrap();

        let other = AuthConfig {
            jwt_secret: "a-different-secret".to_string(),
            ..AuthConfig::default()
        };
        assert!(validate_token(&token, &other).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = AuthConfig {
            token_ttl_secs: -3600,
            ..AuthConfig::default()
        };
        let token = create_token(&brand(), &config).unwrap();
        assert!(validate_token(&token, &config).is_err());
    }
}
