//! Password checking policies

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::identity::Identity;

/// How a login password is checked against an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialPolicy {
    /// Any non-empty password is accepted for a known email
    #[default]
    AcceptAny,
    /// The password must match the identity's bcrypt hash
    Bcrypt,
}

impl CredentialPolicy {
    /// Check `password` for `identity`. Never says why a check failed.
    pub fn verify(&self, identity: &Identity, password: &str) -> bool {
        if password.is_empty() {
            return false;
        }

        match self {
            CredentialPolicy::AcceptAny => true,
            CredentialPolicy::Bcrypt => {
                let Some(hash) = identity.password_hash() else {
                    tracing::debug!("Identity {} has no password hash", identity.id);
                    return false;
                };
                bcrypt::verify(password, hash).unwrap_or_else(|e| {
                    tracing::warn!("Unreadable password hash for identity {}: {}", identity.id, e);
                    false
                })
            }
        }
    }
}

/// Hash a password for storage in an identity fixture
pub fn hash_password(password: &str) -> Result<String> {
    hash_password_with_cost(password, bcrypt::DEFAULT_COST)
}

pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String> {
    bcrypt::hash(password, cost)
        .map_err(|e| Error::Other(format!("Failed to hash password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Profile;

    fn identity() -> Identity {
        Identity::new("a1", "admin@example.com", "Admin", Profile::Admin)
    }

    #[test]
    fn test_accept_any_ignores_password_content() {
        let policy = CredentialPolicy::AcceptAny;
        assert!(policy.verify(&identity(), "anything"));
        assert!(policy.verify(&identity(), "something else"));
    }

    #[test]
    fn test_empty_password_always_rejected() {
        assert!(!CredentialPolicy::AcceptAny.verify(&identity(), ""));
        assert!(!CredentialPolicy::Bcrypt.verify(&identity(), ""));
    }

    #[test]
    fn test_bcrypt_policy() {
        let hash = hash_password_with_cost("hunter22", 4).unwrap();
        let with_hash = identity().with_password_hash(hash);

        assert!(CredentialPolicy::Bcrypt.verify(&with_hash, "hunter22"));
        assert!(!CredentialPolicy::Bcrypt.verify(&with_hash, "hunter23"));
        assert!(!CredentialPolicy::Bcrypt.verify(&identity(), "hunter22"));
    }

    #[test]
    fn test_bcrypt_policy_garbage_hash() {
        let broken = identity().with_password_hash("not-a-hash");
        assert!(!CredentialPolicy::Bcrypt.verify(&broken, "whatever"));
    }
}
