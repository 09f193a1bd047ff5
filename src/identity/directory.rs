//! Email-indexed identity directory
//!
//! The seed data comes as three pools (one admin, many brands, many
//! creators). They are folded into a single map once at startup. Pools are
//! inserted in precedence order admin, brands, creators; when two pools share
//! an email the earlier pool keeps it, so a lookup resolves exactly as a
//! sequential search over the three pools would.

use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};

use super::{Identity, Role};

#[derive(RustEmbed)]
#[folder = "fixtures/"]
struct Fixtures;

const BUILTIN_FIXTURE: &str = "identities.json";

/// The three fixed identity pools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityPools {
    pub admin: Identity,
    #[serde(default)]
    pub brands: Vec<Identity>,
    #[serde(default)]
    pub creators: Vec<Identity>,
}

impl IdentityPools {
    /// Parse pools from a JSON document
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

/// Read-only lookup from email to identity
#[derive(Debug, Clone)]
pub struct IdentityDirectory {
    by_email: HashMap<String, Arc<Identity>>,
    /// Insertion (precedence) order
    order: Vec<Arc<Identity>>,
}

impl IdentityDirectory {
    /// Build the directory from the three pools
    pub fn from_pools(pools: IdentityPools) -> Result<Self> {
        let IdentityPools {
            admin,
            brands,
            creators,
        } = pools;

        let mut directory = Self {
            by_email: HashMap::new(),
            order: Vec::new(),
        };

        directory.insert_pool(Role::Admin, vec![admin])?;
        directory.insert_pool(Role::Brand, brands)?;
        directory.insert_pool(Role::Creator, creators)?;

        tracing::debug!("Identity directory built with {} identities", directory.len());
        Ok(directory)
    }

    fn insert_pool(&mut self, role: Role, pool: Vec<Identity>) -> Result<()> {
        for identity in pool {
            if identity.role() != role {
                return Err(Error::Fixture(format!(
                    "{} '{}' found in the {} pool",
                    identity.role(),
                    identity.email,
                    role
                )));
            }

            if self.by_email.contains_key(&identity.email) {
                tracing::warn!(
                    "Duplicate identity email '{}' in {} pool, keeping earlier entry",
                    identity.email,
                    role
                );
                continue;
            }

            let identity = Arc::new(identity);
            self.by_email
                .insert(identity.email.clone(), Arc::clone(&identity));
            self.order.push(identity);
        }
        Ok(())
    }

    /// Load the seed fixture compiled into the binary
    pub fn builtin() -> Result<Self> {
        let file = Fixtures::get(BUILTIN_FIXTURE)
            .ok_or_else(|| Error::Fixture(format!("missing embedded {}", BUILTIN_FIXTURE)))?;
        let content = std::str::from_utf8(&file.data)
            .map_err(|e| Error::Fixture(format!("{} is not UTF-8: {}", BUILTIN_FIXTURE, e)))?;
        Self::from_pools(IdentityPools::from_json(content)?)
    }

    /// Load a JSON fixture from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        tracing::info!("Loading identity fixture from {:?}", path);
        Self::from_pools(IdentityPools::from_json(&content)?)
    }

    /// Load from `path` when given, otherwise the embedded fixture
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// Exact, case-sensitive email lookup
    pub fn lookup(&self, email: &str) -> Option<Arc<Identity>> {
        self.by_email.get(email).cloned()
    }

    /// All identities in precedence order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Identity>> {
        self.order.iter()
    }

    /// Identities holding the given role
    pub fn by_role(&self, role: Role) -> impl Iterator<Item = &Arc<Identity>> {
        self.order.iter().filter(move |identity| identity.role() == role)
    }

    /// The single admin identity
    pub fn admin(&self) -> Option<&Arc<Identity>> {
        self.by_role(Role::Admin).next()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{BrandProfile, CreatorProfile, Profile};

    fn brand(id: &str, email: &str) -> Identity {
        Identity::new(id, email, id, Profile::Brand(BrandProfile::new(id, "Retail")))
    }

    fn creator(id: &str, email: &str) -> Identity {
        Identity::new(id, email, id, Profile::Creator(CreatorProfile::default()))
    }

    fn admin() -> Identity {
        Identity::new("admin", "admin@example.com", "Admin", Profile::Admin)
    }

    #[test]
    fn test_builtin_fixture_loads() {
        let directory = IdentityDirectory::builtin().expect("embedded fixture");
        let admin = directory.admin().expect("admin present");
        assert_eq!(admin.email, "admin@creatorhub.com");
        assert_eq!(directory.by_role(Role::Admin).count(), 1);
        assert!(directory.by_role(Role::Brand).count() > 0);
        assert!(directory.by_role(Role::Creator).count() > 0);
    }

    #[test]
    fn test_lookup_is_exact() {
        let directory = IdentityDirectory::from_pools(IdentityPools {
            admin: admin(),
            brands: vec![brand("b1", "shop@example.com")],
            creators: vec![],
        })
        .unwrap();

        assert!(directory.lookup("shop@example.com").is_some());
        assert!(directory.lookup("SHOP@example.com").is_none());
        assert!(directory.lookup(" shop@example.com").is_none());
    }

    #[test]
    fn test_earlier_pool_wins_on_duplicate_email() {
        let directory = IdentityDirectory::from_pools(IdentityPools {
            admin: admin(),
            brands: vec![brand("b1", "shared@example.com")],
            creators: vec![creator("c1", "shared@example.com")],
        })
        .unwrap();

        let found = directory.lookup("shared@example.com").unwrap();
        assert_eq!(found.role(), Role::Brand);
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn test_pool_role_mismatch_rejected() {
        let result = IdentityDirectory::from_pools(IdentityPools {
            admin: admin(),
            brands: vec![creator("c1", "c1@example.com")],
            creators: vec![],
        });
        assert!(matches!(result, Err(Error::Fixture(_))));
    }

    #[test]
    fn test_iter_preserves_precedence_order() {
        let directory = IdentityDirectory::from_pools(IdentityPools {
            admin: admin(),
            brands: vec![brand("b1", "b1@example.com")],
            creators: vec![creator("c1", "c1@example.com")],
        })
        .unwrap();

        let roles: Vec<Role> = directory.iter().map(|i| i.role()).collect();
        assert_eq!(roles, vec![Role::Admin, Role::Brand, Role::Creator]);
    }
}
