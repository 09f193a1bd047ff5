//! Destination table
//!
//! Maps logical destination names to concrete paths, tags each destination
//! with the role it requires, and names one home destination per role.

use serde::Serialize;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::identity::Role;

/// Who may render a destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    /// The entry point; never renders, always redirects
    Root,
    /// Anyone, signed in or not
    Public,
    /// Only identities holding this role
    Protected(Role),
}

/// A named, routable page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destination {
    pub name: String,
    pub path: String,
    pub access: Access,
}

impl Destination {
    pub fn new(name: impl Into<String>, path: impl Into<String>, access: Access) -> Self {
        let path: String = path.into();
        Self {
            name: name.into(),
            path: normalize_path(&path),
            access,
        }
    }

    pub fn required_role(&self) -> Option<Role> {
        match self.access {
            Access::Protected(role) => Some(role),
            _ => None,
        }
    }
}

/// Strip query string, fragment and trailing slash; ensure a leading slash
pub fn normalize_path(path: &str) -> String {
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();
    let trimmed = path.trim_end_matches('/');

    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// The fixed destination map
#[derive(Debug, Clone)]
pub struct RouteTable {
    destinations: Vec<Destination>,
    by_name: HashMap<String, usize>,
    by_path: HashMap<String, usize>,
    login: usize,
    admin_home: usize,
    brand_home: usize,
    creator_home: usize,
}

impl RouteTable {
    /// Build a table. `login` names the login destination and `homes` the
    /// home destination of every role; each must exist with matching access.
    pub fn new(
        destinations: Vec<Destination>,
        login: &str,
        homes: &[(Role, &str)],
    ) -> Result<Self> {
        let mut by_name = HashMap::new();
        let mut by_path = HashMap::new();

        for (index, destination) in destinations.iter().enumerate() {
            if by_name.insert(destination.name.clone(), index).is_some() {
                return Err(Error::Config(format!(
                    "Duplicate destination name '{}'",
                    destination.name
                )));
            }
            if by_path.insert(destination.path.clone(), index).is_some() {
                return Err(Error::Config(format!(
                    "Duplicate destination path '{}'",
                    destination.path
                )));
            }
        }

        let index_of = |name: &str, access: Access| -> Result<usize> {
            let index = *by_name
                .get(name)
                .ok_or_else(|| Error::UnknownDestination(name.to_string()))?;
            if destinations[index].access != access {
                return Err(Error::Config(format!(
                    "Destination '{}' must have {:?} access",
                    name, access
                )));
            }
            Ok(index)
        };

        let home_of = |role: Role| -> Result<usize> {
            let (_, name) = homes
                .iter()
                .find(|(r, _)| *r == role)
                .ok_or_else(|| Error::Config(format!("No home destination for {}", role)))?;
            index_of(name, Access::Protected(role))
        };

        let login = index_of(login, Access::Public)?;
        let admin_home = home_of(Role::Admin)?;
        let brand_home = home_of(Role::Brand)?;
        let creator_home = home_of(Role::Creator)?;

        Ok(Self {
            destinations,
            by_name,
            by_path,
            login,
            admin_home,
            brand_home,
            creator_home,
        })
    }

    /// Destination by logical name
    pub fn get(&self, name: &str) -> Option<&Destination> {
        self.by_name.get(name).map(|&index| &self.destinations[index])
    }

    /// Concrete path for a logical name
    pub fn path(&self, name: &str) -> Result<&str> {
        self.get(name)
            .map(|destination| destination.path.as_str())
            .ok_or_else(|| Error::UnknownDestination(name.to_string()))
    }

    /// Destination at a concrete path, after normalization
    pub fn resolve(&self, path: &str) -> Option<&Destination> {
        self.by_path
            .get(&normalize_path(path))
            .map(|&index| &self.destinations[index])
    }

    pub fn login(&self) -> &Destination {
        &self.destinations[self.login]
    }

    /// The default landing destination for a role
    pub fn role_home(&self, role: Role) -> &Destination {
        let index = match role {
            Role::Admin => self.admin_home,
            Role::Brand => self.brand_home,
            Role::Creator => self.creator_home,
        };
        &self.destinations[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Destination> {
        self.destinations.iter()
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        use Access::*;

        let destinations = vec![
            Destination::new("root", "/", Root),
            Destination::new("login", "/login", Public),
            Destination::new("admin-home", "/admin/dashboard", Protected(Role::Admin)),
            Destination::new("admin-users", "/admin/users", Protected(Role::Admin)),
            Destination::new("admin-campaigns", "/admin/campaigns", Protected(Role::Admin)),
            Destination::new("brand-home", "/brand/dashboard", Protected(Role::Brand)),
            Destination::new("brand-campaigns", "/brand/campaigns", Protected(Role::Brand)),
            Destination::new("brand-creators", "/brand/creators", Protected(Role::Brand)),
            Destination::new("brand-services", "/brand/services", Protected(Role::Brand)),
            Destination::new("creator-home", "/creator/dashboard", Protected(Role::Creator)),
            Destination::new("creator-campaigns", "/creator/campaigns", Protected(Role::Creator)),
            Destination::new("creator-services", "/creator/services", Protected(Role::Creator)),
            Destination::new("creator-profile", "/creator/profile", Protected(Role::Creator)),
        ];

        let homes = [
            (Role::Admin, "admin-home"),
            (Role::Brand, "brand-home"),
            (Role::Creator, "creator-home"),
        ];

        Self::new(destinations, "login", &homes)
            .expect("built-in route table is consistent - this is a bug in the codebase")
    }
}
