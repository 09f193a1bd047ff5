//! Route access guard
//!
//! Every navigation is evaluated afresh against the current session; no
//! decision is cached.

use serde::Serialize;
use std::sync::Arc;

use crate::auth::SessionStore;
use crate::identity::{Identity, Role};

use super::destination::{normalize_path, Access, Destination, RouteTable};

/// Outcome of evaluating one navigation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Show the requested destination
    Render { destination: Destination },
    /// Nobody is signed in; `from` is the protected path that was asked for
    RedirectToLogin { to: String, from: Option<String> },
    /// Signed in, but this is not the identity's page (or the root path)
    RedirectToRoleHome { role: Role, to: String },
}

impl GuardDecision {
    pub fn is_redirect(&self) -> bool {
        !matches!(self, GuardDecision::Render { .. })
    }

    /// Where a redirect should send the client, with the requested path
    /// attached to login redirects
    pub fn location(&self) -> Option<String> {
        match self {
            GuardDecision::Render { .. } => None,
            GuardDecision::RedirectToLogin { to, from: Some(from) } => {
                Some(format!("{}?from={}", to, from))
            }
            GuardDecision::RedirectToLogin { to, from: None } => Some(to.clone()),
            GuardDecision::RedirectToRoleHome { to, .. } => Some(to.clone()),
        }
    }
}

/// Gatekeeper in front of role-specific destinations
#[derive(Debug, Clone)]
pub struct RouteGuard {
    table: Arc<RouteTable>,
}

impl RouteGuard {
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Decide what a navigation to `path` does for `identity`
    pub fn evaluate(&self, path: &str, identity: Option<&Identity>) -> GuardDecision {
        let requested = normalize_path(path);

        let decision = match self.table.resolve(&requested) {
            Some(destination) => match (destination.access, identity) {
                (Access::Public, _) => GuardDecision::Render {
                    destination: destination.clone(),
                },
                (Access::Root, _) => self.entry_redirect(identity),
                (Access::Protected(_), None) => GuardDecision::RedirectToLogin {
                    to: self.table.login().path.clone(),
                    from: Some(requested.clone()),
                },
                (Access::Protected(required), Some(identity)) if identity.role() == required => {
                    GuardDecision::Render {
                        destination: destination.clone(),
                    }
                }
                (Access::Protected(_), Some(identity)) => self.home_redirect(identity.role()),
            },
            // Unknown paths fall through to the entry point
            None => self.entry_redirect(identity),
        };

        tracing::debug!(
            path = %requested,
            identity = identity.map(|i| i.email.as_str()).unwrap_or("-"),
            "Guard decision: {:?}",
            decision
        );
        decision
    }

    /// Evaluate against the live session
    pub async fn check(&self, path: &str, session: &SessionStore) -> GuardDecision {
        let identity = session.current().await;
        self.evaluate(path, identity.as_deref())
    }

    fn entry_redirect(&self, identity: Option<&Identity>) -> GuardDecision {
        match identity {
            Some(identity) => self.home_redirect(identity.role()),
            None => GuardDecision::RedirectToLogin {
                to: self.table.login().path.clone(),
                from: None,
            },
        }
    }

    fn home_redirect(&self, role: Role) -> GuardDecision {
        GuardDecision::RedirectToRoleHome {
            role,
            to: self.table.role_home(role).path.clone(),
        }
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(Arc::new(RouteTable::default()))
    }
}
