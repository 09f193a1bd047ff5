//! Session store
//!
//! A single slot holding at most one active session for the whole process.
//! The store is passed explicitly to whoever needs it; clones share the slot.
//! Only `login` and `logout` write to it.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::CredentialPolicy;
use crate::error::{Error, Result};
use crate::identity::{Identity, IdentityDirectory};

/// Session information
#[derive(Debug, Clone)]
pub struct Session {
    /// Session ID
    pub id: Uuid,
    /// Identity this session belongs to
    pub identity: Arc<Identity>,
    /// When the session was started
    pub started_at: DateTime<Utc>,
}

impl Session {
    fn new(identity: Arc<Identity>) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity,
            started_at: Utc::now(),
        }
    }
}

/// Process-wide session slot
#[derive(Clone)]
pub struct SessionStore {
    directory: Arc<IdentityDirectory>,
    policy: CredentialPolicy,
    slot: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    /// Create an empty store backed by `directory`
    pub fn new(directory: Arc<IdentityDirectory>, policy: CredentialPolicy) -> Self {
        Self {
            directory,
            policy,
            slot: Arc::new(RwLock::new(None)),
        }
    }

    pub fn directory(&self) -> &Arc<IdentityDirectory> {
        &self.directory
    }

    pub fn policy(&self) -> CredentialPolicy {
        self.policy
    }

    /// Log in and report whether it worked
    pub async fn login(&self, email: &str, password: &str) -> bool {
        self.login_session(email, password).await.is_some()
    }

    /// Log in and return the new session.
    ///
    /// On failure the slot is left exactly as it was, including any session
    /// that was already active.
    pub async fn login_session(&self, email: &str, password: &str) -> Option<Session> {
        let identity = self
            .directory
            .lookup(email)
            .filter(|identity| self.policy.verify(identity, password));

        let Some(identity) = identity else {
            tracing::debug!("Login rejected");
            return None;
        };

        let session = Session::new(identity);
        *self.slot.write().await = Some(session.clone());

        tracing::info!(
            "Logged in {} as {} (session {})",
            session.identity.email,
            session.identity.role(),
            session.id
        );
        Some(session)
    }

    /// Clear the session. Does nothing if already empty.
    pub async fn logout(&self) {
        if let Some(session) = self.slot.write().await.take() {
            tracing::info!("Logged out {} (session {})", session.identity.email, session.id);
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.slot.read().await.is_some()
    }

    /// The active identity, if any
    pub async fn current(&self) -> Option<Arc<Identity>> {
        self.slot
            .read()
            .await
            .as_ref()
            .map(|session| Arc::clone(&session.identity))
    }

    /// The full session record, if any
    pub async fn session(&self) -> Option<Session> {
        self.slot.read().await.clone()
    }

    /// The active identity, or `NotAuthenticated`
    pub async fn require_identity(&self) -> Result<Arc<Identity>> {
        self.current().await.ok_or(Error::NotAuthenticated)
    }
}
