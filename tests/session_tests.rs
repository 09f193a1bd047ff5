//! Session store behaviour against the seeded identity pools

use creatorhub::auth::credentials::hash_password_with_cost;
use creatorhub::auth::{CredentialPolicy, SessionStore};
use creatorhub::identity::{
    BrandProfile, CreatorProfile, Identity, IdentityDirectory, IdentityPools, Profile, Role,
};
use creatorhub::Error;
use std::sync::Arc;

fn builtin_store() -> SessionStore {
    let directory = IdentityDirectory::builtin().expect("embedded fixture");
    SessionStore::new(Arc::new(directory), CredentialPolicy::AcceptAny)
}

#[tokio::test]
async fn test_every_identity_can_log_in() {
    let store = builtin_store();
    let identities: Vec<_> = store.directory().iter().cloned().collect();
    assert!(identities.len() >= 3);

    for (i, identity) in identities.iter().enumerate() {
        let password = format!("any-password-{}", i);
        assert!(
            store.login(&identity.email, &password).await,
            "login failed for {}",
            identity.email
        );
        let current = store.current().await.expect("identity after login");
        assert_eq!(current.as_ref(), identity.as_ref());
    }
}

#[tokio::test]
async fn test_unknown_email_leaves_empty_session_empty() {
    let store = builtin_store();
    assert!(!store.login("ghost@example.com", "password").await);
    assert!(!store.is_authenticated().await);
    assert!(store.current().await.is_none());
}

#[tokio::test]
async fn test_unknown_email_leaves_active_session_unchanged() {
    let store = builtin_store();
    assert!(store.login("mia@creator.com", "password").await);
    let before = store.session().await.unwrap();

    assert!(!store.login("ghost@example.com", "password").await);

    let after = store.session().await.unwrap();
    assert_eq!(after.id, before.id);
    assert_eq!(after.identity.email, "mia@creator.com");
}

#[tokio::test]
async fn test_email_match_is_case_sensitive() {
    let store = builtin_store();
    assert!(!store.login("ADMIN@creatorhub.com", "password").await);
}

#[tokio::test]
async fn test_empty_password_rejected() {
    let store = builtin_store();
    assert!(!store.login("admin@creatorhub.com", "").await);
    assert!(!store.is_authenticated().await);
}

#[tokio::test]
async fn test_logout_clears_session() {
    let store = builtin_store();
    store.login("marketing@techflow.com", "password").await;
    assert!(store.is_authenticated().await);

    store.logout().await;
    assert!(!store.is_authenticated().await);
    assert!(store.current().await.is_none());
    assert!(matches!(
        store.require_identity().await,
        Err(Error::NotAuthenticated)
    ));
}

#[tokio::test]
async fn test_logout_on_empty_session() {
    let store = builtin_store();
    store.logout().await;
    assert!(!store.is_authenticated().await);
}

#[tokio::test]
async fn test_logout_twice_same_as_once() {
    let once = builtin_store();
    let twice = builtin_store();
    once.login("alex@creator.com", "password").await;
    twice.login("alex@creator.com", "password").await;

    once.logout().await;
    twice.logout().await;
    twice.logout().await;

    assert_eq!(once.is_authenticated().await, twice.is_authenticated().await);
    assert!(once.current().await.is_none());
    assert!(twice.current().await.is_none());
}

#[tokio::test]
async fn test_admin_password_not_checked() {
    let store = builtin_store();
    assert!(store.login("admin@creatorhub.com", "first").await);
    assert!(store.login("admin@creatorhub.com", "completely different").await);
    assert_eq!(store.current().await.unwrap().role(), Role::Admin);
}

#[tokio::test]
async fn test_blocked_identity_still_logs_in() {
    let store = builtin_store();
    let blocked = store
        .directory()
        .iter()
        .find(|identity| !identity.is_active())
        .cloned()
        .expect("fixture has a blocked identity");

    assert!(store.login(&blocked.email, "password").await);
}

#[tokio::test]
async fn test_admin_pool_takes_precedence() {
    let admin = Identity::new("admin", "shared@example.com", "Admin", Profile::Admin);
    let brand = Identity::new(
        "brand",
        "shared@example.com",
        "Brand",
        Profile::Brand(BrandProfile::new("Acme", "Retail")),
    );
    let creator = Identity::new(
        "creator",
        "creator@example.com",
        "Creator",
        Profile::Creator(CreatorProfile::default()),
    );

    let directory = IdentityDirectory::from_pools(IdentityPools {
        admin,
        brands: vec![brand],
        creators: vec![creator],
    })
    .unwrap();
    let store = SessionStore::new(Arc::new(directory), CredentialPolicy::AcceptAny);

    assert!(store.login("shared@example.com", "password").await);
    assert_eq!(store.current().await.unwrap().id, "admin");
}

#[tokio::test]
async fn test_bcrypt_policy_checks_password() {
    let hash = hash_password_with_cost("correct horse", 4).unwrap();
    let admin = Identity::new("admin", "admin@example.com", "Admin", Profile::Admin)
        .with_password_hash(hash);
    let directory = IdentityDirectory::from_pools(IdentityPools {
        admin,
        brands: vec![],
        creators: vec![],
    })
    .unwrap();
    let store = SessionStore::new(Arc::new(directory), CredentialPolicy::Bcrypt);

    assert!(!store.login("admin@example.com", "wrong").await);
    assert!(!store.is_authenticated().await);

    assert!(store.login("admin@example.com", "correct horse").await);
    assert!(store.is_authenticated().await);
}
