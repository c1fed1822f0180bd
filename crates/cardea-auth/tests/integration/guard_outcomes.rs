//! Guard outcomes across every handshake path.
//!
//! The handshake is four linear steps; whichever one rejects, the guard
//! must land on the unauthenticated outcome with the session cleared.

use cardea_auth::{Access, Guard};

use crate::common::{profile, temp_store, MockBackend, MockProvider};

#[tokio::test]
async fn test_all_steps_succeed_grants_access() {
    let (_dir, store) = temp_store();
    let backend = MockBackend::happy(profile(Some("USER")));
    let calls = backend.calls();
    let guard = Guard::new(MockProvider::with_session(), backend, store);

    let access = guard.check().await;
    let Access::Granted(user) = access else {
        panic!("expected Granted, got {access:?}");
    };
    assert_eq!(user.email, "nila@example.com");

    // Steps ran in order, with the minted tokens flowing through.
    let calls = calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![
            "exchange:identity-token".to_string(),
            "profile:app-token".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_success_persists_both_session_keys() {
    let (_dir, store) = temp_store();
    let guard = Guard::new(
        MockProvider::with_session(),
        MockBackend::happy(profile(Some("USER"))),
        store,
    );

    guard.check().await;

    let session = guard.store().load().expect("session should be persisted");
    assert_eq!(session.access_token, "app-token");
    assert_eq!(session.profile.email, "nila@example.com");
}

#[tokio::test]
async fn test_no_provider_session_is_denied() {
    let (_dir, store) = temp_store();
    let guard = Guard::new(
        MockProvider::without_session(),
        MockBackend::happy(profile(Some("USER"))),
        store,
    );

    assert!(guard.check().await.is_denied());
}

#[tokio::test]
async fn test_silent_acquisition_failure_is_denied() {
    let (_dir, store) = temp_store();
    let backend = MockBackend::happy(profile(Some("USER")));
    let calls = backend.calls();
    let guard = Guard::new(MockProvider::refusing_silent(), backend, store);

    assert!(guard.check().await.is_denied());
    // The backend was never consulted.
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_exchange_rejection_is_denied() {
    let (_dir, store) = temp_store();
    let guard = Guard::new(
        MockProvider::with_session(),
        MockBackend::rejecting_exchange(),
        store,
    );

    assert!(guard.check().await.is_denied());
}

#[tokio::test]
async fn test_profile_rejection_is_denied() {
    let (_dir, store) = temp_store();
    let guard = Guard::new(
        MockProvider::with_session(),
        MockBackend::rejecting_profile(),
        store,
    );

    assert!(guard.check().await.is_denied());
}

#[tokio::test]
async fn test_failed_handshake_clears_stale_session() {
    let (_dir, store) = temp_store();
    // A stale session from an earlier login is lying around.
    store
        .save(&cardea_auth::Session {
            access_token: "stale-token".to_string(),
            profile: profile(Some("USER")),
        })
        .unwrap();

    // The stored token no longer validates and the full handshake fails too.
    let guard = Guard::new(
        MockProvider::without_session(),
        MockBackend::rejecting_profile(),
        store,
    );

    assert!(guard.check().await.is_denied());
    assert!(!guard.store().exists(), "stale session must be removed");
}

#[tokio::test]
async fn test_missing_role_is_role_pending() {
    let (_dir, store) = temp_store();
    let guard = Guard::new(
        MockProvider::with_session(),
        MockBackend::happy(profile(None)),
        store,
    );

    let access = guard.check().await;
    assert!(matches!(access, Access::RolePending(_)));
    assert_eq!(access.user().unwrap().email, "nila@example.com");
}

#[tokio::test]
async fn test_warm_start_skips_provider() {
    let (_dir, store) = temp_store();
    store
        .save(&cardea_auth::Session {
            access_token: "warm-token".to_string(),
            profile: profile(Some("USER")),
        })
        .unwrap();

    // Provider would fail if consulted; the valid stored token wins first.
    let backend = MockBackend::happy(profile(Some("USER")));
    let calls = backend.calls();
    let guard = Guard::new(MockProvider::without_session(), backend, store);

    let access = guard.check().await;
    assert!(matches!(access, Access::Granted(_)));
    assert_eq!(*calls.lock().unwrap(), vec!["profile:warm-token".to_string()]);
}

#[tokio::test]
async fn test_password_login_persists_session() {
    let (_dir, store) = temp_store();
    let guard = Guard::new(
        MockProvider::without_session(),
        MockBackend::happy(profile(Some("USER"))),
        store,
    );

    let user = guard.login_password("nila@example.com", "hunter2").await.unwrap();
    assert_eq!(user.email, "nila@example.com");
    assert_eq!(guard.store().load().unwrap().access_token, "app-token");
}

#[tokio::test]
async fn test_password_login_rejection_keeps_nothing() {
    let (_dir, store) = temp_store();
    let guard = Guard::new(
        MockProvider::without_session(),
        MockBackend::rejecting_exchange(),
        store,
    );

    assert!(guard.login_password("nila@example.com", "wrong").await.is_err());
    assert!(!guard.store().exists());
}
