//! Logout must clear the persisted session no matter what the server says.

use cardea_auth::{Guard, Session};

use crate::common::{profile, temp_store, MockBackend, MockProvider};

#[tokio::test]
async fn test_logout_clears_session_on_server_success() {
    let (_dir, store) = temp_store();
    store
        .save(&Session {
            access_token: "app-token".to_string(),
            profile: profile(Some("USER")),
        })
        .unwrap();

    let backend = MockBackend::happy(profile(Some("USER")));
    let calls = backend.calls();
    let guard = Guard::new(MockProvider::with_session(), backend, store);

    guard.logout().await.unwrap();

    assert!(!guard.store().exists());
    assert_eq!(
        *calls.lock().unwrap(),
        vec!["end_session:app-token".to_string()]
    );
}

#[tokio::test]
async fn test_logout_clears_session_even_when_server_fails() {
    let (_dir, store) = temp_store();
    store
        .save(&Session {
            access_token: "app-token".to_string(),
            profile: profile(Some("USER")),
        })
        .unwrap();

    let guard = Guard::new(
        MockProvider::with_session(),
        MockBackend::failing_logout(profile(Some("USER"))),
        store,
    );

    // The server call errors; the local clear still happens and the
    // operation as a whole still succeeds.
    guard.logout().await.unwrap();
    assert!(!guard.store().exists());
}

#[tokio::test]
async fn test_logout_without_session_is_quiet() {
    let (_dir, store) = temp_store();
    let backend = MockBackend::happy(profile(Some("USER")));
    let calls = backend.calls();
    let guard = Guard::new(MockProvider::with_session(), backend, store);

    guard.logout().await.unwrap();

    // Nothing stored, so no server call either.
    assert!(calls.lock().unwrap().is_empty());
    assert!(!guard.store().exists());
}
