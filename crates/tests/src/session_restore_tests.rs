use client::{Method, SessionState, TokenStore};
use pretty_assertions::assert_eq;
use shared_types::{AppError, AppErrorKind, Role};

use crate::common::{harness, user_json};

#[tokio::test]
async fn restore_without_a_persisted_token_is_none() {
    let h = harness();

    let restored = h.session.restore().await.unwrap();

    assert_eq!(restored, None);
    assert_eq!(h.fake.call_count(), 0);
    assert_eq!(h.session.state(), SessionState::Anonymous);
}

#[tokio::test]
async fn restore_resumes_a_session_from_a_valid_token() {
    let h = harness();
    h.tokens.save("persisted-token");
    h.fake
        .stub(Method::Get, "/api/users/me", 200, user_json(5, "PROVIDER"));

    let session = h.session.restore().await.unwrap().expect("session");

    assert_eq!(session.role, Role::Provider);
    assert_eq!(session.token, "persisted-token");
    assert_eq!(h.session.state(), SessionState::Authenticated(Role::Provider));
}

#[tokio::test]
async fn rejected_token_is_cleared_without_an_error() {
    let h = harness();
    h.tokens.save("stale-token");
    h.fake.stub_app_error(
        Method::Get,
        "/api/users/me",
        AppError::unauthorized("Token expired"),
    );

    let restored = h.session.restore().await.unwrap();

    assert_eq!(restored, None);
    assert_eq!(h.session.state(), SessionState::Anonymous);
    assert_eq!(h.tokens.load(), None, "dead token must not linger");
}

#[tokio::test]
async fn network_failure_keeps_the_persisted_token_for_retry() {
    let h = harness();
    h.tokens.save("good-token");
    // First attempt fails in transport, the second reaches the server.
    h.fake.stub_network_error(Method::Get, "/api/users/me");
    h.fake
        .stub(Method::Get, "/api/users/me", 200, user_json(2, "CUSTOMER"));

    let err = h.session.restore().await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::NetworkError);
    assert_eq!(
        h.tokens.load().as_deref(),
        Some("good-token"),
        "a transport failure is not a dead token"
    );

    // Once the server is reachable the same token restores fine.
    let session = h.session.restore().await.unwrap().expect("session");
    assert_eq!(session.role, Role::Customer);
}

#[tokio::test]
async fn server_error_during_restore_also_keeps_the_token() {
    let h = harness();
    h.tokens.save("good-token");
    h.fake
        .stub_app_error(Method::Get, "/api/users/me", AppError::internal("boom"));

    let err = h.session.restore().await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::InternalError);
    assert_eq!(h.tokens.load().as_deref(), Some("good-token"));
    assert_eq!(h.session.state(), SessionState::Anonymous);
}

#[tokio::test]
async fn restored_profile_with_unknown_role_tears_down() {
    let h = harness();
    h.tokens.save("odd-token");
    h.fake
        .stub(Method::Get, "/api/users/me", 200, user_json(9, "superuser"));

    let restored = h.session.restore().await.unwrap();

    assert_eq!(restored, None);
    assert_eq!(h.tokens.load(), None);
    assert_eq!(h.session.state(), SessionState::Anonymous);
}
