use client::{Method, SessionState, TokenStore};
use pretty_assertions::assert_eq;
use shared_types::{AppError, AppErrorKind, Role};

use crate::common::{harness, stub_login};

#[tokio::test]
async fn malformed_email_fails_before_any_network_call() {
    let h = harness();

    let err = h.session.login("not-an-email", "hunter2").await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert!(err.field_errors.contains_key("email"));
    assert_eq!(h.fake.call_count(), 0);
    assert_eq!(h.session.state(), SessionState::Anonymous);
}

#[tokio::test]
async fn empty_password_fails_before_any_network_call() {
    let h = harness();

    let err = h.session.login("ana@example.com", "").await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert_eq!(h.fake.call_count(), 0);
}

#[tokio::test]
async fn rejected_credentials_leave_the_store_untouched() {
    let h = harness();
    h.fake.stub_app_error(
        Method::Post,
        "/api/auth/login",
        AppError::unauthorized("Invalid email or password"),
    );

    let err = h
        .session
        .login("ana@example.com", "wrong-password")
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Unauthorized);
    assert_eq!(h.session.state(), SessionState::Anonymous);
    assert_eq!(h.session.current(), None);
    assert_eq!(h.tokens.load(), None, "no token may be persisted");
    assert_eq!(h.client.token(), None);
}

#[tokio::test]
async fn successful_login_authenticates_and_persists_the_token() {
    let h = harness();
    stub_login(&h.fake, 7, "CUSTOMER");

    let session = h.session.login("user7@example.com", "hunter2").await.unwrap();

    assert_eq!(session.role, Role::Customer);
    assert_eq!(session.user.id, 7);
    assert_eq!(h.session.state(), SessionState::Authenticated(Role::Customer));
    assert_eq!(h.tokens.load().as_deref(), Some("token-7"));

    // The profile fetch carried the fresh bearer token.
    let me_calls: Vec<_> = h
        .fake
        .calls()
        .into_iter()
        .filter(|c| c.path == "/api/users/me")
        .collect();
    assert_eq!(me_calls.len(), 1);
    assert_eq!(me_calls[0].bearer.as_deref(), Some("token-7"));
}

#[tokio::test]
async fn login_response_with_unknown_role_is_rejected() {
    let h = harness();
    h.fake.stub(
        Method::Post,
        "/api/auth/login",
        200,
        serde_json::json!({ "token": "t", "role": "SUPERUSER" }),
    );

    let err = h.session.login("ana@example.com", "hunter2").await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Unauthorized);
    assert_eq!(h.session.state(), SessionState::Anonymous);
    assert_eq!(h.tokens.load(), None);
    // The profile fetch never happened.
    assert_eq!(h.fake.calls_to(Method::Get, "/api/users/me"), 0);
}

#[tokio::test]
async fn failed_profile_fetch_rolls_the_login_back() {
    let h = harness();
    h.fake.stub(
        Method::Post,
        "/api/auth/login",
        200,
        serde_json::json!({ "token": "t-9", "role": "PROVIDER" }),
    );
    h.fake.stub_app_error(
        Method::Get,
        "/api/users/me",
        AppError::internal("boom"),
    );

    let err = h.session.login("p@example.com", "hunter2").await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::InternalError);
    assert_eq!(h.session.state(), SessionState::Anonymous);
    assert_eq!(h.tokens.load(), None);
    assert_eq!(h.client.token(), None);
}

#[tokio::test]
async fn logout_is_idempotent_and_clears_everything() {
    let h = harness();
    stub_login(&h.fake, 3, "ADMIN");
    h.session.login("user3@example.com", "hunter2").await.unwrap();
    assert_eq!(h.session.state(), SessionState::Authenticated(Role::Admin));

    h.session.logout();
    assert_eq!(h.session.state(), SessionState::Anonymous);
    assert_eq!(h.session.current(), None);
    assert_eq!(h.tokens.load(), None);
    assert_eq!(h.client.token(), None);

    // A second logout changes nothing and does not fail.
    h.session.logout();
    assert_eq!(h.session.state(), SessionState::Anonymous);
}
