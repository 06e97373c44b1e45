use client::{Method, SessionState, TokenStore};
use pretty_assertions::assert_eq;
use shared_types::{AppError, Role};

use crate::common::{harness, stub_login};

#[tokio::test]
async fn unauthorized_api_response_tears_the_session_down() {
    let h = harness();
    stub_login(&h.fake, 4, "CUSTOMER");
    h.session.login("user4@example.com", "hunter2").await.unwrap();
    assert_eq!(h.session.state(), SessionState::Authenticated(Role::Customer));

    // Token invalidated server-side; the next call answers 401.
    h.fake.stub_app_error(
        Method::Get,
        "/api/services",
        AppError::unauthorized("Token expired"),
    );
    let err = h.client.services().await.unwrap_err();

    assert!(err.is_auth_error());
    assert_eq!(h.session.state(), SessionState::Anonymous);
    assert_eq!(h.session.current(), None);
    assert_eq!(h.tokens.load(), None);
    assert_eq!(h.client.token(), None);
}

#[tokio::test]
async fn forbidden_also_tears_down() {
    let h = harness();
    stub_login(&h.fake, 4, "CUSTOMER");
    h.session.login("user4@example.com", "hunter2").await.unwrap();

    h.fake.stub_app_error(
        Method::Get,
        "/api/users/all",
        AppError::forbidden("Admin role required"),
    );
    let err = h.client.all_users().await.unwrap_err();

    assert!(err.is_auth_error());
    assert_eq!(h.session.state(), SessionState::Anonymous);
}

#[tokio::test]
async fn other_failures_leave_the_session_alone() {
    let h = harness();
    stub_login(&h.fake, 4, "CUSTOMER");
    h.session.login("user4@example.com", "hunter2").await.unwrap();

    h.fake
        .stub_app_error(Method::Get, "/api/services", AppError::internal("boom"));
    let err = h.client.services().await.unwrap_err();

    assert!(!err.is_auth_error());
    assert_eq!(h.session.state(), SessionState::Authenticated(Role::Customer));
    assert!(h.tokens.load().is_some());
}

#[tokio::test]
async fn login_rejection_does_not_fire_the_teardown_hook() {
    let h = harness();
    stub_login(&h.fake, 4, "CUSTOMER");
    h.session.login("user4@example.com", "hunter2").await.unwrap();

    // A 401 from the auth endpoints is a failed credential check, not a
    // dead session; the unauthenticated path must not clear the store.
    h.fake.stub_app_error(
        Method::Post,
        "/api/auth/login",
        AppError::unauthorized("Invalid email or password"),
    );
    let _ = h
        .client
        .login(&shared_types::LoginRequest {
            email: "other@example.com".into(),
            password: "bad".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(h.session.state(), SessionState::Authenticated(Role::Customer));
    assert!(h.tokens.load().is_some());
}
