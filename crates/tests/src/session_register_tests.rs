use client::{Method, SessionState};
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{AppErrorKind, RegisterRequest};

use crate::common::harness;

fn provider_request() -> RegisterRequest {
    RegisterRequest {
        name: "Dana Fixer".into(),
        email: "dana@example.com".into(),
        password: "hunter2hunter2".into(),
        role: "PROVIDER".into(),
        location: Some("Pune".into()),
        category: Some("Plumbing".into()),
        subcategory: None,
        skills: Some("Pipes".into()),
        service_area: Some("Downtown".into()),
        price: Some(45.0),
        availability: Some("Weekdays".into()),
    }
}

#[tokio::test]
async fn provider_registration_without_price_fails_locally() {
    let h = harness();
    let request = RegisterRequest {
        price: None,
        ..provider_request()
    };

    let err = h.session.register(&request).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert!(err.field_errors.contains_key("price"));
    assert_eq!(h.fake.call_count(), 0, "validation must not touch the network");
}

#[tokio::test]
async fn provider_registration_without_category_fails_locally() {
    let h = harness();
    let request = RegisterRequest {
        category: None,
        ..provider_request()
    };

    let err = h.session.register(&request).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert!(err.field_errors.contains_key("category"));
    assert_eq!(h.fake.call_count(), 0);
}

#[tokio::test]
async fn short_password_fails_locally() {
    let h = harness();
    let request = RegisterRequest {
        password: "short".into(),
        ..provider_request()
    };

    let err = h.session.register(&request).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert!(err.field_errors.contains_key("password"));
    assert_eq!(h.fake.call_count(), 0);
}

#[tokio::test]
async fn successful_registration_does_not_establish_a_session() {
    let h = harness();
    h.fake.stub(
        Method::Post,
        "/api/auth/register",
        201,
        json!({ "message": "User registered successfully" }),
    );

    h.session.register(&provider_request()).await.unwrap();

    assert_eq!(h.fake.calls_to(Method::Post, "/api/auth/register"), 1);
    assert_eq!(h.session.state(), SessionState::Anonymous);
    assert_eq!(h.session.current(), None);
}

#[tokio::test]
async fn duplicate_email_surfaces_the_conflict() {
    let h = harness();
    h.fake.stub_app_error(
        Method::Post,
        "/api/auth/register",
        shared_types::AppError::conflict("Email already exists"),
    );

    let err = h.session.register(&provider_request()).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Conflict);
    assert_eq!(err.message, "Email already exists");
}
