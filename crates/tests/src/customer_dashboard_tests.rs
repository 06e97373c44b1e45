use chrono::NaiveDate;
use client::dashboard::CustomerDashboard;
use client::Method;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::AppErrorKind;

use crate::common::{booking_json, harness, provider_json, service_json, Harness};

async fn loaded_dashboard(h: &Harness) -> CustomerDashboard {
    h.fake.stub(
        Method::Get,
        "/api/users/providers",
        200,
        json!([
            provider_json(20, "Plumbing", "Pune"),
            provider_json(21, "Electrical", "Mumbai"),
        ]),
    );
    h.fake.stub(
        Method::Get,
        "/api/services",
        200,
        json!([
            service_json(1, 20, "Plumbing", 45.0),
            service_json(2, 21, "Electrical", 60.0),
            service_json(3, 21, "Deep Cleaning", 30.0),
        ]),
    );
    h.fake.stub(
        Method::Get,
        "/api/bookings/customer/5",
        200,
        json!([
            booking_json(100, 1, 5, 20, "COMPLETED"),
            booking_json(101, 2, 5, 21, "CONFIRMED"),
            booking_json(102, 3, 5, 21, "PENDING"),
            booking_json(103, 1, 5, 20, "COMPLETED"),
        ]),
    );

    let mut dashboard = CustomerDashboard::new(h.client.clone(), 5);
    dashboard.load().await.unwrap();
    dashboard
}

#[tokio::test]
async fn filters_are_case_insensitive_substrings() {
    let h = harness();
    let mut dashboard = loaded_dashboard(&h).await;

    dashboard.category_filter = "clean".into();
    let services = dashboard.filtered_services();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].id, 3);

    dashboard.category_filter.clear();
    dashboard.location_filter = "MUM".into();
    let providers = dashboard.filtered_providers();
    assert_eq!(providers.len(), 1);
    assert_eq!(providers[0].id, 21);
}

#[tokio::test]
async fn empty_filters_match_everything() {
    let h = harness();
    let dashboard = loaded_dashboard(&h).await;

    assert_eq!(dashboard.filtered_services().len(), 3);
    assert_eq!(dashboard.filtered_providers().len(), 2);
}

#[tokio::test]
async fn metrics_count_statuses_and_never_divide_by_zero() {
    let h = harness();
    let dashboard = loaded_dashboard(&h).await;

    let metrics = dashboard.metrics();
    assert_eq!(metrics.total_bookings, 4);
    assert_eq!(metrics.confirmed, 1);
    assert_eq!(metrics.completed, 2);
    assert_eq!(metrics.completion_ratio, 0.5);

    let empty = CustomerDashboard::new(h.client.clone(), 5);
    let metrics = empty.metrics();
    assert_eq!(metrics.completion_ratio, 0.0);
    assert!(!metrics.completion_ratio.is_nan());
}

#[tokio::test]
async fn booking_lands_in_the_list_only_after_the_server_accepts() {
    let h = harness();
    let mut dashboard = loaded_dashboard(&h).await;
    h.fake.stub(
        Method::Post,
        "/api/bookings",
        201,
        booking_json(104, 1, 5, 20, "PENDING"),
    );

    let date = NaiveDate::from_ymd_opt(2026, 9, 10).unwrap();
    let booking = dashboard
        .book(1, date, Some("10:00-12:00".into()), None)
        .await
        .unwrap();

    assert_eq!(booking.id, 104);
    assert_eq!(dashboard.bookings.len(), 5);
}

#[tokio::test]
async fn rejected_booking_leaves_the_list_untouched() {
    let h = harness();
    let mut dashboard = loaded_dashboard(&h).await;
    h.fake.stub_app_error(
        Method::Post,
        "/api/bookings",
        shared_types::AppError::bad_request("Date is in the past"),
    );

    let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let err = dashboard.book(1, date, None, None).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::BadRequest);
    assert_eq!(dashboard.bookings.len(), 4);
}

#[tokio::test]
async fn booking_an_unknown_service_never_hits_the_network() {
    let h = harness();
    let mut dashboard = loaded_dashboard(&h).await;
    let calls_before = h.fake.call_count();

    let date = NaiveDate::from_ymd_opt(2026, 9, 10).unwrap();
    let err = dashboard.book(999, date, None, None).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::NotFound);
    assert_eq!(h.fake.call_count(), calls_before);
}

#[tokio::test]
async fn review_submission_targets_the_booking_provider() {
    let h = harness();
    let dashboard = loaded_dashboard(&h).await;
    h.fake.stub(
        Method::Post,
        "/api/reviews",
        201,
        json!({
            "id": 50,
            "booking_id": 100,
            "customer_id": 5,
            "provider_id": 20,
            "rating": 5,
            "created_at": "2026-08-20T10:00:00+00:00"
        }),
    );

    let review = dashboard
        .submit_review(100, 5, Some("Great work".into()))
        .await
        .unwrap();

    assert_eq!(review.provider_id, 20);
    let call = h
        .fake
        .calls()
        .into_iter()
        .find(|c| c.path == "/api/reviews")
        .expect("review posted");
    let body = call.body.unwrap();
    assert_eq!(body["provider_id"], 20);
    assert_eq!(body["rating"], 5);
}
