use client::dashboard::ProviderDashboard;
use client::Method;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{AppError, AppErrorKind, BookingStatus};

use crate::common::{booking_json, harness, service_json, Harness};

async fn loaded_dashboard(h: &Harness) -> ProviderDashboard {
    h.fake.stub(
        Method::Get,
        "/api/services/provider/20",
        200,
        json!([
            service_json(7, 20, "Plumbing", 45.0),
            service_json(8, 20, "Drain Cleaning", 35.0),
        ]),
    );
    h.fake.stub(
        Method::Get,
        "/api/bookings/provider/20",
        200,
        json!([
            booking_json(200, 7, 5, 20, "PENDING"),
            booking_json(201, 7, 6, 20, "COMPLETED"),
        ]),
    );

    let mut dashboard = ProviderDashboard::new(h.client.clone(), 20);
    dashboard.load().await.unwrap();
    dashboard
}

#[tokio::test]
async fn saving_a_draft_replaces_the_listing_field_for_field() {
    let h = harness();
    let mut dashboard = loaded_dashboard(&h).await;

    {
        let draft = dashboard.begin_edit(7).unwrap();
        draft.request.price = 55.0;
        draft.request.description = Some("Emergency call-outs".into());
    }
    h.fake.stub(
        Method::Put,
        "/api/services/7",
        200,
        json!({
            "id": 7,
            "provider_id": 20,
            "category": "Plumbing",
            "description": "Emergency call-outs",
            "price": 55.0,
            "availability": "Available",
            "location": "Pune",
            "created_at": "2026-08-01T10:00:00+00:00"
        }),
    );

    dashboard.save_draft().await.unwrap();

    assert_eq!(dashboard.draft, None);
    let updated = dashboard.services.iter().find(|s| s.id == 7).unwrap();
    assert_eq!(updated.price, 55.0);
    assert_eq!(updated.description.as_deref(), Some("Emergency call-outs"));
    // The PUT carried the full draft.
    let call = h
        .fake
        .calls()
        .into_iter()
        .find(|c| c.path == "/api/services/7")
        .unwrap();
    assert_eq!(call.body.unwrap()["price"], 55.0);
}

#[tokio::test]
async fn cancelling_an_edit_makes_no_network_call() {
    let h = harness();
    let mut dashboard = loaded_dashboard(&h).await;
    let calls_before = h.fake.call_count();

    dashboard.begin_edit(7).unwrap();
    dashboard.cancel_edit();

    assert_eq!(dashboard.draft, None);
    assert_eq!(h.fake.call_count(), calls_before);
    // The listing is untouched.
    assert_eq!(dashboard.services[0].price, 45.0);
}

#[tokio::test]
async fn failed_save_keeps_both_the_list_and_the_draft() {
    let h = harness();
    let mut dashboard = loaded_dashboard(&h).await;
    dashboard.begin_edit(7).unwrap();
    dashboard.draft.as_mut().unwrap().request.price = 99.0;
    h.fake
        .stub_app_error(Method::Put, "/api/services/7", AppError::internal("boom"));

    let err = dashboard.save_draft().await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::InternalError);
    assert_eq!(dashboard.services[0].price, 45.0, "list untouched on failure");
    assert!(dashboard.draft.is_some(), "draft survives for a retry");
}

#[tokio::test]
async fn deleting_a_service_removes_exactly_that_listing() {
    let h = harness();
    let mut dashboard = loaded_dashboard(&h).await;
    h.fake.stub(Method::Delete, "/api/services/7", 204, json!(null));

    dashboard.delete_service(7).await.unwrap();

    assert_eq!(h.fake.calls_to(Method::Delete, "/api/services/7"), 1);
    assert_eq!(dashboard.services.len(), 1);
    assert!(dashboard.services.iter().all(|s| s.id != 7));
}

#[tokio::test]
async fn failed_delete_keeps_the_list_and_surfaces_the_error() {
    let h = harness();
    let mut dashboard = loaded_dashboard(&h).await;
    h.fake
        .stub_app_error(Method::Delete, "/api/services/7", AppError::internal("boom"));

    let err = dashboard.delete_service(7).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::InternalError);
    assert_eq!(dashboard.services.len(), 2);
}

#[tokio::test]
async fn status_transitions_take_the_server_answer() {
    let h = harness();
    let mut dashboard = loaded_dashboard(&h).await;
    h.fake.stub(
        Method::Patch,
        "/api/bookings/200/status",
        200,
        booking_json(200, 7, 5, 20, "CONFIRMED"),
    );

    dashboard
        .set_booking_status(200, BookingStatus::Confirmed)
        .await
        .unwrap();

    let booking = dashboard.bookings.iter().find(|b| b.id == 200).unwrap();
    assert_eq!(booking.status, "CONFIRMED");
}

#[tokio::test]
async fn metrics_cover_services_and_completion() {
    let h = harness();
    let dashboard = loaded_dashboard(&h).await;

    let metrics = dashboard.metrics();
    assert_eq!(metrics.service_count, 2);
    assert_eq!(metrics.total_bookings, 2);
    assert_eq!(metrics.completed_bookings, 1);
    assert_eq!(metrics.completion_ratio, 0.5);

    let empty = ProviderDashboard::new(h.client.clone(), 20);
    assert_eq!(empty.metrics().completion_ratio, 0.0);
}
