use client::dashboard::{AdminDashboard, DeleteTarget};
use client::Method;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{AppError, AppErrorKind};

use crate::common::{admin_log_json, harness, report_json, service_json, user_json, Harness};

async fn loaded_dashboard(h: &Harness) -> AdminDashboard {
    h.fake.stub(
        Method::Get,
        "/api/users/all",
        200,
        json!([
            user_json(1, "ADMIN"),
            user_json(5, "CUSTOMER"),
            user_json(20, "PROVIDER"),
        ]),
    );
    h.fake.stub(
        Method::Get,
        "/api/services",
        200,
        json!([service_json(7, 20, "Plumbing", 45.0)]),
    );
    h.fake.stub(
        Method::Get,
        "/api/reports",
        200,
        json!([report_json(30, "SERVICE", 7, 5)]),
    );
    h.fake.stub(
        Method::Get,
        "/api/admin-logs/recent?limit=20",
        200,
        json!([admin_log_json(900, 1, "Viewed admin logs")]),
    );

    let mut dashboard = AdminDashboard::new(h.client.clone());
    dashboard.load().await.unwrap();
    dashboard
}

#[tokio::test]
async fn load_populates_users_services_reports_and_logs() {
    let h = harness();
    let dashboard = loaded_dashboard(&h).await;

    assert_eq!(dashboard.users.len(), 3);
    assert_eq!(dashboard.services.len(), 1);
    assert_eq!(dashboard.reports.len(), 1);
    assert_eq!(dashboard.logs.len(), 1);
}

#[tokio::test]
async fn dismissing_a_report_clears_it_from_the_queue() {
    let h = harness();
    let mut dashboard = loaded_dashboard(&h).await;
    h.fake.stub(Method::Delete, "/api/reports/30", 204, json!(null));

    dashboard.dismiss_report(30).await.unwrap();

    assert_eq!(dashboard.reports.len(), 0);
    assert_eq!(h.fake.calls_to(Method::Delete, "/api/reports/30"), 1);
}

#[tokio::test]
async fn failed_dismissal_keeps_the_report_queued() {
    let h = harness();
    let mut dashboard = loaded_dashboard(&h).await;
    h.fake
        .stub_app_error(Method::Delete, "/api/reports/30", AppError::internal("boom"));

    let err = dashboard.dismiss_report(30).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::InternalError);
    assert_eq!(dashboard.reports.len(), 1, "queue untouched on failure");
}

#[tokio::test]
async fn a_requested_delete_does_nothing_until_confirmed() {
    let h = harness();
    let mut dashboard = loaded_dashboard(&h).await;
    let calls_before = h.fake.call_count();

    dashboard.request_delete(DeleteTarget::User, 5);

    assert_eq!(h.fake.call_count(), calls_before, "staging is local");
    assert_eq!(dashboard.users.len(), 3);

    dashboard.cancel_delete();
    assert_eq!(dashboard.pending_delete, None);
    assert_eq!(h.fake.call_count(), calls_before);
}

#[tokio::test]
async fn confirmed_user_delete_removes_the_row() {
    let h = harness();
    let mut dashboard = loaded_dashboard(&h).await;
    h.fake.stub(Method::Delete, "/api/users/5", 204, json!(null));

    dashboard.request_delete(DeleteTarget::User, 5);
    dashboard.confirm_delete().await.unwrap();

    assert_eq!(dashboard.users.len(), 2);
    assert!(dashboard.users.iter().all(|u| u.id != 5));
    assert_eq!(dashboard.pending_delete, None);
}

#[tokio::test]
async fn confirmed_service_delete_removes_the_listing() {
    let h = harness();
    let mut dashboard = loaded_dashboard(&h).await;
    h.fake.stub(Method::Delete, "/api/services/7", 204, json!(null));

    dashboard.request_delete(DeleteTarget::Service, 7);
    dashboard.confirm_delete().await.unwrap();

    assert_eq!(dashboard.services.len(), 0);
}

#[tokio::test]
async fn failed_delete_keeps_the_list_and_the_confirmation() {
    let h = harness();
    let mut dashboard = loaded_dashboard(&h).await;
    h.fake
        .stub_app_error(Method::Delete, "/api/users/5", AppError::internal("boom"));

    dashboard.request_delete(DeleteTarget::User, 5);
    let err = dashboard.confirm_delete().await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::InternalError);
    assert_eq!(dashboard.users.len(), 3, "list untouched on failure");
    assert!(dashboard.pending_delete.is_some(), "still staged for retry");
}

#[tokio::test]
async fn confirming_with_nothing_staged_is_an_error() {
    let h = harness();
    let mut dashboard = loaded_dashboard(&h).await;
    let calls_before = h.fake.call_count();

    let err = dashboard.confirm_delete().await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::BadRequest);
    assert_eq!(h.fake.call_count(), calls_before);
}
