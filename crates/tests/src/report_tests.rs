use client::Method;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{AppError, AppErrorKind, CreateReportRequest, ReportTargetType};

use crate::common::{harness, report_json, stub_login};

fn flag_service(target_id: i64) -> CreateReportRequest {
    CreateReportRequest {
        target_type: "SERVICE".into(),
        target_id,
        reason: Some("Listing is a scam".into()),
    }
}

#[tokio::test]
async fn filing_a_report_carries_the_bearer_token() {
    let h = harness();
    stub_login(&h.fake, 5, "CUSTOMER");
    h.session.login("user5@example.com", "hunter2").await.unwrap();
    h.fake
        .stub(Method::Post, "/api/reports", 201, report_json(30, "SERVICE", 7, 5));

    let report = h.client.create_report(&flag_service(7)).await.unwrap();

    assert_eq!(report.id, 30);
    assert_eq!(report.target_type, "SERVICE");
    let calls: Vec<_> = h
        .fake
        .calls()
        .into_iter()
        .filter(|c| c.path == "/api/reports")
        .collect();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].bearer.as_deref(), Some("token-5"));
}

#[tokio::test]
async fn reporting_the_same_target_twice_surfaces_the_conflict() {
    let h = harness();
    h.fake.stub(
        Method::Post,
        "/api/reports",
        201,
        report_json(30, "SERVICE", 7, 5),
    );
    h.fake.stub_app_error(
        Method::Post,
        "/api/reports",
        AppError::conflict("You have already reported this target"),
    );

    h.client.create_report(&flag_service(7)).await.unwrap();
    let err = h.client.create_report(&flag_service(7)).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Conflict);
    assert_eq!(err.message, "You have already reported this target");
}

#[tokio::test]
async fn my_reports_lists_only_what_the_server_returns() {
    let h = harness();
    h.fake.stub(
        Method::Get,
        "/api/reports/my-reports",
        200,
        json!([report_json(30, "SERVICE", 7, 5), report_json(31, "USER", 20, 5)]),
    );

    let reports = h.client.my_reports().await.unwrap();

    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r.reported_by == 5));
}

#[tokio::test]
async fn target_lookups_use_the_canonical_type_string() {
    let h = harness();
    h.fake.stub(
        Method::Get,
        "/api/reports/target/USER/20",
        200,
        json!([report_json(31, "USER", 20, 5)]),
    );
    h.fake.stub(
        Method::Get,
        "/api/reports/count/target/USER/20",
        200,
        json!({ "target_type": "USER", "target_id": 20, "count": 3 }),
    );

    let reports = h
        .client
        .reports_by_target(ReportTargetType::User, 20)
        .await
        .unwrap();
    let count = h
        .client
        .report_count_for_target(ReportTargetType::User, 20)
        .await
        .unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(count.count, 3);
    assert_eq!(count.target_id, 20);
}

#[tokio::test]
async fn withdrawing_a_report_hits_the_delete_route() {
    let h = harness();
    h.fake.stub(Method::Delete, "/api/reports/30", 204, json!(null));

    h.client.delete_report(30).await.unwrap();

    assert_eq!(h.fake.calls_to(Method::Delete, "/api/reports/30"), 1);
}
