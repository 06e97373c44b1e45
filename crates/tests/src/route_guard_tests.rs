use client::{dashboard_for, Capability, Method, RouteDecision, RouteGuard, SessionState};
use pretty_assertions::assert_eq;
use shared_types::Role;

use crate::common::{harness, stub_login, user_json};

#[tokio::test]
async fn each_login_routes_to_its_own_dashboard() {
    for (role_str, role) in [
        ("CUSTOMER", Role::Customer),
        ("PROVIDER", Role::Provider),
        ("ADMIN", Role::Admin),
    ] {
        let h = harness();
        stub_login(&h.fake, 1, role_str);

        let session = h.session.login("user1@example.com", "hunter2").await.unwrap();

        assert_eq!(session.role, role);
        assert_eq!(
            RouteGuard::check(Capability::Dashboard(role), h.session.state()),
            RouteDecision::Allow
        );
        // No other dashboard opens for this session.
        for other in [Role::Customer, Role::Provider, Role::Admin] {
            if other != role {
                assert_eq!(
                    RouteGuard::check(Capability::Dashboard(other), h.session.state()),
                    RouteDecision::RedirectToLogin
                );
            }
        }
    }
}

#[tokio::test]
async fn admin_login_reaches_the_admin_dashboard_and_loads_users() {
    let h = harness();
    stub_login(&h.fake, 10, "ADMIN");
    h.fake.stub(
        Method::Get,
        "/api/users/all",
        200,
        serde_json::json!([user_json(10, "ADMIN"), user_json(11, "CUSTOMER")]),
    );
    h.fake.stub(Method::Get, "/api/services", 200, serde_json::json!([]));
    h.fake
        .stub(Method::Get, "/api/admin-logs/recent?limit=20", 200, serde_json::json!([]));

    let session = h.session.login("user10@example.com", "hunter2").await.unwrap();
    assert_eq!(dashboard_for(session.role), "/dashboard/admin");

    let mut dashboard = client::dashboard::AdminDashboard::new(h.client.clone());
    dashboard.load().await.unwrap();

    assert_eq!(dashboard.users.len(), 2);
    // The users fetch went out with the session's bearer token.
    let call = h
        .fake
        .calls()
        .into_iter()
        .find(|c| c.path == "/api/users/all")
        .expect("users/all was called");
    assert_eq!(call.bearer.as_deref(), Some("token-10"));
}

#[test]
fn anonymous_sessions_never_reach_a_dashboard() {
    for role in [Role::Customer, Role::Provider, Role::Admin] {
        assert_eq!(
            RouteGuard::check(Capability::Dashboard(role), SessionState::Anonymous),
            RouteDecision::RedirectToLogin
        );
    }
}
