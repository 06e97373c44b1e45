use shared_types::Role;

use crate::session::SessionState;

/// What a route demands of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Public,
    Authenticated,
    /// A role dashboard. Matching is exact: an admin does not get the
    /// provider dashboard.
    Dashboard(Role),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    /// The original destination is discarded, not replayed after login.
    RedirectToLogin,
}

/// Stateless gatekeeper between the router and the session store.
pub struct RouteGuard;

impl RouteGuard {
    pub fn check(required: Capability, state: SessionState) -> RouteDecision {
        match (required, state) {
            (Capability::Public, _) => RouteDecision::Allow,
            (Capability::Authenticated, SessionState::Authenticated(_)) => RouteDecision::Allow,
            (Capability::Dashboard(role), SessionState::Authenticated(session_role)) => {
                if role == session_role {
                    RouteDecision::Allow
                } else {
                    RouteDecision::RedirectToLogin
                }
            }
            _ => RouteDecision::RedirectToLogin,
        }
    }
}

/// The one dashboard route for each role.
pub fn dashboard_for(role: Role) -> &'static str {
    match role {
        Role::Customer => "/dashboard/customer",
        Role::Provider => "/dashboard/provider",
        Role::Admin => "/dashboard/admin",
    }
}
