//! Headless client core for the FixItNow marketplace.
//!
//! Everything the web shell needs short of rendering: the session store
//! ([`session::SessionStore`]), route guard ([`guard::RouteGuard`]), typed
//! resource client ([`api::ResourceClient`]), and per-role dashboard
//! controllers ([`dashboard`]). Transport is abstracted behind
//! [`transport::ApiTransport`] so all of it runs against a fake in tests.

pub mod api;
pub mod dashboard;
pub mod guard;
pub mod http;
pub mod session;
pub mod transport;

pub use api::ResourceClient;
pub use guard::{dashboard_for, Capability, RouteDecision, RouteGuard};
pub use http::HttpTransport;
pub use session::{
    FileTokenStore, MemoryTokenStore, Session, SessionState, SessionStore, TokenStore,
};
pub use transport::{ApiRequest, ApiResponse, ApiTransport, Method};
