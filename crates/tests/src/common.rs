use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use client::{
    ApiRequest, ApiResponse, ApiTransport, MemoryTokenStore, Method, ResourceClient, SessionStore,
};
use shared_types::AppError;

type StubKey = (Method, String);
type StubResult = Result<ApiResponse, AppError>;

/// In-memory stand-in for the REST API. Responses are stubbed per
/// (method, path); every request is recorded for assertions. The last stub
/// for a key is reused once its queue drains, so repeated calls (retries)
/// keep working without re-stubbing.
#[derive(Default)]
pub struct FakeApi {
    stubs: Mutex<HashMap<StubKey, VecDeque<StubResult>>>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn stub(&self, method: Method, path: &str, status: u16, body: Value) {
        self.stubs
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(Ok(ApiResponse { status, body }));
    }

    /// Stub an error response carrying the structured error body.
    pub fn stub_app_error(&self, method: Method, path: &str, err: AppError) {
        let status = err.status_code_u16();
        let body = serde_json::to_value(&err).unwrap();
        self.stub(method, path, status, body);
    }

    /// Stub a transport failure (request never reaches the server).
    pub fn stub_network_error(&self, method: Method, path: &str) {
        self.stubs
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(Err(AppError::network("connection refused")));
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, method: Method, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }
}

#[async_trait]
impl ApiTransport for FakeApi {
    async fn send(&self, req: ApiRequest) -> Result<ApiResponse, AppError> {
        self.calls.lock().unwrap().push(req.clone());

        let mut stubs = self.stubs.lock().unwrap();
        let queue = stubs.get_mut(&(req.method, req.path.clone()));
        match queue {
            Some(q) if !q.is_empty() => {
                if q.len() > 1 {
                    q.pop_front().unwrap()
                } else {
                    q.front().cloned().unwrap()
                }
            }
            _ => Ok(ApiResponse {
                status: 404,
                body: json!({ "kind": "NotFound", "message": "no stub for request" }),
            }),
        }
    }
}

/// Everything a scenario needs: the fake wire, the client over it, the
/// token store, and a session store wired to both.
pub struct Harness {
    pub fake: Arc<FakeApi>,
    pub client: Arc<ResourceClient>,
    pub tokens: Arc<MemoryTokenStore>,
    pub session: SessionStore,
}

pub fn harness() -> Harness {
    let fake = FakeApi::new();
    let client = Arc::new(ResourceClient::new(fake.clone()));
    let tokens = Arc::new(MemoryTokenStore::new());
    let session = SessionStore::new(client.clone(), tokens.clone());
    Harness {
        fake,
        client,
        tokens,
        session,
    }
}

// ---------------------------------------------------------------------------
// JSON fixtures
// ---------------------------------------------------------------------------

pub fn user_json(id: i64, role: &str) -> Value {
    json!({
        "id": id,
        "name": format!("User {id}"),
        "email": format!("user{id}@example.com"),
        "role": role,
        "location": "Pune"
    })
}

pub fn provider_json(id: i64, category: &str, location: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Provider {id}"),
        "email": format!("provider{id}@example.com"),
        "role": "PROVIDER",
        "location": location,
        "category": category
    })
}

pub fn service_json(id: i64, provider_id: i64, category: &str, price: f64) -> Value {
    json!({
        "id": id,
        "provider_id": provider_id,
        "category": category,
        "price": price,
        "availability": "Available",
        "location": "Pune",
        "created_at": "2026-08-01T10:00:00+00:00"
    })
}

pub fn booking_json(id: i64, service_id: i64, customer_id: i64, provider_id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "service_id": service_id,
        "customer_id": customer_id,
        "provider_id": provider_id,
        "booking_date": "2026-09-01",
        "status": status,
        "created_at": "2026-08-01T10:00:00+00:00"
    })
}

pub fn report_json(id: i64, target_type: &str, target_id: i64, reported_by: i64) -> Value {
    json!({
        "id": id,
        "target_type": target_type,
        "target_id": target_id,
        "reported_by": reported_by,
        "reason": "Did not show up",
        "created_at": "2026-08-01T10:00:00+00:00"
    })
}

pub fn admin_log_json(id: i64, admin_id: i64, action: &str) -> Value {
    json!({
        "id": id,
        "admin_id": admin_id,
        "action": action,
        "timestamp": "2026-08-01T10:00:00+00:00"
    })
}

/// Stub a working login for the given role: the token exchange plus the
/// profile fetch.
pub fn stub_login(fake: &FakeApi, user_id: i64, role: &str) {
    fake.stub(
        Method::Post,
        "/api/auth/login",
        200,
        json!({ "token": format!("token-{user_id}"), "role": role }),
    );
    fake.stub(Method::Get, "/api/users/me", 200, user_json(user_id, role));
}
