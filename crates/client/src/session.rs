use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use validator::Validate;

use shared_types::{AppError, LoginRequest, RegisterRequest, Role, UserResponse};

use crate::api::ResourceClient;

// ---------------------------------------------------------------------------
// Token persistence
// ---------------------------------------------------------------------------

/// Where the bearer token survives between processes. The store never sees
/// profiles, only the raw token string.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// In-memory store, for tests and short-lived tools.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().expect("token lock poisoned").clone()
    }

    fn save(&self, token: &str) {
        *self.token.lock().expect("token lock poisoned") = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().expect("token lock poisoned") = None;
    }
}

/// File-backed store. IO failures are logged and swallowed; a lost token
/// just means the next restore finds nothing.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(_) => None,
        }
    }

    fn save(&self, token: &str) {
        if let Err(err) = std::fs::write(&self.path, token) {
            tracing::warn!(path = %self.path.display(), "failed to persist token: {err}");
        }
    }

    fn clear(&self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), "failed to clear token: {err}");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Session state machine
// ---------------------------------------------------------------------------

/// Single process-wide session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    /// A token is on hand and the profile fetch is in flight.
    Authenticating,
    Authenticated(Role),
}

/// An established session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub user: UserResponse,
}

struct Inner {
    state: SessionState,
    session: Option<Session>,
}

/// The session store: owns login/logout/restore/register and the state
/// machine. All mutation goes through here; the route guard and dashboards
/// only read.
pub struct SessionStore {
    client: Arc<ResourceClient>,
    tokens: Arc<dyn TokenStore>,
    inner: Arc<Mutex<Inner>>,
}

impl SessionStore {
    pub fn new(client: Arc<ResourceClient>, tokens: Arc<dyn TokenStore>) -> Self {
        let inner = Arc::new(Mutex::new(Inner {
            state: SessionState::Anonymous,
            session: None,
        }));

        // 401/403 on any authenticated call tears the session down.
        let hook_inner = Arc::clone(&inner);
        let hook_tokens = Arc::clone(&tokens);
        client.set_on_auth_error(Arc::new(move || {
            let mut guard = hook_inner.lock().expect("session lock poisoned");
            guard.state = SessionState::Anonymous;
            guard.session = None;
            hook_tokens.clear();
            tracing::debug!("session torn down after auth error");
        }));

        Self {
            client,
            tokens,
            inner,
        }
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock().expect("session lock poisoned").state
    }

    pub fn current(&self) -> Option<Session> {
        self.inner
            .lock()
            .expect("session lock poisoned")
            .session
            .clone()
    }

    fn set(&self, state: SessionState, session: Option<Session>) {
        let mut guard = self.inner.lock().expect("session lock poisoned");
        guard.state = state;
        guard.session = session;
    }

    /// Log in. Validation failures never touch the network; on any failure
    /// the store is left exactly as it was.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        request.validate().map_err(AppError::from)?;

        let auth = self.client.login(&request).await?;

        // An unrecognized role must never reach a dashboard.
        let role = Role::parse(&auth.role)
            .ok_or_else(|| AppError::unauthorized("Unrecognized role in login response"))?;

        self.client.set_token(Some(auth.token.clone()));
        self.tokens.save(&auth.token);
        self.set(SessionState::Authenticating, None);

        match self.client.current_user().await {
            Ok(user) => {
                let session = Session {
                    token: auth.token,
                    role,
                    user,
                };
                self.set(SessionState::Authenticated(role), Some(session.clone()));
                Ok(session)
            }
            Err(err) => {
                // Roll all of it back so a failed login leaves no trace.
                self.client.set_token(None);
                self.tokens.clear();
                self.set(SessionState::Anonymous, None);
                Err(err)
            }
        }
    }

    /// Drop the session. Idempotent, never fails.
    pub fn logout(&self) {
        self.client.set_token(None);
        self.tokens.clear();
        self.set(SessionState::Anonymous, None);
    }

    /// Resume a persisted session. `Ok(None)` when there is nothing to
    /// resume or the token is no longer accepted. A network or server
    /// failure keeps the persisted token so the caller can retry.
    pub async fn restore(&self) -> Result<Option<Session>, AppError> {
        let Some(token) = self.tokens.load() else {
            self.set(SessionState::Anonymous, None);
            return Ok(None);
        };

        self.client.set_token(Some(token.clone()));
        self.set(SessionState::Authenticating, None);

        match self.client.current_user().await {
            Ok(user) => {
                let Some(role) = Role::parse(&user.role) else {
                    self.logout();
                    return Ok(None);
                };
                let session = Session { token, role, user };
                self.set(SessionState::Authenticated(role), Some(session.clone()));
                Ok(Some(session))
            }
            Err(err) if err.is_auth_error() => {
                // The client hook already cleared state; make it explicit.
                self.logout();
                Ok(None)
            }
            Err(err) => {
                // Transport or server trouble is not a dead token.
                self.client.set_token(None);
                self.set(SessionState::Anonymous, None);
                Err(err)
            }
        }
    }

    /// Register a new account. Does not establish a session.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), AppError> {
        request.validate().map_err(AppError::from)?;

        let role = Role::parse(&request.role)
            .ok_or_else(|| AppError::validation_field("role", "Unrecognized role"))?;

        // Provider sign-ups must describe their initial offering.
        if role == Role::Provider {
            if request.category.as_deref().map_or(true, str::is_empty) {
                return Err(AppError::validation_field(
                    "category",
                    "Category is required for providers",
                ));
            }
            if request.price.is_none() {
                return Err(AppError::validation_field(
                    "price",
                    "Price is required for providers",
                ));
            }
        }

        self.client.register(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load(), None);
        store.save("tok-1");
        assert_eq!(store.load().as_deref(), Some("tok-1"));
        store.clear();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn file_store_roundtrip() {
        let path = std::env::temp_dir().join(format!("fixitnow-token-{}", std::process::id()));
        let store = FileTokenStore::new(&path);
        store.clear();
        assert_eq!(store.load(), None);
        store.save("tok-2");
        assert_eq!(store.load().as_deref(), Some("tok-2"));
        store.clear();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn file_store_ignores_blank_content() {
        let path = std::env::temp_dir().join(format!("fixitnow-blank-{}", std::process::id()));
        std::fs::write(&path, "  \n").unwrap();
        let store = FileTokenStore::new(&path);
        assert_eq!(store.load(), None);
        store.clear();
    }
}
