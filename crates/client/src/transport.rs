use async_trait::async_trait;
use serde_json::Value;
use shared_types::AppError;

/// HTTP method subset the API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// A request as the resource client hands it to the transport.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

/// Raw response: HTTP status plus the decoded JSON body (Null when empty).
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Wire abstraction under [`crate::ResourceClient`].
///
/// `Err` is reserved for transport failures (connect, timeout) and always
/// carries [`shared_types::AppErrorKind::NetworkError`]; HTTP error statuses
/// come back as a normal [`ApiResponse`].
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn send(&self, req: ApiRequest) -> Result<ApiResponse, AppError>;
}
