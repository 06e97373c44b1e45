use axum::extract::Request;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use super::jwt::validate_token;

/// Permissive auth middleware. Validates the `Authorization: Bearer` token
/// when present and inserts the decoded [`super::jwt::Claims`] into request
/// extensions. Does NOT reject unauthenticated requests — the extractors in
/// [`super::extractors`] decide authorization per handler.
pub async fn auth_middleware(mut req: Request, next: Next) -> Response {
    if let Some(token) = extract_bearer_token(req.headers()) {
        match validate_token(&token) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
            }
            Err(err) => {
                tracing::debug!("rejected bearer token: {err}");
            }
        }
    }
    next.run(req).await
}

fn extract_bearer_token(headers: &axum::http::HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
