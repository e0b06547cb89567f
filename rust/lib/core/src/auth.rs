//! Authentication seam shared by all modules.
//!
//! Business modules do NOT depend on the auth module. They only know the
//! [`Authenticator`] trait and wrap their protected routes with
//! [`require_auth`]. The concrete token verifier is injected at startup.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use serde::{Deserialize, Serialize};

use crate::ServiceError;

/// The caller identity carried by a valid bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: String,
    pub username: String,
    pub email: String,
}

/// Pluggable authenticator. [`require_auth`] calls this for every request
/// that reaches a protected route.
pub trait Authenticator: Send + Sync + 'static {
    /// Authenticate a request from its headers.
    ///
    /// Returns the caller identity, or `ServiceError::Unauthorized`.
    fn authenticate(&self, headers: &HeaderMap) -> Result<Identity, ServiceError>;
}

/// An authenticator that lets every request through as an anonymous
/// caller. Used in tests that exercise handlers, not auth.
pub struct AllowAll;

impl Authenticator for AllowAll {
    fn authenticate(&self, _headers: &HeaderMap) -> Result<Identity, ServiceError> {
        Ok(Identity {
            user_id: "anonymous".into(),
            username: "anonymous".into(),
            email: String::new(),
        })
    }
}

/// An authenticator that denies everything. Used for testing.
pub struct DenyAll;

impl Authenticator for DenyAll {
    fn authenticate(&self, _headers: &HeaderMap) -> Result<Identity, ServiceError> {
        Err(ServiceError::Unauthorized("access denied".into()))
    }
}

/// Extract the Bearer token from the Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Middleware for protected routers.
///
/// Rejects the request with 401 unless the authenticator accepts it.
/// On success the [`Identity`] is stored as a request extension so
/// handlers can take `Extension<Identity>`.
pub async fn require_auth(
    State(auth): State<Arc<dyn Authenticator>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let identity = auth.authenticate(request.headers())?;
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}
