pub mod token;
pub mod user;

use std::sync::Arc;

use thiserror::Error;

use taskhub_core::ServiceError;
use taskhub_kv::KVStore;

use crate::repo::UserRepository;

/// Signing secret used when none is configured. Only fit for development.
pub const DEFAULT_JWT_SECRET: &str = "taskhub-dev-secret-change-me";

/// Auth service error type.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("storage: {0}")]
    Storage(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<AuthError> for ServiceError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::NotFound(m) => ServiceError::NotFound(m),
            AuthError::Conflict(m) => ServiceError::Conflict(m),
            AuthError::Validation(m) => ServiceError::Validation(m),
            AuthError::Unauthorized(m) => ServiceError::Unauthorized(m),
            AuthError::Storage(m) => ServiceError::Storage(m),
            AuthError::Internal(m) => ServiceError::Internal(m),
        }
    }
}

impl From<ServiceError> for AuthError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(m) => AuthError::NotFound(m),
            ServiceError::Conflict(m) => AuthError::Conflict(m),
            ServiceError::Validation(m) => AuthError::Validation(m),
            ServiceError::Unauthorized(m) => AuthError::Unauthorized(m),
            ServiceError::Storage(m) => AuthError::Storage(m),
            ServiceError::Internal(m) => AuthError::Internal(m),
        }
    }
}

/// Configuration for the auth service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT signing secret (HS256).
    pub jwt_secret: String,
    /// Token lifetime in seconds (default: 8h).
    pub token_ttl_secs: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_ttl_secs: 28800, // 8h
        }
    }
}

impl AuthConfig {
    /// Whether the development fallback secret is still in use.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

/// The Auth service. Holds the user repository and configuration.
pub struct AuthService {
    pub(crate) users: UserRepository,
    pub(crate) config: AuthConfig,
}

impl AuthService {
    pub fn new(kv: Arc<dyn KVStore>, config: AuthConfig) -> Arc<Self> {
        Arc::new(Self {
            users: UserRepository::new(kv),
            config,
        })
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

/// Run CPU-heavy password hashing off the async workers.
pub(crate) async fn blocking<R, F>(f: F) -> Result<R, AuthError>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AuthError::Internal(format!("blocking task failed: {e}")))
}

#[cfg(test)]
pub(crate) fn test_service(config: AuthConfig) -> (Arc<AuthService>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let kv: Arc<dyn KVStore> =
        Arc::new(taskhub_kv::RedbStore::open(&dir.path().join("auth.redb")).unwrap());
    (AuthService::new(kv, config), dir)
}
