//! Auth module: users, password login and bearer tokens.
//!
//! # Resources
//!
//! - **User**: username/email identity with an argon2 password hash
//! - **Token**: HS256 JWT carrying id, username, email and a token id
//!
//! # Usage
//!
//! ```ignore
//! use auth::{AuthModule, service::AuthConfig};
//!
//! let module = AuthModule::new(kv, AuthConfig::default());
//! let authenticator = module.authenticator(); // hand to other modules
//! let router = module.routes(); // Mount under /api
//! ```

pub mod api;
pub mod model;
pub mod repo;
pub mod service;
pub mod store_impls;

use std::sync::Arc;

use axum::Router;

use taskhub_core::{Authenticator, Module};
use taskhub_kv::KVStore;

use crate::service::{AuthConfig, AuthService};

/// Auth module implementing the Module trait.
///
/// Holds the AuthService and provides HTTP routes for all auth endpoints.
pub struct AuthModule {
    service: Arc<AuthService>,
}

impl AuthModule {
    /// Create a new AuthModule over the shared document store.
    pub fn new(kv: Arc<dyn KVStore>, config: AuthConfig) -> Self {
        Self {
            service: AuthService::new(kv, config),
        }
    }

    /// Get a reference to the underlying AuthService.
    pub fn service(&self) -> &Arc<AuthService> {
        &self.service
    }

    /// The token verifier protected routes of every module use.
    pub fn authenticator(&self) -> Arc<dyn Authenticator> {
        self.service.clone()
    }
}

impl Module for AuthModule {
    fn name(&self) -> &str {
        "auth"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone(), self.authenticator())
    }
}
