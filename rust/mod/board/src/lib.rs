//! Board module: tasks, projects, comments, history, notifications and reports.
//!
//! Task and comment routes are public. Everything else sits behind the
//! bearer-token middleware from `taskhub_core`, driven by whatever
//! [`Authenticator`] the server injects.

pub mod api;
pub mod model;
pub mod repo;
pub mod service;
pub mod store_impls;

use std::sync::Arc;

use axum::Router;

use taskhub_core::{Authenticator, Module};
use taskhub_kv::KVStore;

use crate::service::BoardService;

/// The Board module.
pub struct BoardModule {
    service: Arc<BoardService>,
    authenticator: Arc<dyn Authenticator>,
}

impl BoardModule {
    pub fn new(kv: Arc<dyn KVStore>, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            service: BoardService::new(kv),
            authenticator,
        }
    }

    /// Get a reference to the BoardService for programmatic use (seeding).
    pub fn service(&self) -> &Arc<BoardService> {
        &self.service
    }
}

impl Module for BoardModule {
    fn name(&self) -> &str {
        "board"
    }

    fn routes(&self) -> Router {
        api::build_router(Arc::clone(&self.service), Arc::clone(&self.authenticator))
    }
}
