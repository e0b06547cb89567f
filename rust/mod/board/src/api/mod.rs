mod comments;
mod history;
mod notifications;
mod projects;
mod reports;
mod tasks;

use std::sync::Arc;

use axum::Router;

use taskhub_core::{Authenticator, require_auth};

use crate::service::BoardService;

/// Shared application state.
pub type AppState = Arc<BoardService>;

/// Build the Board API router. Routes are relative to `/api`.
///
/// Tasks and comments are public. Projects, history, notifications and
/// reports require a bearer token accepted by `authenticator`.
pub fn build_router(svc: AppState, authenticator: Arc<dyn Authenticator>) -> Router {
    let public = Router::new()
        .merge(tasks::routes())
        .merge(comments::routes());

    let protected = Router::new()
        .merge(projects::routes())
        .merge(history::routes())
        .merge(notifications::routes())
        .merge(reports::routes())
        .route_layer(axum::middleware::from_fn_with_state(
            authenticator,
            require_auth,
        ));

    public.merge(protected).with_state(svc)
}
