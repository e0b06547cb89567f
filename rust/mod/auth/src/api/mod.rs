mod session;
mod users;

use std::sync::Arc;

use axum::Router;

use taskhub_core::{Authenticator, require_auth};

use crate::service::AuthService;

/// Shared application state.
pub type AppState = Arc<AuthService>;

/// Build the complete auth API router.
///
/// All routes are relative; the caller nests them under `/api`.
/// Register and login are public, the user list needs a bearer token.
pub fn build_router(svc: AppState, authenticator: Arc<dyn Authenticator>) -> Router {
    let protected = users::routes().route_layer(axum::middleware::from_fn_with_state(
        authenticator,
        require_auth,
    ));

    Router::new()
        .nest("/auth", session::routes())
        .merge(protected)
        .with_state(svc)
}
