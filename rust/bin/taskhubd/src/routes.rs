//! Route registration: module routes under `/api` plus system endpoints.

use axum::Router;
use axum::http::HeaderValue;
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use taskhub_core::Module;

/// Build the complete router.
pub fn build_router(modules: &[&dyn Module], cors: CorsLayer) -> Router {
    let mut api = Router::new();
    for module in modules {
        info!("mounting module {} under /api", module.name());
        api = api.merge(module.routes());
    }

    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// CORS for the configured browser origins. Unparseable entries are skipped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("ignoring invalid CORS origin {:?}", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "taskhubd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
