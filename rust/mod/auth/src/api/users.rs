use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use taskhub_core::ServiceError;

use crate::api::AppState;
use crate::model::UserSummary;

pub fn routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users))
}

async fn list_users(State(svc): State<AppState>) -> Result<Json<Vec<UserSummary>>, ServiceError> {
    Ok(Json(svc.list_users().await?))
}
