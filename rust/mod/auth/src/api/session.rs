use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use taskhub_core::{JsonBody, ServiceError};

use crate::api::AppState;
use crate::model::{LoginRequest, LoginResponse, RegisterRequest};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

async fn register(
    State(svc): State<AppState>,
    JsonBody(input): JsonBody<RegisterRequest>,
) -> Result<Json<Value>, ServiceError> {
    svc.register(input).await?;
    Ok(Json(json!({"message": "registration successful"})))
}

async fn login(
    State(svc): State<AppState>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ServiceError> {
    Ok(Json(svc.login(input).await?))
}
