use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use taskhub_core::ServiceError;

use crate::api::AppState;
use crate::model::{NotificationDto, NotificationQuery};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notifications/user/{user_id}", get(notifications_for_user))
        .route("/notifications/user/{user_id}/mark-read", post(mark_all_read))
}

async fn notifications_for_user(
    State(svc): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<Vec<NotificationDto>>, ServiceError> {
    let unread_only = query.unread_only.unwrap_or(true);
    Ok(Json(svc.notifications_for_user(&user_id, unread_only).await?))
}

async fn mark_all_read(
    State(svc): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    svc.mark_all_read(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
