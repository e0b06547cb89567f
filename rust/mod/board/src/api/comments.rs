use axum::extract::{Path, State};
use axum::http::{HeaderName, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};

use taskhub_core::{JsonBody, ServiceError};

use crate::api::AppState;
use crate::model::{AddCommentRequest, CommentDto};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/comments", post(add_comment))
        .route("/comments/task/{task_id}", get(comments_for_task))
}

async fn comments_for_task(
    State(svc): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<Vec<CommentDto>>, ServiceError> {
    Ok(Json(svc.comments_for_task(&task_id).await?))
}

async fn add_comment(
    State(svc): State<AppState>,
    JsonBody(req): JsonBody<AddCommentRequest>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<CommentDto>), ServiceError> {
    let comment = svc.add_comment(req).await?;
    // Comments have no route of their own; point at the task's list.
    let location = format!("/api/comments/task/{}", comment.task_id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(comment)))
}
