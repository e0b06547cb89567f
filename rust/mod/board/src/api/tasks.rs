use axum::extract::{Path, Query, State};
use axum::http::{HeaderName, StatusCode, header};
use axum::routing::get;
use axum::{Json, Router};

use taskhub_core::{JsonBody, ServiceError};

use crate::api::AppState;
use crate::model::{CreateTaskRequest, TaskDto, TaskQuery};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
}

async fn list_tasks(
    State(svc): State<AppState>,
    Query(query): Query<TaskQuery>,
) -> Result<Json<Vec<TaskDto>>, ServiceError> {
    Ok(Json(svc.list_tasks(&query).await?))
}

async fn get_task(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TaskDto>, ServiceError> {
    Ok(Json(svc.get_task(&id).await?))
}

async fn create_task(
    State(svc): State<AppState>,
    JsonBody(req): JsonBody<CreateTaskRequest>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<TaskDto>), ServiceError> {
    let task = svc.create_task(req).await?;
    let location = format!("/api/tasks/{}", task.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(task)))
}

async fn update_task(
    State(svc): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<CreateTaskRequest>,
) -> Result<StatusCode, ServiceError> {
    svc.update_task(&id, req).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_task(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    svc.delete_task(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
