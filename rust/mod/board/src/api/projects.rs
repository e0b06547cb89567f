use axum::extract::{Path, State};
use axum::http::{HeaderName, StatusCode, header};
use axum::routing::get;
use axum::{Json, Router};

use taskhub_core::{JsonBody, ServiceError};

use crate::api::AppState;
use crate::model::{CreateProjectRequest, Project};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
}

async fn list_projects(State(svc): State<AppState>) -> Result<Json<Vec<Project>>, ServiceError> {
    Ok(Json(svc.list_projects().await?))
}

async fn get_project(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, ServiceError> {
    Ok(Json(svc.get_project(&id).await?))
}

async fn create_project(
    State(svc): State<AppState>,
    JsonBody(req): JsonBody<CreateProjectRequest>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<Project>), ServiceError> {
    let project = svc.create_project(req).await?;
    let location = format!("/api/projects/{}", project.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(project)))
}

async fn update_project(
    State(svc): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<CreateProjectRequest>,
) -> Result<StatusCode, ServiceError> {
    svc.update_project(&id, req).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_project(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    svc.delete_project(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
