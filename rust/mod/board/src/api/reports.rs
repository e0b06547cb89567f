use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use taskhub_core::ServiceError;

use crate::api::AppState;
use crate::model::{ProjectTaskCount, UserTaskCount};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/tasks", get(status_report))
        .route("/reports/projects", get(project_report))
        .route("/reports/users", get(user_report))
        .route("/reports/export/csv", get(export_csv))
}

async fn status_report(
    State(svc): State<AppState>,
) -> Result<Json<BTreeMap<String, usize>>, ServiceError> {
    Ok(Json(svc.status_report().await?))
}

async fn project_report(
    State(svc): State<AppState>,
) -> Result<Json<Vec<ProjectTaskCount>>, ServiceError> {
    Ok(Json(svc.project_report().await?))
}

async fn user_report(State(svc): State<AppState>) -> Result<Json<Vec<UserTaskCount>>, ServiceError> {
    Ok(Json(svc.user_report().await?))
}

async fn export_csv(State(svc): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let body = svc.export_csv().await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"export_tasks.csv\"",
            ),
        ],
        body,
    ))
}
