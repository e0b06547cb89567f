use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use taskhub_core::ServiceError;

use crate::api::AppState;
use crate::model::{DEFAULT_HISTORY_LIMIT, HistoryEntryDto, HistoryQuery};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/history", get(recent_history))
        .route("/history/task/{task_id}", get(history_for_task))
}

async fn history_for_task(
    State(svc): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<Vec<HistoryEntryDto>>, ServiceError> {
    Ok(Json(svc.history_for_task(&task_id).await?))
}

async fn recent_history(
    State(svc): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryEntryDto>>, ServiceError> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    Ok(Json(svc.recent_history(limit).await?))
}
