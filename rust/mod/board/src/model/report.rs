use serde::{Deserialize, Serialize};

/// One row of `GET /reports/projects`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTaskCount {
    pub project_name: String,
    pub task_count: usize,
}

/// One row of `GET /reports/users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserTaskCount {
    pub user_id: String,
    pub task_count: usize,
}
