use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Well-known task statuses. The field itself stays free text.
pub mod status {
    pub const NEW: &str = "new";
    pub const IN_PROGRESS: &str = "in-progress";
    pub const DONE: &str = "done";
    pub const BLOCKED: &str = "blocked";
    pub const CANCELLED: &str = "cancelled";
}

/// Well-known task priorities. The field itself stays free text.
pub mod priority {
    pub const LOW: &str = "low";
    pub const MEDIUM: &str = "medium";
    pub const HIGH: &str = "high";
    pub const CRITICAL: &str = "critical";
}

/// Task as stored in the `tasks` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
    pub priority: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub assigned_to_user_id: Option<String>,
    /// Free-form date string as entered by the client.
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub estimated_hours: f64,
    #[serde(default)]
    pub actual_hours: f64,
    #[serde(default)]
    pub created_by_user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Task as exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub project_id: Option<String>,
    pub assigned_to_user_id: Option<String>,
    pub due_date: Option<String>,
    pub estimated_hours: f64,
    pub actual_hours: f64,
    pub created_by_user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskDto {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            status: t.status,
            priority: t.priority,
            project_id: t.project_id,
            assigned_to_user_id: t.assigned_to_user_id,
            due_date: t.due_date,
            estimated_hours: t.estimated_hours,
            actual_hours: t.actual_hours,
            created_by_user_id: t.created_by_user_id,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

/// Body of `POST /tasks` and `PUT /tasks/{id}`.
///
/// Only `title` is required. On update `createdByUserId` is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub assigned_to_user_id: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub estimated_hours: f64,
    #[serde(default)]
    pub created_by_user_id: Option<String>,
}

/// Query parameters of `GET /tasks`. Blank values are ignored. `search` is
/// trimmed, the other filters must match exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub project_id: Option<String>,
}
