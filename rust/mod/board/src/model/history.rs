use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One audit record about a task. Never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub task_id: String,
    pub user_id: String,
    pub action: String,
    #[serde(default)]
    pub old_value: Option<String>,
    #[serde(default)]
    pub new_value: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryDto {
    pub id: String,
    pub task_id: String,
    pub user_id: String,
    pub action: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl From<HistoryEntry> for HistoryEntryDto {
    fn from(h: HistoryEntry) -> Self {
        Self {
            id: h.id,
            task_id: h.task_id,
            user_id: h.user_id,
            action: h.action,
            old_value: h.old_value,
            new_value: h.new_value,
            timestamp: h.timestamp,
        }
    }
}

/// Input for recording a history entry. Id and timestamp are assigned.
#[derive(Debug, Clone, Default)]
pub struct NewHistoryEntry {
    pub task_id: String,
    pub user_id: String,
    pub action: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

/// Default cap for `GET /history`.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Query parameters of `GET /history`. `limit=0` means no cap.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}
