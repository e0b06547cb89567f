use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on a task. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub task_id: String,
    pub user_id: String,
    pub comment_text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: String,
    pub task_id: String,
    pub user_id: String,
    pub comment_text: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentDto {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            task_id: c.task_id,
            user_id: c.user_id,
            comment_text: c.comment_text,
            created_at: c.created_at,
        }
    }
}

/// Body of `POST /comments`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    #[serde(default)]
    pub task_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub comment_text: String,
}
