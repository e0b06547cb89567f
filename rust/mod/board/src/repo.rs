//! One repository per collection. Each is the only code that touches its
//! collection; ordering rules live here too.

use std::sync::Arc;

use taskhub_core::ServiceError;
use taskhub_kv::KVStore;
use taskhub_store::Collection;

use crate::model::{Comment, HistoryEntry, Notification, Project, Task};

// ── Tasks ──

#[derive(Clone)]
pub struct TaskRepository {
    tasks: Collection<Task>,
}

impl TaskRepository {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self {
            tasks: Collection::new(kv),
        }
    }

    /// All tasks, oldest first.
    pub async fn find_all(&self) -> Result<Vec<Task>, ServiceError> {
        let mut tasks = self.tasks.find_all().await?;
        tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(tasks)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Task>, ServiceError> {
        self.tasks.find_by_id(id).await
    }

    pub async fn insert(&self, task: Task) -> Result<Task, ServiceError> {
        self.tasks.insert(task).await
    }

    /// Returns false when the task does not exist.
    pub async fn replace(&self, task: Task) -> Result<bool, ServiceError> {
        self.tasks.replace(task).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        self.tasks.delete(id).await
    }
}

// ── Projects ──

#[derive(Clone)]
pub struct ProjectRepository {
    projects: Collection<Project>,
}

impl ProjectRepository {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self {
            projects: Collection::new(kv),
        }
    }

    pub async fn find_all(&self) -> Result<Vec<Project>, ServiceError> {
        self.projects.find_all().await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Project>, ServiceError> {
        self.projects.find_by_id(id).await
    }

    pub async fn insert(&self, project: Project) -> Result<Project, ServiceError> {
        self.projects.insert(project).await
    }

    pub async fn replace(&self, project: Project) -> Result<bool, ServiceError> {
        self.projects.replace(project).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        self.projects.delete(id).await
    }
}

// ── Comments ──

#[derive(Clone)]
pub struct CommentRepository {
    comments: Collection<Comment>,
}

impl CommentRepository {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self {
            comments: Collection::new(kv),
        }
    }

    /// Comments on one task, oldest first.
    pub async fn find_by_task(&self, task_id: &str) -> Result<Vec<Comment>, ServiceError> {
        let task_id = task_id.to_string();
        let mut comments = self.comments.find_where(move |c| c.task_id == task_id).await?;
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    pub async fn insert(&self, comment: Comment) -> Result<Comment, ServiceError> {
        self.comments.insert(comment).await
    }
}

// ── History ──

#[derive(Clone)]
pub struct HistoryRepository {
    history: Collection<HistoryEntry>,
}

impl HistoryRepository {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self {
            history: Collection::new(kv),
        }
    }

    /// Entries for one task, newest first.
    pub async fn find_by_task(&self, task_id: &str) -> Result<Vec<HistoryEntry>, ServiceError> {
        let task_id = task_id.to_string();
        let mut entries = self.history.find_where(move |h| h.task_id == task_id).await?;
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    /// Newest entries across all tasks. A limit of 0 returns everything.
    pub async fn find_recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, ServiceError> {
        let mut entries = self.history.find_all().await?;
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        if limit > 0 {
            entries.truncate(limit);
        }
        Ok(entries)
    }

    pub async fn insert(&self, entry: HistoryEntry) -> Result<HistoryEntry, ServiceError> {
        self.history.insert(entry).await
    }
}

// ── Notifications ──

#[derive(Clone)]
pub struct NotificationRepository {
    notifications: Collection<Notification>,
}

impl NotificationRepository {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self {
            notifications: Collection::new(kv),
        }
    }

    /// A user's notifications, newest first.
    pub async fn find_by_user(
        &self,
        user_id: &str,
        unread_only: bool,
    ) -> Result<Vec<Notification>, ServiceError> {
        let user_id = user_id.to_string();
        let mut list = self
            .notifications
            .find_where(move |n| n.user_id == user_id && (!unread_only || !n.read))
            .await?;
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    pub async fn insert(&self, notification: Notification) -> Result<Notification, ServiceError> {
        self.notifications.insert(notification).await
    }

    /// Set `read` on every notification of the user. Returns how many were written.
    pub async fn mark_all_read(&self, user_id: &str) -> Result<usize, ServiceError> {
        let user_id = user_id.to_string();
        self.notifications
            .update_where(move |n| n.user_id == user_id, |n| n.read = true)
            .await
    }
}
