pub mod comment;
pub mod history;
pub mod notification;
pub mod project;
pub mod report;
pub mod task;

use std::sync::Arc;

use taskhub_kv::KVStore;

use crate::repo::{
    CommentRepository, HistoryRepository, NotificationRepository, ProjectRepository,
    TaskRepository,
};

/// The Board service. Maps records to DTOs and applies the task rules.
pub struct BoardService {
    pub(crate) tasks: TaskRepository,
    pub(crate) projects: ProjectRepository,
    pub(crate) comments: CommentRepository,
    pub(crate) history: HistoryRepository,
    pub(crate) notifications: NotificationRepository,
}

impl BoardService {
    pub fn new(kv: Arc<dyn KVStore>) -> Arc<Self> {
        Arc::new(Self {
            tasks: TaskRepository::new(Arc::clone(&kv)),
            projects: ProjectRepository::new(Arc::clone(&kv)),
            comments: CommentRepository::new(Arc::clone(&kv)),
            history: HistoryRepository::new(Arc::clone(&kv)),
            notifications: NotificationRepository::new(kv),
        })
    }
}

#[cfg(test)]
pub(crate) fn test_service() -> (Arc<BoardService>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let kv: Arc<dyn KVStore> =
        Arc::new(taskhub_kv::RedbStore::open(&dir.path().join("board.redb")).unwrap());
    (BoardService::new(kv), dir)
}
