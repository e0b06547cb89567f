use taskhub_core::{ServiceError, new_id, now_utc};

use crate::model::{HistoryEntry, HistoryEntryDto, NewHistoryEntry};
use crate::service::BoardService;

impl BoardService {
    /// History of one task, newest first.
    pub async fn history_for_task(
        &self,
        task_id: &str,
    ) -> Result<Vec<HistoryEntryDto>, ServiceError> {
        let entries = self.history.find_by_task(task_id).await?;
        Ok(entries.into_iter().map(HistoryEntryDto::from).collect())
    }

    /// Newest entries across all tasks, at most `limit` of them. 0 means all.
    pub async fn recent_history(&self, limit: usize) -> Result<Vec<HistoryEntryDto>, ServiceError> {
        let entries = self.history.find_recent(limit).await?;
        Ok(entries.into_iter().map(HistoryEntryDto::from).collect())
    }

    /// Append an audit entry. Nothing in the task flow calls this on its own.
    pub async fn add_history_entry(
        &self,
        entry: NewHistoryEntry,
    ) -> Result<HistoryEntryDto, ServiceError> {
        let entry = HistoryEntry {
            id: new_id(),
            task_id: entry.task_id,
            user_id: entry.user_id,
            action: entry.action,
            old_value: entry.old_value,
            new_value: entry.new_value,
            timestamp: now_utc(),
        };
        Ok(self.history.insert(entry).await?.into())
    }
}
