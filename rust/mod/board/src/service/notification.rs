use tracing::debug;

use taskhub_core::{ServiceError, new_id, now_utc};

use crate::model::{Notification, NotificationDto};
use crate::service::BoardService;

impl BoardService {
    /// A user's notifications, newest first.
    pub async fn notifications_for_user(
        &self,
        user_id: &str,
        unread_only: bool,
    ) -> Result<Vec<NotificationDto>, ServiceError> {
        let list = self.notifications.find_by_user(user_id, unread_only).await?;
        Ok(list.into_iter().map(NotificationDto::from).collect())
    }

    /// Create an unread notification. Not reachable over HTTP.
    pub async fn add_notification(
        &self,
        user_id: &str,
        message: &str,
        kind: &str,
    ) -> Result<NotificationDto, ServiceError> {
        let n = Notification {
            id: new_id(),
            user_id: user_id.to_string(),
            message: message.to_string(),
            kind: kind.to_string(),
            read: false,
            created_at: now_utc(),
        };
        Ok(self.notifications.insert(n).await?.into())
    }

    /// Mark every notification of the user read, whatever its current state.
    pub async fn mark_all_read(&self, user_id: &str) -> Result<(), ServiceError> {
        let n = self.notifications.mark_all_read(user_id).await?;
        debug!(user_id, count = n, "notifications marked read");
        Ok(())
    }
}
