use taskhub_core::{ServiceError, new_id, non_blank, now_utc};

use crate::model::{AddCommentRequest, Comment, CommentDto};
use crate::service::BoardService;

impl BoardService {
    /// Comments on a task, oldest first.
    pub async fn comments_for_task(&self, task_id: &str) -> Result<Vec<CommentDto>, ServiceError> {
        let comments = self.comments.find_by_task(task_id).await?;
        Ok(comments.into_iter().map(CommentDto::from).collect())
    }

    /// The task is not checked for existence.
    pub async fn add_comment(&self, req: AddCommentRequest) -> Result<CommentDto, ServiceError> {
        if non_blank(Some(&req.task_id)).is_none() {
            return Err(ServiceError::Validation("taskId is required".into()));
        }
        if non_blank(Some(&req.comment_text)).is_none() {
            return Err(ServiceError::Validation("commentText must not be empty".into()));
        }

        let comment = Comment {
            id: new_id(),
            task_id: req.task_id,
            user_id: req.user_id,
            comment_text: req.comment_text,
            created_at: now_utc(),
        };
        Ok(self.comments.insert(comment).await?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_service;

    fn req(task_id: &str, text: &str) -> AddCommentRequest {
        AddCommentRequest {
            task_id: task_id.into(),
            user_id: "u1".into(),
            comment_text: text.into(),
        }
    }

    #[tokio::test]
    async fn test_comments_listed_oldest_first_per_task() {
        let (svc, _dir) = test_service();
        svc.add_comment(req("t1", "first")).await.unwrap();
        svc.add_comment(req("t2", "elsewhere")).await.unwrap();
        svc.add_comment(req("t1", "second")).await.unwrap();
        svc.add_comment(req("t1", "third")).await.unwrap();

        let texts: Vec<_> = svc
            .comments_for_task("t1")
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.comment_text)
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_required_fields() {
        let (svc, _dir) = test_service();
        assert!(matches!(
            svc.add_comment(req("", "text")).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            svc.add_comment(req("t1", "  ")).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(svc.comments_for_task("t1").await.unwrap().is_empty());
    }
}
