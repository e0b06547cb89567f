use tracing::debug;

use taskhub_core::{ServiceError, new_id, non_blank, now_utc};

use crate::model::{CreateTaskRequest, Task, TaskDto, TaskQuery, priority, status};
use crate::service::BoardService;

fn require_title(req: &CreateTaskRequest) -> Result<(), ServiceError> {
    if non_blank(Some(&req.title)).is_none() {
        return Err(ServiceError::Validation("title is required".into()));
    }
    Ok(())
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Filter value for an exact-match field. A blank value means unset,
/// anything else is compared as given, surrounding whitespace included.
fn exact(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

impl TaskQuery {
    /// Whether a task passes every filter that is set.
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(search) = non_blank(self.search.as_deref()) {
            let needle = search.to_lowercase();
            if !task.title.to_lowercase().contains(&needle)
                && !task.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(s) = exact(self.status.as_deref()) {
            if task.status != s {
                return false;
            }
        }
        if let Some(p) = exact(self.priority.as_deref()) {
            if task.priority != p {
                return false;
            }
        }
        if let Some(pid) = exact(self.project_id.as_deref()) {
            if task.project_id.as_deref() != Some(pid) {
                return false;
            }
        }
        true
    }
}

impl BoardService {
    /// List tasks, keeping those that match every filter set in the query.
    pub async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<TaskDto>, ServiceError> {
        let tasks = self.tasks.find_all().await?;
        Ok(tasks
            .into_iter()
            .filter(|t| query.matches(t))
            .map(TaskDto::from)
            .collect())
    }

    pub async fn get_task(&self, id: &str) -> Result<TaskDto, ServiceError> {
        self.tasks
            .find_by_id(id)
            .await?
            .map(TaskDto::from)
            .ok_or_else(|| ServiceError::NotFound(format!("task '{id}' not found")))
    }

    /// Create a task with a fresh id. Status and priority default to
    /// `new` and `medium`.
    pub async fn create_task(&self, req: CreateTaskRequest) -> Result<TaskDto, ServiceError> {
        require_title(&req)?;

        let now = now_utc();
        let task = Task {
            id: new_id(),
            title: req.title,
            description: req.description.unwrap_or_default(),
            status: or_default(req.status, status::NEW),
            priority: or_default(req.priority, priority::MEDIUM),
            project_id: req.project_id,
            assigned_to_user_id: req.assigned_to_user_id,
            due_date: req.due_date,
            estimated_hours: req.estimated_hours,
            actual_hours: 0.0,
            created_by_user_id: req.created_by_user_id,
            created_at: now,
            updated_at: now,
        };

        let task = self.tasks.insert(task).await?;
        debug!(task_id = %task.id, "task created");
        Ok(task.into())
    }

    /// Replace the mutable fields of a task.
    ///
    /// `id`, `created_at`, `actual_hours` and `created_by_user_id` are kept
    /// from the stored record.
    pub async fn update_task(&self, id: &str, req: CreateTaskRequest) -> Result<(), ServiceError> {
        require_title(&req)?;

        let existing = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("task '{id}' not found")))?;

        let updated = Task {
            id: existing.id,
            title: req.title,
            description: req.description.unwrap_or_default(),
            status: or_default(req.status, status::NEW),
            priority: or_default(req.priority, priority::MEDIUM),
            project_id: req.project_id,
            assigned_to_user_id: req.assigned_to_user_id,
            due_date: req.due_date,
            estimated_hours: req.estimated_hours,
            actual_hours: existing.actual_hours,
            created_by_user_id: existing.created_by_user_id,
            created_at: existing.created_at,
            updated_at: now_utc(),
        };

        // Deleted between the read and the write.
        if !self.tasks.replace(updated).await? {
            return Err(ServiceError::NotFound(format!("task '{id}' not found")));
        }
        Ok(())
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), ServiceError> {
        if !self.tasks.delete(id).await? {
            return Err(ServiceError::NotFound(format!("task '{id}' not found")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_service;

    fn req(title: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            title: title.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let (svc, _dir) = test_service();
        let task = svc.create_task(req("Write docs")).await.unwrap();

        assert_eq!(task.id.len(), 32);
        assert_eq!(task.status, status::NEW);
        assert_eq!(task.priority, priority::MEDIUM);
        assert_eq!(task.description, "");
        assert_eq!(task.actual_hours, 0.0);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[tokio::test]
    async fn test_create_ids_are_distinct() {
        let (svc, _dir) = test_service();
        let a = svc.create_task(req("a")).await.unwrap();
        let b = svc.create_task(req("b")).await.unwrap();
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_create_requires_title() {
        let (svc, _dir) = test_service();
        let err = svc.create_task(req("   ")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(svc.list_tasks(&TaskQuery::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_preserves_immutable_fields() {
        let (svc, _dir) = test_service();
        let created = svc
            .create_task(CreateTaskRequest {
                title: "Original".into(),
                created_by_user_id: Some("u1".into()),
                status: Some(status::BLOCKED.into()),
                ..Default::default()
            })
            .await
            .unwrap();

        svc.update_task(
            &created.id,
            CreateTaskRequest {
                title: "Renamed".into(),
                priority: Some(priority::HIGH.into()),
                created_by_user_id: Some("intruder".into()),
                estimated_hours: 3.5,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let updated = svc.get_task(&created.id).await.unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.priority, priority::HIGH);
        // Absent status falls back to the default, not the old value.
        assert_eq!(updated.status, status::NEW);
        assert_eq!(updated.estimated_hours, 3.5);
        assert_eq!(updated.created_by_user_id.as_deref(), Some("u1"));
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found_and_writes_nothing() {
        let (svc, _dir) = test_service();
        let err = svc.update_task("ghost", req("x")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(svc.list_tasks(&TaskQuery::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_requires_title() {
        let (svc, _dir) = test_service();
        let t = svc.create_task(req("keep")).await.unwrap();
        let err = svc.update_task(&t.id, req("")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(svc.get_task(&t.id).await.unwrap().title, "keep");
    }

    #[tokio::test]
    async fn test_delete() {
        let (svc, _dir) = test_service();
        let t = svc.create_task(req("gone")).await.unwrap();
        svc.delete_task(&t.id).await.unwrap();
        assert!(matches!(
            svc.get_task(&t.id).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            svc.delete_task(&t.id).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_filters_are_conjunctive() {
        let (svc, _dir) = test_service();
        let mk = |title: &str, st: &str, pr: &str, project: Option<&str>| CreateTaskRequest {
            title: title.into(),
            description: Some("shared body".into()),
            status: Some(st.into()),
            priority: Some(pr.into()),
            project_id: project.map(String::from),
            ..Default::default()
        };
        svc.create_task(mk("Fix Login bug", "done", "high", Some("p1"))).await.unwrap();
        svc.create_task(mk("Fix login page", "new", "high", Some("p1"))).await.unwrap();
        svc.create_task(mk("Login audit", "done", "low", Some("p1"))).await.unwrap();
        svc.create_task(mk("Fix login api", "done", "high", Some("p2"))).await.unwrap();

        let query = TaskQuery {
            search: Some("  LOGIN ".into()),
            status: Some("done".into()),
            priority: Some("high".into()),
            project_id: Some("p1".into()),
        };
        let hits = svc.list_tasks(&query).await.unwrap();
        let titles: Vec<_> = hits.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Fix Login bug"]);

        // Dropping any one filter lets exactly one more distractor through.
        let without_status = TaskQuery { status: None, ..query.clone() };
        assert_eq!(svc.list_tasks(&without_status).await.unwrap().len(), 2);
        let without_project = TaskQuery { project_id: None, ..query.clone() };
        assert_eq!(svc.list_tasks(&without_project).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_search_matches_description_and_blank_filters_ignored() {
        let (svc, _dir) = test_service();
        svc.create_task(CreateTaskRequest {
            title: "Plain".into(),
            description: Some("mentions Kanban board".into()),
            ..Default::default()
        })
        .await
        .unwrap();
        svc.create_task(req("Other")).await.unwrap();

        let q = TaskQuery {
            search: Some("kanban".into()),
            status: Some("  ".into()),
            ..Default::default()
        };
        let hits = svc.list_tasks(&q).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Plain");
    }

    #[tokio::test]
    async fn test_exact_filters_are_not_trimmed() {
        let (svc, _dir) = test_service();
        svc.create_task(CreateTaskRequest {
            title: "Shipped".into(),
            status: Some(status::DONE.into()),
            priority: Some(priority::HIGH.into()),
            project_id: Some("p1".into()),
            ..Default::default()
        })
        .await
        .unwrap();

        for query in [
            TaskQuery { status: Some(" done".into()), ..Default::default() },
            TaskQuery { priority: Some("high ".into()), ..Default::default() },
            TaskQuery { project_id: Some(" p1 ".into()), ..Default::default() },
        ] {
            assert!(svc.list_tasks(&query).await.unwrap().is_empty(), "{query:?}");
        }

        let exact = TaskQuery { status: Some("done".into()), ..Default::default() };
        assert_eq!(svc.list_tasks(&exact).await.unwrap().len(), 1);
    }
}
