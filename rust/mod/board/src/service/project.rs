use taskhub_core::{ServiceError, new_id, non_blank};

use crate::model::{CreateProjectRequest, Project};
use crate::service::BoardService;

fn require_name(req: &CreateProjectRequest) -> Result<(), ServiceError> {
    if non_blank(Some(&req.name)).is_none() {
        return Err(ServiceError::Validation("name is required".into()));
    }
    Ok(())
}

impl BoardService {
    pub async fn list_projects(&self) -> Result<Vec<Project>, ServiceError> {
        self.projects.find_all().await
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, ServiceError> {
        self.projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("project '{id}' not found")))
    }

    pub async fn create_project(&self, req: CreateProjectRequest) -> Result<Project, ServiceError> {
        require_name(&req)?;
        self.projects
            .insert(Project {
                id: new_id(),
                name: req.name,
                description: req.description.unwrap_or_default(),
            })
            .await
    }

    /// Full replace, keeping the id.
    pub async fn update_project(
        &self,
        id: &str,
        req: CreateProjectRequest,
    ) -> Result<(), ServiceError> {
        require_name(&req)?;
        let replaced = self
            .projects
            .replace(Project {
                id: id.to_string(),
                name: req.name,
                description: req.description.unwrap_or_default(),
            })
            .await?;
        if !replaced {
            return Err(ServiceError::NotFound(format!("project '{id}' not found")));
        }
        Ok(())
    }

    /// Tasks that referenced the project keep their `project_id`.
    pub async fn delete_project(&self, id: &str) -> Result<(), ServiceError> {
        if !self.projects.delete(id).await? {
            return Err(ServiceError::NotFound(format!("project '{id}' not found")));
        }
        Ok(())
    }
}
