use std::collections::{BTreeMap, HashMap};

use taskhub_core::ServiceError;

use crate::model::{ProjectTaskCount, UserTaskCount, status};
use crate::service::BoardService;

/// Header row of the task export.
pub const CSV_HEADER: &str = "ID,Title,Status,Priority,Project";

/// Project column for tasks whose project does not exist.
pub const NO_PROJECT: &str = "No project";

/// Quote a CSV field, doubling embedded quotes.
pub fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

impl BoardService {
    /// Number of tasks per status. Blank statuses count as `new`.
    pub async fn status_report(&self) -> Result<BTreeMap<String, usize>, ServiceError> {
        let mut counts = BTreeMap::new();
        for task in self.tasks.find_all().await? {
            let key = if task.status.trim().is_empty() {
                status::NEW.to_string()
            } else {
                task.status
            };
            *counts.entry(key).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Every project with the number of tasks that reference it.
    pub async fn project_report(&self) -> Result<Vec<ProjectTaskCount>, ServiceError> {
        let projects = self.projects.find_all().await?;
        let tasks = self.tasks.find_all().await?;

        let mut per_project: HashMap<&str, usize> = HashMap::new();
        for task in &tasks {
            if let Some(pid) = task.project_id.as_deref() {
                *per_project.entry(pid).or_insert(0) += 1;
            }
        }

        Ok(projects
            .into_iter()
            .map(|p| ProjectTaskCount {
                task_count: per_project.get(p.id.as_str()).copied().unwrap_or(0),
                project_name: p.name,
            })
            .collect())
    }

    /// Assigned task count per user. Unassigned tasks are left out.
    pub async fn user_report(&self) -> Result<Vec<UserTaskCount>, ServiceError> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for task in self.tasks.find_all().await? {
            if let Some(uid) = task.assigned_to_user_id.filter(|u| !u.is_empty()) {
                *counts.entry(uid).or_insert(0) += 1;
            }
        }
        Ok(counts
            .into_iter()
            .map(|(user_id, task_count)| UserTaskCount {
                user_id,
                task_count,
            })
            .collect())
    }

    /// All tasks as CSV, one row per task, with the project name resolved.
    pub async fn export_csv(&self) -> Result<String, ServiceError> {
        let tasks = self.tasks.find_all().await?;
        let names: HashMap<String, String> = self
            .projects
            .find_all()
            .await?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();

        let mut out = String::from(CSV_HEADER);
        out.push('\n');
        for t in &tasks {
            let project = t
                .project_id
                .as_ref()
                .and_then(|pid| names.get(pid))
                .map(String::as_str)
                .unwrap_or(NO_PROJECT);
            let row = [
                t.id.as_str(),
                t.title.as_str(),
                t.status.as_str(),
                t.priority.as_str(),
                project,
            ]
            .map(csv_field)
            .join(",");
            out.push_str(&row);
            out.push('\n');
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CreateProjectRequest, CreateTaskRequest};
    use crate::service::test_service;

    /// Split one CSV line, honouring quotes and doubled quotes.
    fn parse_csv_line(line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut chars = line.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '"' => {
                    if in_quotes && chars.peek() == Some(&'"') {
                        current.push('"');
                        chars.next();
                    } else {
                        in_quotes = !in_quotes;
                    }
                }
                ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
                _ => current.push(ch),
            }
        }
        fields.push(current);
        fields
    }

    fn task(title: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            title: title.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_csv_field_doubles_quotes() {
        assert_eq!(csv_field("plain"), "\"plain\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field(""), "\"\"");
    }

    #[tokio::test]
    async fn test_csv_round_trips_quotes_and_commas() {
        let (svc, _dir) = test_service();
        let project = svc
            .create_project(CreateProjectRequest {
                name: "Ops, \"core\"".into(),
                description: None,
            })
            .await
            .unwrap();
        let title = "Fix \"login\", then deploy";
        let with_project = svc
            .create_task(CreateTaskRequest {
                project_id: Some(project.id.clone()),
                ..task(title)
            })
            .await
            .unwrap();
        let orphan = svc
            .create_task(CreateTaskRequest {
                project_id: Some("deleted".into()),
                ..task("orphan")
            })
            .await
            .unwrap();

        let csv = svc.export_csv().await.unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines.len(), 3);

        let row = parse_csv_line(lines[1]);
        assert_eq!(
            row,
            vec![
                with_project.id.as_str(),
                title,
                "new",
                "medium",
                "Ops, \"core\""
            ]
        );
        assert!(lines[1].contains("\"Fix \"\"login\"\", then deploy\""));

        let row = parse_csv_line(lines[2]);
        assert_eq!(row[0], orphan.id);
        assert_eq!(row[4], NO_PROJECT);
    }

    #[tokio::test]
    async fn test_status_report() {
        let (svc, _dir) = test_service();
        svc.create_task(task("a")).await.unwrap();
        svc.create_task(CreateTaskRequest {
            status: Some("done".into()),
            ..task("b")
        })
        .await
        .unwrap();
        svc.create_task(CreateTaskRequest {
            status: Some("done".into()),
            ..task("c")
        })
        .await
        .unwrap();

        let report = svc.status_report().await.unwrap();
        assert_eq!(report.get("new"), Some(&1));
        assert_eq!(report.get("done"), Some(&2));
        assert_eq!(report.len(), 2);
    }

    #[tokio::test]
    async fn test_project_report_includes_empty_projects() {
        let (svc, _dir) = test_service();
        let busy = svc
            .create_project(CreateProjectRequest {
                name: "Busy".into(),
                description: None,
            })
            .await
            .unwrap();
        svc.create_project(CreateProjectRequest {
            name: "Idle".into(),
            description: None,
        })
        .await
        .unwrap();
        for t in ["x", "y"] {
            svc.create_task(CreateTaskRequest {
                project_id: Some(busy.id.clone()),
                ..task(t)
            })
            .await
            .unwrap();
        }
        svc.create_task(task("loose")).await.unwrap();

        let mut report = svc.project_report().await.unwrap();
        report.sort_by(|a, b| a.project_name.cmp(&b.project_name));
        assert_eq!(
            report,
            vec![
                ProjectTaskCount {
                    project_name: "Busy".into(),
                    task_count: 2
                },
                ProjectTaskCount {
                    project_name: "Idle".into(),
                    task_count: 0
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_user_report_skips_unassigned() {
        let (svc, _dir) = test_service();
        for (title, user) in [("a", Some("u1")), ("b", Some("u1")), ("c", Some("u2")), ("d", None)] {
            svc.create_task(CreateTaskRequest {
                assigned_to_user_id: user.map(String::from),
                ..task(title)
            })
            .await
            .unwrap();
        }

        let report = svc.user_report().await.unwrap();
        assert_eq!(
            report,
            vec![
                UserTaskCount {
                    user_id: "u1".into(),
                    task_count: 2
                },
                UserTaskCount {
                    user_id: "u2".into(),
                    task_count: 1
                },
            ]
        );
    }
}
