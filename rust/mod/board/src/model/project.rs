use serde::{Deserialize, Serialize};

/// A grouping of tasks. Stored and exposed with the same shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Body of `POST /projects` and `PUT /projects/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProjectRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}
