//! Bootstrap: startup checks and first-run demo data.

use tracing::{info, warn};

use auth::service::AuthService;
use board::model::{CreateProjectRequest, CreateTaskRequest, priority, status};
use board::service::BoardService;

use crate::config::ServerConfig;

pub const SEED_USERNAME: &str = "admin";
pub const SEED_EMAIL: &str = "admin@taskmanager.com";
pub const SEED_PASSWORD: &str = "admin123";

/// Refuse to start on a configuration that cannot work.
pub fn verify_config(config: &ServerConfig) -> anyhow::Result<()> {
    if config.jwt.secret.is_empty() {
        anyhow::bail!("JWT secret is empty in configuration.");
    }
    if config.jwt.expire_secs <= 0 {
        anyhow::bail!("jwt.expire_secs must be positive.");
    }
    if config.storage.data_dir.is_empty() {
        anyhow::bail!("Storage data_dir is empty in configuration.");
    }
    if config.auth_config().uses_default_secret() {
        warn!("JWT_SECRET is not set; using the insecure development secret");
    }
    Ok(())
}

/// Insert the demo admin, two projects and two tasks.
///
/// Does nothing when any user exists. Returns whether data was written.
pub async fn seed(auth: &AuthService, board: &BoardService) -> anyhow::Result<bool> {
    if auth.count_users().await? > 0 {
        return Ok(false);
    }

    let admin = auth
        .create_user(SEED_USERNAME, SEED_EMAIL, SEED_PASSWORD)
        .await?;

    let migration = board
        .create_project(CreateProjectRequest {
            name: "Modern stack migration".into(),
            description: Some("Move the legacy frontend and backend onto the new stack".into()),
        })
        .await?;
    board
        .create_project(CreateProjectRequest {
            name: "E-commerce app".into(),
            description: Some("Online store built from small services".into()),
        })
        .await?;

    let tasks = [
        (
            "Set up the database",
            "Create the store and its collections",
            status::DONE,
            priority::HIGH,
        ),
        (
            "Implement user registration",
            "Endpoints and frontend forms",
            status::IN_PROGRESS,
            priority::MEDIUM,
        ),
    ];
    for (title, description, st, pr) in tasks {
        board
            .create_task(CreateTaskRequest {
                title: title.into(),
                description: Some(description.into()),
                status: Some(st.into()),
                priority: Some(pr.into()),
                project_id: Some(migration.id.clone()),
                created_by_user_id: Some(admin.id.clone()),
                ..Default::default()
            })
            .await?;
    }

    info!(admin_id = %admin.id, "seeded demo data");
    Ok(true)
}
