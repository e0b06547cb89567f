//! Server configuration.
//!
//! Built once at startup: defaults, then an optional TOML file, then
//! environment variables. Nothing mutates it afterwards.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use auth::service::{AuthConfig, DEFAULT_JWT_SECRET};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address, e.g. "0.0.0.0:8080".
    pub listen: String,
    pub storage: StorageConfig,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the database file.
    pub data_dir: String,
    /// Database name; the file is `{data_dir}/{database}.redb`.
    pub database: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds.
    pub expire_secs: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Insert demo data when the user collection is empty.
    pub enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8080".to_string(),
            storage: StorageConfig::default(),
            jwt: JwtConfig::default(),
            cors: CorsConfig::default(),
            seed: SeedConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            database: "taskhub".to_string(),
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_JWT_SECRET.to_string(),
            expire_secs: 28800, // 8h
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl ServerConfig {
    /// Load the file (if any), then overlay the process environment.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Overlay environment variables read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("TASKHUB_LISTEN") {
            self.listen = v;
        }
        if let Some(v) = lookup("TASKHUB_DATA_DIR") {
            self.storage.data_dir = v;
        }
        if let Some(v) = lookup("TASKHUB_DATABASE") {
            self.storage.database = v;
        }
        if let Some(v) = lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            self.jwt.secret = v;
        }
        if let Some(v) = lookup("TASKHUB_JWT_EXPIRE_SECS") {
            self.jwt.expire_secs = v
                .trim()
                .parse()
                .with_context(|| format!("TASKHUB_JWT_EXPIRE_SECS: invalid number '{v}'"))?;
        }
        if let Some(v) = lookup("TASKHUB_CORS_ORIGINS") {
            self.cors.allowed_origins = v
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(v) = lookup("TASKHUB_SEED") {
            self.seed.enabled = v
                .trim()
                .parse()
                .with_context(|| format!("TASKHUB_SEED: expected true or false, got '{v}'"))?;
        }
        Ok(())
    }

    /// Path of the redb database file.
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir).join(format!("{}.redb", self.storage.database))
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            jwt_secret: self.jwt.secret.clone(),
            token_ttl_secs: self.jwt.expire_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.jwt.expire_secs, 28800);
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3000"]);
        assert!(config.seed.enabled);
        assert!(config.auth_config().uses_default_secret());
        assert_eq!(config.db_path(), PathBuf::from("./data/taskhub.redb"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taskhub.toml");
        std::fs::write(
            &path,
            r#"
listen = "127.0.0.1:9000"

[jwt]
secret = "from-file"

[seed]
enabled = false
"#,
        )
        .unwrap();

        let config = ServerConfig::from_file(&path).unwrap();
        assert_eq!(config.listen, "127.0.0.1:9000");
        assert_eq!(config.jwt.secret, "from-file");
        assert_eq!(config.jwt.expire_secs, 28800);
        assert_eq!(config.storage.database, "taskhub");
        assert!(!config.seed.enabled);
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = ServerConfig::default();
        config.jwt.secret = "from-file".into();

        config
            .apply_env(env(&[
                ("JWT_SECRET", "from-env"),
                ("TASKHUB_DATA_DIR", "/var/lib/taskhub"),
                ("TASKHUB_DATABASE", "prod"),
                ("TASKHUB_JWT_EXPIRE_SECS", "60"),
                ("TASKHUB_CORS_ORIGINS", "https://a.example, https://b.example,"),
                ("TASKHUB_SEED", "false"),
            ]))
            .unwrap();

        assert_eq!(config.jwt.secret, "from-env");
        assert_eq!(config.jwt.expire_secs, 60);
        assert_eq!(config.db_path(), PathBuf::from("/var/lib/taskhub/prod.redb"));
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert!(!config.seed.enabled);
    }

    #[test]
    fn test_empty_secret_env_is_ignored() {
        let mut config = ServerConfig::default();
        config.apply_env(env(&[("JWT_SECRET", "")])).unwrap();
        assert_eq!(config.jwt.secret, DEFAULT_JWT_SECRET);
    }

    #[test]
    fn test_invalid_env_values_fail() {
        let mut config = ServerConfig::default();
        assert!(
            config
                .apply_env(env(&[("TASKHUB_JWT_EXPIRE_SECS", "soon")]))
                .is_err()
        );
        assert!(config.apply_env(env(&[("TASKHUB_SEED", "yes")])).is_err());
    }
}
