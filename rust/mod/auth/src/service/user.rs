use taskhub_core::{new_id, non_blank, now_utc};
use tracing::info;

use crate::model::{RegisterRequest, User, UserSummary};
use crate::service::{AuthError, AuthService, blocking};
use crate::store_impls::hash_password;

impl AuthService {
    /// Register a new account.
    ///
    /// Rejects the request when the username or the email is already in use.
    /// The token is not returned; the caller logs in separately.
    pub async fn register(&self, input: RegisterRequest) -> Result<User, AuthError> {
        let (Some(_), Some(_), Some(_)) = (
            non_blank(Some(&input.username)),
            non_blank(Some(&input.email)),
            non_blank(Some(&input.password)),
        ) else {
            return Err(AuthError::Validation(
                "username, email and password are required".into(),
            ));
        };

        if self.users.find_by_username(&input.username).await?.is_some() {
            return Err(AuthError::Conflict("username already exists".into()));
        }
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(AuthError::Conflict("email already exists".into()));
        }

        let password = input.password;
        let password_hash = blocking(move || hash_password(&password))
            .await?
            .map_err(AuthError::Internal)?;

        let user = User {
            id: new_id(),
            username: input.username,
            email: input.email,
            password_hash,
            created_at: now_utc(),
        };

        // The unique index also catches a concurrent registration of the same name.
        let user = self.users.insert(user).await?;
        info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    /// Register from plain credentials. Used by seeding.
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        self.register(RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
    }

    /// All users as `{id, username}`.
    pub async fn list_users(&self) -> Result<Vec<UserSummary>, AuthError> {
        let users = self.users.find_all().await?;
        Ok(users.into_iter().map(UserSummary::from).collect())
    }

    pub async fn count_users(&self) -> Result<usize, AuthError> {
        Ok(self.users.count().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{AuthConfig, test_service};
    use crate::store_impls::verify_password;

    fn req(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_register_stores_hash() {
        let (svc, _dir) = test_service(AuthConfig::default());

        let user = svc.register(req("alice", "alice@example.com", "pw1")).await.unwrap();
        assert_eq!(user.id.len(), 32);
        assert_ne!(user.password_hash, "pw1");
        assert!(verify_password("pw1", &user.password_hash));

        let fetched = svc.users.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(fetched.id, user.id);
        assert_eq!(fetched.email, "alice@example.com");
        assert_eq!(svc.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected_regardless_of_password() {
        let (svc, _dir) = test_service(AuthConfig::default());
        svc.register(req("bob", "bob@example.com", "one")).await.unwrap();

        let err = svc
            .register(req("bob", "other@example.com", "two"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Conflict(_)));
        assert_eq!(svc.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let (svc, _dir) = test_service(AuthConfig::default());
        svc.register(req("carol", "shared@example.com", "pw")).await.unwrap();

        let err = svc
            .register(req("dave", "shared@example.com", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Conflict(ref m) if m.contains("email")));
    }

    #[tokio::test]
    async fn test_username_match_is_case_sensitive() {
        let (svc, _dir) = test_service(AuthConfig::default());
        svc.register(req("erin", "erin@example.com", "pw")).await.unwrap();
        svc.register(req("Erin", "erin2@example.com", "pw")).await.unwrap();
        assert_eq!(svc.count_users().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_blank_fields_rejected() {
        let (svc, _dir) = test_service(AuthConfig::default());
        let err = svc.register(req("  ", "x@example.com", "pw")).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
        let err = svc.register(req("frank", "f@example.com", "")).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
        assert_eq!(svc.count_users().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_users_hides_credentials() {
        let (svc, _dir) = test_service(AuthConfig::default());
        let user = svc.register(req("gina", "gina@example.com", "pw")).await.unwrap();

        let list = svc.list_users().await.unwrap();
        assert_eq!(
            list,
            vec![UserSummary {
                id: user.id,
                username: "gina".into()
            }]
        );
    }
}
