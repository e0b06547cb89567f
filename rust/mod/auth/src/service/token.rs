use axum::http::HeaderMap;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use taskhub_core::{Authenticator, Identity, ServiceError, bearer_token, new_id, now_utc};

use crate::model::{Claims, LoginRequest, LoginResponse, User};
use crate::service::{AuthError, AuthService, blocking};
use crate::store_impls::verify_password;

/// The only failure message login ever returns.
const INVALID_CREDENTIALS: &str = "invalid username or password";

impl AuthService {
    /// Issue a signed token for a user, valid for the configured lifetime.
    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let now = now_utc();
        let exp = now + chrono::Duration::seconds(self.config.token_ttl_secs);

        let claims = Claims {
            sub: user.id.clone(),
            name: user.username.clone(),
            email: user.email.clone(),
            jti: new_id(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("JWT encode failed: {}", e)))
    }

    /// Verify and decode a token. Expired tokens are rejected with no leeway.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        validation.validate_exp = true;
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| {
            debug!(error = %e, "token rejected");
            AuthError::Unauthorized("invalid or expired token".into())
        })
    }

    /// Check credentials and issue a token.
    ///
    /// An unknown username and a wrong password fail identically.
    pub async fn login(&self, input: LoginRequest) -> Result<LoginResponse, AuthError> {
        let Some(user) = self.users.find_by_username(&input.username).await? else {
            debug!(username = %input.username, "login failed: unknown user");
            return Err(AuthError::Unauthorized(INVALID_CREDENTIALS.into()));
        };

        let password = input.password;
        let hash = user.password_hash.clone();
        if !blocking(move || verify_password(&password, &hash)).await? {
            debug!(username = %user.username, "login failed: wrong password");
            return Err(AuthError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        let token = self.issue_token(&user)?;
        Ok(LoginResponse {
            token,
            username: user.username,
            user_id: user.id,
        })
    }
}

impl Authenticator for AuthService {
    fn authenticate(&self, headers: &HeaderMap) -> Result<Identity, ServiceError> {
        let token = bearer_token(headers)
            .ok_or_else(|| ServiceError::Unauthorized("missing bearer token".into()))?;
        let claims = self.verify_token(token)?;
        Ok(Identity {
            user_id: claims.sub,
            username: claims.name,
            email: claims.email,
        })
    }
}
