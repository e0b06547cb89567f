pub mod auth;
pub mod error;
pub mod extract;
pub mod module;
pub mod types;

pub use auth::{AllowAll, Authenticator, DenyAll, Identity, bearer_token, require_auth};
pub use error::ServiceError;
pub use extract::JsonBody;
pub use module::Module;
pub use types::{new_id, now_utc, non_blank};
