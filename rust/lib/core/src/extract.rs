//! Request extractors that report failures as [`ServiceError`].

use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::ServiceError;

/// JSON request body.
///
/// Same as `axum::Json` on the way in, but a missing content type,
/// malformed JSON or a field of the wrong type is rejected with
/// `400 VALIDATION_FAILED` and the usual `{code, message}` body.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
