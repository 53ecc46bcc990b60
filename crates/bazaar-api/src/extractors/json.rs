//! JSON body extractor that also runs `validator` rules.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use bazaar_core::error::AppError;

use crate::error::ApiError;

/// Like [`axum::Json`], but rejects with `BadRequest` for an unreadable body
/// and `InvalidInput` for a body failing its `Validate` rules.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
        value
            .validate()
            .map_err(|e| AppError::invalid_input(e.to_string()))?;
        Ok(ValidatedJson(value))
    }
}
