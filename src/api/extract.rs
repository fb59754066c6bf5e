//! Validating JSON extractor.
//!
//! Request bodies pass through two gates before a handler sees them: serde
//! deserialization into the typed request struct (missing or mistyped fields
//! are named in the rejection) and the struct's `validator` rules. Either
//! failure is surfaced as a 422 without touching storage.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::Error;

/// JSON body extractor that rejects invalid payloads with a validation error.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| Error::Validation {
            message: rejection.body_text(),
        })?;

        value.validate().map_err(|errors| Error::Validation {
            message: errors.to_string().replace('\n', "; "),
        })?;

        Ok(Self(value))
    }
}
