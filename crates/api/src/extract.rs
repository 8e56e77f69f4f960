//! Request extractors that reject with [`AppError`] JSON bodies.
//!
//! Axum's stock `Json`, `Path` and `Query` extractors reject with plain-text
//! bodies; these wrappers keep every failure in the `{ "error": ... }` shape.

use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use quotedesk_core::schema;

use crate::error::AppError;

/// JSON body that has been deserialized *and* schema-validated.
///
/// Validation runs inside the extractor, so a handler taking
/// `ValidatedJson<T>` never acquires a database connection for invalid
/// input: the request short-circuits with a 400 listing every violation.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        schema::check(&value)?;
        Ok(Self(value))
    }
}

/// Path parameters, rejecting malformed ids with a JSON 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Query parameters, rejecting malformed values with a JSON 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
