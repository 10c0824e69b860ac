//! Request extractors that run declarative validation before a handler.
//!
//! Both report rejections through the JSON error envelope as a 400 with
//! field-level `details`, never axum's plain-text rejections.

use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use taskboard_core::error::CoreError;
use taskboard_core::validation::validate_payload;
use validator::Validate;

use crate::error::AppError;

/// JSON body that has passed its `#[derive(Validate)]` rules.
///
/// Payload fields tolerate wrong JSON types so every rule runs; only a body
/// that is not JSON at all, or not an object, fails here as a single
/// `body` violation.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| CoreError::invalid("body", rejection.body_text()))?;
        validate_payload(&value)?;
        Ok(Self(value))
    }
}

/// Query string that decoded and passed its validation rules.
///
/// A query that cannot be decoded at all, such as a repeated `status` key,
/// is a `query` violation.
#[derive(Debug)]
pub struct ValidQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| CoreError::invalid("query", rejection.body_text()))?;
        validate_payload(&value)?;
        Ok(Self(value))
    }
}
