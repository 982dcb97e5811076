//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::parse_json;

/// JSON body whose validation errors name the offending field.
///
/// Unlike `axum::Json` this does not require a `content-type` header, and
/// schema errors are rendered as `ApiError::Validation`. Body read
/// failures keep their own status, so an oversized body is a 413.
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Body {
                status: e.status(),
                message: e.body_text(),
            })?;

        Ok(Self(parse_json(&bytes)?))
    }
}
