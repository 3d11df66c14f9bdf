use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use crate::core::error::AppError;
use crate::shared::types::ListQuery;

/// Reads list parameters from the raw query pairs so a repeated key never
/// rejects the request; malformed query strings become a JSON 400.
impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(ListQuery::from_pairs(pairs))
    }
}
