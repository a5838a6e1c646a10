/*
 * Responsibility
 * - query string extractor (一覧のページング用)
 * - 数値でない pageNo などは INVALID_PAGE_REQUEST (400) の JSON error にする
 */
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

pub struct AppQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::try_from_uri(&parts.uri).map_err(|rejection| {
            AppError::bad_request("INVALID_PAGE_REQUEST", rejection.body_text())
        })?;

        Ok(AppQuery(value))
    }
}
