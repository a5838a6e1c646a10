//! API version negotiation for `GET /posts/{post_id}`.
//!
//! Sources, all of which must agree when present:
//! - `X-API-VERSION` header
//! - `version` query parameter
//! - `Accept: application/vnd.javaguides.v2+json` (implies version 2)
//!
//! No source at all selects version 1.

use axum::{
    extract::{FromRequestParts, Query},
    http::{header, request::Parts},
};

use crate::error::AppError;

pub const API_VERSION_HEADER: &str = "x-api-version";
pub const V2_MEDIA_TYPE: &str = "application/vnd.javaguides.v2+json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V1,
    V2,
}

impl ApiVersion {
    fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.trim() {
            "1" => Ok(Self::V1),
            "2" => Ok(Self::V2),
            other => Err(AppError::bad_request(
                "UNSUPPORTED_API_VERSION",
                format!("unsupported api version: {other}"),
            )),
        }
    }
}

/// `query` holds every `version` value of the query string; a repeated
/// parameter counts as several sources.
pub fn negotiate(
    header: Option<&str>,
    query: &[&str],
    accept_v2: bool,
) -> Result<ApiVersion, AppError> {
    let mut requested = Vec::with_capacity(2 + query.len());
    if let Some(raw) = header {
        requested.push(ApiVersion::parse(raw)?);
    }
    for raw in query {
        requested.push(ApiVersion::parse(raw)?);
    }
    if accept_v2 {
        requested.push(ApiVersion::V2);
    }

    match requested.split_first() {
        None => Ok(ApiVersion::V1),
        Some((first, rest)) if rest.iter().all(|v| v == first) => Ok(*first),
        Some(_) => Err(AppError::bad_request(
            "API_VERSION_MISMATCH",
            "api version header, query parameter and Accept disagree",
        )),
    }
}

impl<S> FromRequestParts<S> for ApiVersion
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let from_header = match parts.headers.get(API_VERSION_HEADER) {
            Some(v) => Some(v.to_str().map_err(|_| {
                AppError::bad_request("UNSUPPORTED_API_VERSION", "api version must be ascii")
            })?),
            None => None,
        };

        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri).map_err(
            |rejection| AppError::bad_request("UNSUPPORTED_API_VERSION", rejection.body_text()),
        )?;
        let from_query: Vec<&str> = pairs
            .iter()
            .filter(|(key, _)| key == "version")
            .map(|(_, value)| value.as_str())
            .collect();

        let accept_v2 = parts
            .headers
            .get_all(header::ACCEPT)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .any(|v| v.contains(V2_MEDIA_TYPE));

        negotiate(from_header, &from_query, accept_v2)
    }
}
