/*
 * Responsibility
 * - JSON body extractor
 * - axum の JsonRejection (欠落/型違い/null/Content-Type 不正) を AppError の JSON body に揃える
 */
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// `Json<T>` と同じだが、rejection は `VALIDATION_FAILED` (400) になる
/// body limit 超過だけは 413 のまま返す
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge;
    }

    tracing::debug!(error = %rejection.body_text(), "json body rejected");
    AppError::validation(rejection.body_text())
}
