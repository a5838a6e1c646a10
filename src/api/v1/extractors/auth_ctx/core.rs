use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::AuthCtx;

/// Handler で AuthCtx を受け取るための extractor
/// middleware が AuthCtx を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 (bearer なしのリクエスト)
pub struct AuthCtxExtractor(pub AuthCtx);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or(AppError::Unauthorized)
    }
}

/// ADMIN role を持つ呼び出し元だけを通す extractor
/// - AuthCtx なし: 401
/// - ADMIN なし: 403
pub struct AdminCtx(pub AuthCtx);

impl<S> FromRequestParts<S> for AdminCtx
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthCtxExtractor(ctx) = AuthCtxExtractor::from_request_parts(parts, state).await?;

        if !ctx.is_admin() {
            tracing::warn!(user_id = %ctx.user_id, roles = %ctx.roles, "admin role required");
            return Err(AppError::Forbidden);
        }

        Ok(AdminCtx(ctx))
    }
}
