/*
 * Responsibility
 *  - Path の文字列 parameter を意味付き ID 型 (PathId<T>) として受け取る
 *  - 失敗時は AppError::bad_request (INVALID_ID) に変換
 *  - posts / comments で共通利用
 *
 * 置くもの
 *  - PathId<T> の定義（ジェネリック本体）
 *  - impl FromRequestParts for PathId<T>
 *
 * 置かないもの
 *  - Post / Comment といった具体リソース名 (types.rs 側)
 */
use std::collections::HashMap;
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

/// Binds a tag type to the name of its route parameter.
pub trait IdParam {
    const PARAM: &'static str;
}

pub struct PathId<T> {
    pub id: i64,
    _marker: PhantomData<T>,
}

impl<T> PathId<T> {
    fn new(id: i64) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for PathId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PathId<T> {}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

impl<T, S> FromRequestParts<S> for PathId<T>
where
    T: IdParam + Send + Sync,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // 同じ request から PostId と CommentId を両方取り出せるよう、名前付きで読む
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request("INVALID_ID", "invalid path parameters"))?;

        let raw = params.get(T::PARAM).ok_or_else(|| {
            tracing::error!(param = T::PARAM, "route does not declare path parameter");
            AppError::Internal
        })?;

        parse_id(raw)
            .map(Self::new)
            .ok_or_else(|| AppError::bad_request("INVALID_ID", format!("invalid {}", T::PARAM)))
    }
}

impl<T> std::fmt::Debug for PathId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathId").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::parse_id;

    #[test]
    fn only_positive_integers_are_ids() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("0"), None);
        assert_eq!(parse_id("-3"), None);
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("99999999999999999999"), None);
    }
}
