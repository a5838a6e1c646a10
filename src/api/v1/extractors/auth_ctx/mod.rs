/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - 認証済みリクエストのコンテキスト（AuthCtx）を handler に提供する
 * - admin 専用 handler のための AdminCtx (401 / 403 の判定)
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 */

mod core;
mod types;

pub use self::core::{AdminCtx, AuthCtxExtractor};
pub use types::AuthCtx;
