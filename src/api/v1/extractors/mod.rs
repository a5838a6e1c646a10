/*
 * Responsibility
 * - handler が受け取る extractor の公開インターフェース
 */
pub mod auth_ctx;
pub mod body;
pub mod path_id;
pub mod query;

pub use auth_ctx::{AdminCtx, AuthCtx, AuthCtxExtractor};
pub use body::AppJson;
pub use path_id::{CommentId, PostId};
pub use query::AppQuery;
