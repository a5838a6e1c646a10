/*
 * Responsibility
 * - handler から呼ばれる service 層の公開インターフェース
 * - 永続化の実装 (Postgres / in-memory) は trait の裏に隠す
 */
pub mod auth;
pub mod comments;
pub mod error;
pub mod memory;
pub mod model;
pub mod pg;
pub mod posts;

pub use comments::CommentService;
pub use error::{ServiceError, ServiceResult};
pub use memory::InMemoryBlogService;
pub use pg::PgBlogService;
pub use posts::PostService;
