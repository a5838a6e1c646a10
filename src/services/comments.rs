//! Comment service interface consumed by the `/posts/{post_id}/comments` handlers.
use async_trait::async_trait;

use crate::services::error::ServiceResult;
use crate::services::model::{Comment, NewComment};

/// Business operations over comments nested under a post.
///
/// Every operation fails with `PostNotFound` when `post_id` does not exist.
/// Operations addressing a single comment fail with `CommentNotInPost`
/// when the comment exists under a different post.
#[async_trait]
pub trait CommentService: Send + Sync + 'static {
    async fn create_comment(&self, post_id: i64, comment: NewComment) -> ServiceResult<Comment>;

    async fn get_comments_by_post_id(&self, post_id: i64) -> ServiceResult<Vec<Comment>>;

    async fn get_comment_by_id(&self, post_id: i64, comment_id: i64) -> ServiceResult<Comment>;

    async fn update_comment(
        &self,
        post_id: i64,
        comment_id: i64,
        comment: NewComment,
    ) -> ServiceResult<Comment>;

    async fn delete_comment(&self, post_id: i64, comment_id: i64) -> ServiceResult<()>;
}
