//! Post service interface consumed by the `/posts` handlers.
use async_trait::async_trait;

use crate::services::error::ServiceResult;
use crate::services::model::{NewPost, Page, PageRequest, Post};

/// Business operations over posts.
///
/// Implementations must be cheap to share (`Arc<dyn PostService>` in `AppState`).
/// Returned posts always carry their comments.
#[async_trait]
pub trait PostService: Send + Sync + 'static {
    // Fails with `DuplicateTitle` when the title is already taken.
    async fn create_post(&self, post: NewPost) -> ServiceResult<Post>;

    async fn get_all_posts(&self, page: PageRequest) -> ServiceResult<Page<Post>>;

    async fn get_post_by_id(&self, id: i64) -> ServiceResult<Post>;

    // Full replace of title/description/content; comments are untouched.
    async fn update_post(&self, id: i64, post: NewPost) -> ServiceResult<Post>;

    // Deleting a post deletes its comments.
    async fn delete_post_by_id(&self, id: i64) -> ServiceResult<()>;
}
