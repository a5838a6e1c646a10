/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - posts / comments service, auth, v2 レスポンス用の設定
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::{CommentService, PostService, auth::AuthService};

#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostService>,
    pub comments: Arc<dyn CommentService>,
    pub auth: Arc<AuthService>,
    pub post_v2_tags: Arc<[String]>,
}

impl AppState {
    pub fn new(
        posts: Arc<dyn PostService>,
        comments: Arc<dyn CommentService>,
        auth: Arc<AuthService>,
        post_v2_tags: Vec<String>,
    ) -> Self {
        Self {
            posts,
            comments,
            auth,
            post_v2_tags: post_v2_tags.into(),
        }
    }

    /// One backing service implementing both traits (Postgres or in-memory).
    pub fn with_blog_service<S>(service: S, auth: Arc<AuthService>, post_v2_tags: Vec<String>) -> Self
    where
        S: PostService + CommentService,
    {
        let shared = Arc::new(service);
        Self::new(shared.clone(), shared, auth, post_v2_tags)
    }
}
