/*
 * Responsibility
 * - PostService / CommentService の in-memory 実装
 * - DATABASE_URL 未設定の開発起動と、tests/ の router テストで使う
 * - 業務ルール (存在・所属・title 一意) は Postgres 実装と同じ結果を返す
 */
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::services::{
    comments::CommentService,
    error::{ServiceError, ServiceResult},
    model::{Comment, NewComment, NewPost, Page, PageRequest, Post, SortDirection, SortField},
    posts::PostService,
};

#[derive(Debug, Clone)]
struct PostRecord {
    id: i64,
    title: String,
    description: String,
    content: String,
}

#[derive(Debug, Default)]
struct Store {
    posts: BTreeMap<i64, PostRecord>,
    comments: BTreeMap<i64, Comment>,
    last_post_id: i64,
    last_comment_id: i64,
}

impl Store {
    fn comments_of(&self, post_id: i64) -> Vec<Comment> {
        self.comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect()
    }

    fn to_post(&self, record: &PostRecord) -> Post {
        Post {
            id: record.id,
            title: record.title.clone(),
            description: record.description.clone(),
            content: record.content.clone(),
            comments: self.comments_of(record.id),
        }
    }

    fn title_taken(&self, title: &str, except: Option<i64>) -> bool {
        self.posts
            .values()
            .any(|p| p.title == title && Some(p.id) != except)
    }

    fn ensure_post(&self, post_id: i64) -> ServiceResult<()> {
        if self.posts.contains_key(&post_id) {
            Ok(())
        } else {
            Err(ServiceError::PostNotFound { id: post_id })
        }
    }

    fn owned_comment(&self, post_id: i64, comment_id: i64) -> ServiceResult<&Comment> {
        self.ensure_post(post_id)?;

        let comment = self
            .comments
            .get(&comment_id)
            .ok_or(ServiceError::CommentNotFound { id: comment_id })?;

        if comment.post_id != post_id {
            return Err(ServiceError::CommentNotInPost {
                post_id,
                comment_id,
            });
        }

        Ok(comment)
    }
}

fn compare(a: &PostRecord, b: &PostRecord, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Title => a.title.cmp(&b.title),
        SortField::Description => a.description.cmp(&b.description),
        SortField::Content => a.content.cmp(&b.content),
    }
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryBlogService {
    store: Arc<RwLock<Store>>,
}

impl InMemoryBlogService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostService for InMemoryBlogService {
    async fn create_post(&self, post: NewPost) -> ServiceResult<Post> {
        let mut store = self.store.write().await;
        if store.title_taken(&post.title, None) {
            return Err(ServiceError::DuplicateTitle { title: post.title });
        }

        store.last_post_id += 1;
        let record = PostRecord {
            id: store.last_post_id,
            title: post.title,
            description: post.description,
            content: post.content,
        };
        store.posts.insert(record.id, record.clone());

        tracing::info!(post_id = record.id, "post created");
        Ok(store.to_post(&record))
    }

    async fn get_all_posts(&self, page: PageRequest) -> ServiceResult<Page<Post>> {
        let store = self.store.read().await;

        let mut records: Vec<&PostRecord> = store.posts.values().collect();
        records.sort_by(|a, b| {
            let ord = compare(a, b, page.sort_by);
            let ord = match page.sort_dir {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            };
            ord.then(a.id.cmp(&b.id))
        });

        let total = records.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let content = records
            .into_iter()
            .skip(offset)
            .take(page.page_size as usize)
            .map(|r| store.to_post(r))
            .collect();

        Ok(Page::new(content, &page, total))
    }

    async fn get_post_by_id(&self, id: i64) -> ServiceResult<Post> {
        let store = self.store.read().await;
        let record = store
            .posts
            .get(&id)
            .ok_or(ServiceError::PostNotFound { id })?;

        Ok(store.to_post(record))
    }

    async fn update_post(&self, id: i64, post: NewPost) -> ServiceResult<Post> {
        let mut store = self.store.write().await;
        store.ensure_post(id)?;
        if store.title_taken(&post.title, Some(id)) {
            return Err(ServiceError::DuplicateTitle { title: post.title });
        }

        let record = PostRecord {
            id,
            title: post.title,
            description: post.description,
            content: post.content,
        };
        store.posts.insert(id, record.clone());

        Ok(store.to_post(&record))
    }

    async fn delete_post_by_id(&self, id: i64) -> ServiceResult<()> {
        let mut store = self.store.write().await;
        if store.posts.remove(&id).is_none() {
            return Err(ServiceError::PostNotFound { id });
        }
        store.comments.retain(|_, c| c.post_id != id);

        tracing::info!(post_id = id, "post deleted");
        Ok(())
    }
}

#[async_trait]
impl CommentService for InMemoryBlogService {
    async fn create_comment(&self, post_id: i64, comment: NewComment) -> ServiceResult<Comment> {
        let mut store = self.store.write().await;
        store.ensure_post(post_id)?;

        store.last_comment_id += 1;
        let created = Comment {
            id: store.last_comment_id,
            post_id,
            name: comment.name,
            email: comment.email,
            body: comment.body,
        };
        store.comments.insert(created.id, created.clone());

        Ok(created)
    }

    async fn get_comments_by_post_id(&self, post_id: i64) -> ServiceResult<Vec<Comment>> {
        let store = self.store.read().await;
        store.ensure_post(post_id)?;

        Ok(store.comments_of(post_id))
    }

    async fn get_comment_by_id(&self, post_id: i64, comment_id: i64) -> ServiceResult<Comment> {
        let store = self.store.read().await;
        store.owned_comment(post_id, comment_id).cloned()
    }

    async fn update_comment(
        &self,
        post_id: i64,
        comment_id: i64,
        comment: NewComment,
    ) -> ServiceResult<Comment> {
        let mut store = self.store.write().await;
        store.owned_comment(post_id, comment_id)?;

        let updated = Comment {
            id: comment_id,
            post_id,
            name: comment.name,
            email: comment.email,
            body: comment.body,
        };
        store.comments.insert(comment_id, updated.clone());

        Ok(updated)
    }

    async fn delete_comment(&self, post_id: i64, comment_id: i64) -> ServiceResult<()> {
        let mut store = self.store.write().await;
        store.owned_comment(post_id, comment_id)?;
        store.comments.remove(&comment_id);

        Ok(())
    }
}
