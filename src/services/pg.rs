/*
 * Responsibility
 * - PostService / CommentService の Postgres 実装
 * - repo (行) → ドメインモデルへの変換
 * - 存在チェック・所属チェックなどの業務ルールはここで判定する
 */
use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::repos::{
    comment_repo::{self, CommentRow},
    error::RepoError,
    post_repo::{self, PostRow},
};
use crate::services::{
    comments::CommentService,
    error::{ServiceError, ServiceResult},
    model::{Comment, NewComment, NewPost, Page, PageRequest, Post},
    posts::PostService,
};

#[derive(Clone, Debug)]
pub struct PgBlogService {
    db: PgPool,
}

impl PgBlogService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn ensure_post(&self, post_id: i64) -> ServiceResult<()> {
        if post_repo::exists(&self.db, post_id).await? {
            Ok(())
        } else {
            Err(ServiceError::PostNotFound { id: post_id })
        }
    }

    // post の存在 → comment の存在 → 所属 の順で判定する
    async fn owned_comment(&self, post_id: i64, comment_id: i64) -> ServiceResult<CommentRow> {
        self.ensure_post(post_id).await?;

        let row = comment_repo::get(&self.db, comment_id)
            .await?
            .ok_or(ServiceError::CommentNotFound { id: comment_id })?;

        if row.post_id != post_id {
            return Err(ServiceError::CommentNotInPost {
                post_id,
                comment_id,
            });
        }

        Ok(row)
    }
}

fn comment_from_row(row: CommentRow) -> Comment {
    Comment {
        id: row.comment_id,
        post_id: row.post_id,
        name: row.name,
        email: row.email,
        body: row.body,
    }
}

fn post_from_row(row: PostRow, comments: Vec<Comment>) -> Post {
    Post {
        id: row.post_id,
        title: row.title,
        description: row.description,
        content: row.content,
        comments,
    }
}

fn duplicate_title(title: &str) -> impl FnOnce(RepoError) -> ServiceError + '_ {
    move |e| match e {
        RepoError::Conflict => ServiceError::DuplicateTitle {
            title: title.to_string(),
        },
        other => ServiceError::Repo(other),
    }
}

#[async_trait]
impl PostService for PgBlogService {
    async fn create_post(&self, post: NewPost) -> ServiceResult<Post> {
        let row = post_repo::create(&self.db, &post.title, &post.description, &post.content)
            .await
            .map_err(duplicate_title(&post.title))?;

        tracing::info!(post_id = row.post_id, "post created");
        Ok(post_from_row(row, Vec::new()))
    }

    async fn get_all_posts(&self, page: PageRequest) -> ServiceResult<Page<Post>> {
        let total = post_repo::count(&self.db).await?;
        let rows = post_repo::list(&self.db, &page).await?;

        let ids: Vec<i64> = rows.iter().map(|r| r.post_id).collect();
        let mut by_post: HashMap<i64, Vec<Comment>> = HashMap::new();
        for row in comment_repo::list_by_posts(&self.db, &ids).await? {
            by_post
                .entry(row.post_id)
                .or_default()
                .push(comment_from_row(row));
        }

        let posts = rows
            .into_iter()
            .map(|row| {
                let comments = by_post.remove(&row.post_id).unwrap_or_default();
                post_from_row(row, comments)
            })
            .collect();

        Ok(Page::new(posts, &page, u64::try_from(total).unwrap_or(0)))
    }

    async fn get_post_by_id(&self, id: i64) -> ServiceResult<Post> {
        let row = post_repo::get(&self.db, id)
            .await?
            .ok_or(ServiceError::PostNotFound { id })?;

        let comments = comment_repo::list_by_post(&self.db, id)
            .await?
            .into_iter()
            .map(comment_from_row)
            .collect();

        Ok(post_from_row(row, comments))
    }

    async fn update_post(&self, id: i64, post: NewPost) -> ServiceResult<Post> {
        let row = post_repo::update(
            &self.db,
            id,
            &post.title,
            &post.description,
            &post.content,
        )
        .await
        .map_err(duplicate_title(&post.title))?
        .ok_or(ServiceError::PostNotFound { id })?;

        let comments = comment_repo::list_by_post(&self.db, id)
            .await?
            .into_iter()
            .map(comment_from_row)
            .collect();

        Ok(post_from_row(row, comments))
    }

    async fn delete_post_by_id(&self, id: i64) -> ServiceResult<()> {
        if !post_repo::delete(&self.db, id).await? {
            return Err(ServiceError::PostNotFound { id });
        }

        tracing::info!(post_id = id, "post deleted");
        Ok(())
    }
}

#[async_trait]
impl CommentService for PgBlogService {
    async fn create_comment(&self, post_id: i64, comment: NewComment) -> ServiceResult<Comment> {
        self.ensure_post(post_id).await?;

        let row = comment_repo::create(
            &self.db,
            post_id,
            &comment.name,
            &comment.email,
            &comment.body,
        )
        .await?;

        Ok(comment_from_row(row))
    }

    async fn get_comments_by_post_id(&self, post_id: i64) -> ServiceResult<Vec<Comment>> {
        self.ensure_post(post_id).await?;

        let rows = comment_repo::list_by_post(&self.db, post_id).await?;
        Ok(rows.into_iter().map(comment_from_row).collect())
    }

    async fn get_comment_by_id(&self, post_id: i64, comment_id: i64) -> ServiceResult<Comment> {
        let row = self.owned_comment(post_id, comment_id).await?;
        Ok(comment_from_row(row))
    }

    async fn update_comment(
        &self,
        post_id: i64,
        comment_id: i64,
        comment: NewComment,
    ) -> ServiceResult<Comment> {
        self.owned_comment(post_id, comment_id).await?;

        let row = comment_repo::update(
            &self.db,
            comment_id,
            &comment.name,
            &comment.email,
            &comment.body,
        )
        .await?
        .ok_or(ServiceError::CommentNotFound { id: comment_id })?;

        Ok(comment_from_row(row))
    }

    async fn delete_comment(&self, post_id: i64, comment_id: i64) -> ServiceResult<()> {
        self.owned_comment(post_id, comment_id).await?;

        if !comment_repo::delete(&self.db, comment_id).await? {
            return Err(ServiceError::CommentNotFound { id: comment_id });
        }

        Ok(())
    }
}
