/*
 * Responsibility
 * - comments テーブル向け SQLx 操作
 * - 所属 post のチェックは service 側の責務 (ここでは "postId" を返すだけ)
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    #[sqlx(rename = "commentId")]
    pub comment_id: i64,
    #[sqlx(rename = "postId")]
    pub post_id: i64,

    pub name: String,
    pub email: String,
    pub body: String,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

pub async fn list_by_post(db: &PgPool, post_id: i64) -> RepoResult<Vec<CommentRow>> {
    let rows = sqlx::query_as::<_, CommentRow>(
        r#"
        SELECT "commentId", "postId", name, email, body, "createdAt", "updatedAt"
        FROM comments
        WHERE "postId" = $1
        ORDER BY "commentId" ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

// One round-trip for all comments of a page of posts.
pub async fn list_by_posts(db: &PgPool, post_ids: &[i64]) -> RepoResult<Vec<CommentRow>> {
    if post_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, CommentRow>(
        r#"
        SELECT "commentId", "postId", name, email, body, "createdAt", "updatedAt"
        FROM comments
        WHERE "postId" = ANY($1)
        ORDER BY "commentId" ASC
        "#,
    )
    .bind(post_ids)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn create(
    db: &PgPool,
    post_id: i64,
    name: &str,
    email: &str,
    body: &str,
) -> RepoResult<CommentRow> {
    let row = sqlx::query_as::<_, CommentRow>(
        r#"
        INSERT INTO comments ("postId", name, email, body)
        VALUES ($1, $2, $3, $4)
        RETURNING "commentId", "postId", name, email, body, "createdAt", "updatedAt"
        "#,
    )
    .bind(post_id)
    .bind(name)
    .bind(email)
    .bind(body)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn get(db: &PgPool, comment_id: i64) -> RepoResult<Option<CommentRow>> {
    let row = sqlx::query_as::<_, CommentRow>(
        r#"
        SELECT "commentId", "postId", name, email, body, "createdAt", "updatedAt"
        FROM comments
        WHERE "commentId" = $1
        "#,
    )
    .bind(comment_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    comment_id: i64,
    name: &str,
    email: &str,
    body: &str,
) -> RepoResult<Option<CommentRow>> {
    let row = sqlx::query_as::<_, CommentRow>(
        r#"
        UPDATE comments
        SET
            name = $2,
            email = $3,
            body = $4,
            "updatedAt" = now()
        WHERE "commentId" = $1
        RETURNING "commentId", "postId", name, email, body, "createdAt", "updatedAt"
        "#,
    )
    .bind(comment_id)
    .bind(name)
    .bind(email)
    .bind(body)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, comment_id: i64) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM comments
        WHERE "commentId" = $1
        "#,
    )
    .bind(comment_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
