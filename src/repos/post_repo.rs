/*
 * Responsibility
 * - posts CRUD
 * - comments は "postId" の FK (CASCADE) 前提で削除挙動を意識
 * - title の一意制約違反は RepoError::Conflict で返す
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::repos::error::{RepoError, RepoResult};
use crate::services::model::PageRequest;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRow {
    #[sqlx(rename = "postId")]
    pub post_id: i64,

    pub title: String,
    pub description: String,
    pub content: String,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

pub async fn list(pool: &PgPool, page: &PageRequest) -> RepoResult<Vec<PostRow>> {
    // ORDER BY には bind が使えないので、whitelist 済みの列名だけを埋め込む
    let sql = format!(
        r#"
        SELECT
            "postId", title, description, content, "createdAt", "updatedAt"
        FROM posts
        ORDER BY {} {}, "postId" ASC
        LIMIT $1 OFFSET $2
        "#,
        page.sort_by.column(),
        page.sort_dir.keyword(),
    );

    let rows = sqlx::query_as::<_, PostRow>(&sql)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

pub async fn count(pool: &PgPool) -> RepoResult<i64> {
    let total = sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM posts"#)
        .fetch_one(pool)
        .await?;

    Ok(total)
}

pub async fn create(
    pool: &PgPool,
    title: &str,
    description: &str,
    content: &str,
) -> RepoResult<PostRow> {
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        INSERT INTO posts (title, description, content)
        VALUES ($1, $2, $3)
        RETURNING
            "postId", title, description, content, "createdAt", "updatedAt"
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(content)
    .fetch_one(pool)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn get(pool: &PgPool, post_id: i64) -> RepoResult<Option<PostRow>> {
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT
            "postId", title, description, content, "createdAt", "updatedAt"
        FROM posts
        WHERE "postId" = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn exists(pool: &PgPool, post_id: i64) -> RepoResult<bool> {
    let found = sqlx::query_scalar::<_, bool>(
        r#"SELECT EXISTS (SELECT 1 FROM posts WHERE "postId" = $1)"#,
    )
    .bind(post_id)
    .fetch_one(pool)
    .await?;

    Ok(found)
}

pub async fn update(
    pool: &PgPool,
    post_id: i64,
    title: &str,
    description: &str,
    content: &str,
) -> RepoResult<Option<PostRow>> {
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        UPDATE posts
        SET
            title = $2,
            description = $3,
            content = $4,
            "updatedAt" = now()
        WHERE "postId" = $1
        RETURNING
            "postId", title, description, content, "createdAt", "updatedAt"
        "#,
    )
    .bind(post_id)
    .bind(title)
    .bind(description)
    .bind(content)
    .fetch_optional(pool)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn delete(pool: &PgPool, post_id: i64) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM posts
        WHERE "postId" = $1
        "#,
    )
    .bind(post_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
