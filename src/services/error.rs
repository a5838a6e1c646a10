/*
 * Responsibility
 * - service 層が handler に伝えるエラーの意味
 * - HTTP への変換は crate::error (AppError) 側で行う
 */
use thiserror::Error;

use crate::repos::error::RepoError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Post not found with id : {id}")]
    PostNotFound { id: i64 },
    #[error("Comment not found with id : {id}")]
    CommentNotFound { id: i64 },
    #[error("Comment does not belong to post")]
    CommentNotInPost { post_id: i64, comment_id: i64 },
    #[error("a post titled '{title}' already exists")]
    DuplicateTitle { title: String },
    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
