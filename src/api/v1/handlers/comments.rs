/*
 * Responsibility
 * - /posts/{post_id}/comments 系 CRUD handler
 * - Path/Json を extractor で受け、DTO validation → service 呼び出し
 * - post の存在チェックや所属チェックは service 側 (404 / 400 への変換は AppError)
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::comments::{CommentDto, CommentRequest},
        extractors::{AppJson, CommentId, PostId},
    },
    error::{AppError, ErrorResponse},
    state::AppState,
};

pub const COMMENT_DELETED: &str = "Comment Entity Deleted Successfully";

#[utoipa::path(
    post,
    path = "/api/v1/posts/{post_id}/comments",
    params(("post_id" = i64, Path, description = "Post id")),
    request_body = CommentRequest,
    responses(
        (status = CREATED, description = "Comment created", body = CommentDto),
        (status = BAD_REQUEST, description = "Invalid id or comment body", body = ErrorResponse),
        (status = NOT_FOUND, description = "No post with this id", body = ErrorResponse)
    ),
    tag = "comments"
)]
pub async fn create_comment(
    State(state): State<AppState>,
    post_id: PostId,
    AppJson(req): AppJson<CommentRequest>,
) -> Result<(StatusCode, Json<CommentDto>), AppError> {
    req.validate().map_err(AppError::validation)?;

    let comment = state
        .comments
        .create_comment(post_id.id, req.into_new_comment())
        .await?;

    Ok((StatusCode::CREATED, Json(CommentDto::from(comment))))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/{post_id}/comments",
    params(("post_id" = i64, Path, description = "Post id")),
    responses(
        (status = OK, description = "Comments of the post", body = [CommentDto]),
        (status = NOT_FOUND, description = "No post with this id", body = ErrorResponse)
    ),
    tag = "comments"
)]
pub async fn list_comments(
    State(state): State<AppState>,
    post_id: PostId,
) -> Result<Json<Vec<CommentDto>>, AppError> {
    let comments = state.comments.get_comments_by_post_id(post_id.id).await?;

    Ok(Json(comments.into_iter().map(CommentDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/{post_id}/comments/{comment_id}",
    params(
        ("post_id" = i64, Path, description = "Post id"),
        ("comment_id" = i64, Path, description = "Comment id")
    ),
    responses(
        (status = OK, description = "Comment", body = CommentDto),
        (status = BAD_REQUEST, description = "Invalid id or comment of another post", body = ErrorResponse),
        (status = NOT_FOUND, description = "No such post or comment", body = ErrorResponse)
    ),
    tag = "comments"
)]
pub async fn get_comment(
    State(state): State<AppState>,
    post_id: PostId,
    comment_id: CommentId,
) -> Result<Json<CommentDto>, AppError> {
    let comment = state
        .comments
        .get_comment_by_id(post_id.id, comment_id.id)
        .await?;

    Ok(Json(CommentDto::from(comment)))
}

#[utoipa::path(
    put,
    path = "/api/v1/posts/{post_id}/comments/{comment_id}",
    params(
        ("post_id" = i64, Path, description = "Post id"),
        ("comment_id" = i64, Path, description = "Comment id")
    ),
    request_body = CommentRequest,
    responses(
        (status = OK, description = "Comment replaced", body = CommentDto),
        (status = BAD_REQUEST, description = "Invalid body, id or comment of another post", body = ErrorResponse),
        (status = NOT_FOUND, description = "No such post or comment", body = ErrorResponse)
    ),
    tag = "comments"
)]
pub async fn update_comment(
    State(state): State<AppState>,
    post_id: PostId,
    comment_id: CommentId,
    AppJson(req): AppJson<CommentRequest>,
) -> Result<Json<CommentDto>, AppError> {
    req.validate().map_err(AppError::validation)?;

    let comment = state
        .comments
        .update_comment(post_id.id, comment_id.id, req.into_new_comment())
        .await?;

    Ok(Json(CommentDto::from(comment)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/posts/{post_id}/comments/{comment_id}",
    params(
        ("post_id" = i64, Path, description = "Post id"),
        ("comment_id" = i64, Path, description = "Comment id")
    ),
    responses(
        (status = OK, description = "Comment deleted", body = String, content_type = "text/plain"),
        (status = BAD_REQUEST, description = "Invalid id or comment of another post", body = ErrorResponse),
        (status = NOT_FOUND, description = "No such post or comment", body = ErrorResponse)
    ),
    tag = "comments"
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    post_id: PostId,
    comment_id: CommentId,
) -> Result<(StatusCode, &'static str), AppError> {
    state
        .comments
        .delete_comment(post_id.id, comment_id.id)
        .await?;

    Ok((StatusCode::OK, COMMENT_DELETED))
}
