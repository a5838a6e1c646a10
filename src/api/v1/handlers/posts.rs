/*
 * Responsibility
 * - /posts 系 CRUD handler
 * - Path の {post_id} は extractor (PostId) で内部 ID として受け取る
 * - 作成・更新・削除は AdminCtx (ADMIN role) を要求する
 * - GET /posts/{post_id} は ApiVersion によって v1 / v2 の形状を返し分ける
 */
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    api::v1::{
        dto::posts::{PostDto, PostListQuery, PostPageDto, PostRequest, PostV2Dto},
        extractors::{AdminCtx, AppJson, AppQuery, PostId},
        version::{ApiVersion, V2_MEDIA_TYPE},
    },
    error::{AppError, ErrorResponse},
    state::AppState,
};

pub const POST_DELETED: &str = "Post Entity Deleted Successfully";

#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body = PostRequest,
    responses(
        (status = CREATED, description = "Post created", body = PostDto),
        (status = BAD_REQUEST, description = "Invalid post body", body = ErrorResponse),
        (status = UNAUTHORIZED, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = FORBIDDEN, description = "ADMIN role required", body = ErrorResponse),
        (status = CONFLICT, description = "Title already used", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn create_post(
    State(state): State<AppState>,
    AdminCtx(admin): AdminCtx,
    AppJson(req): AppJson<PostRequest>,
) -> Result<(StatusCode, Json<PostDto>), AppError> {
    req.validate().map_err(AppError::validation)?;

    let post = state.posts.create_post(req.into_new_post()).await?;

    tracing::debug!(post_id = post.id, user_id = %admin.user_id, jti = ?admin.jti, "create_post");
    Ok((StatusCode::CREATED, Json(PostDto::from(post))))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts",
    params(
        ("pageNo" = Option<u32>, Query, description = "Zero-based page number, default 0"),
        ("pageSize" = Option<u32>, Query, description = "Page size, default 10, at least 1"),
        ("sortBy" = Option<String>, Query, description = "id, title, description or content; default id"),
        ("sortDir" = Option<String>, Query, description = "asc (default) or desc")
    ),
    responses(
        (status = OK, description = "One page of posts with their comments", body = PostPageDto),
        (status = BAD_REQUEST, description = "Invalid page request", body = ErrorResponse)
    ),
    tag = "posts"
)]
pub async fn list_posts(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PostListQuery>,
) -> Result<Json<PostPageDto>, AppError> {
    let page = query
        .to_page_request()
        .map_err(|msg| AppError::bad_request("INVALID_PAGE_REQUEST", msg))?;

    let posts = state.posts.get_all_posts(page).await?;

    Ok(Json(PostPageDto::from(posts)))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/{post_id}",
    params(
        ("post_id" = i64, Path, description = "Post id"),
        ("version" = Option<String>, Query, description = "API version, 1 or 2"),
        ("X-API-VERSION" = Option<String>, Header, description = "API version, 1 or 2")
    ),
    responses(
        (status = OK, description = "Post in the negotiated version", content(
            (PostDto = "application/json"),
            (PostV2Dto = "application/vnd.javaguides.v2+json")
        )),
        (status = BAD_REQUEST, description = "Invalid id or api version", body = ErrorResponse),
        (status = NOT_FOUND, description = "No post with this id", body = ErrorResponse)
    ),
    tag = "posts"
)]
pub async fn get_post(
    State(state): State<AppState>,
    post_id: PostId,
    version: ApiVersion,
) -> Result<Response, AppError> {
    let post = state.posts.get_post_by_id(post_id.id).await?;

    let res = match version {
        ApiVersion::V1 => Json(PostDto::from(post)).into_response(),
        ApiVersion::V2 => (
            [(header::CONTENT_TYPE, V2_MEDIA_TYPE)],
            Json(PostV2Dto::from_post(post, &state.post_v2_tags)),
        )
            .into_response(),
    };

    Ok(res)
}

#[utoipa::path(
    put,
    path = "/api/v1/posts/{post_id}",
    params(("post_id" = i64, Path, description = "Post id")),
    request_body = PostRequest,
    responses(
        (status = OK, description = "Post replaced", body = PostDto),
        (status = BAD_REQUEST, description = "Invalid id or post body", body = ErrorResponse),
        (status = UNAUTHORIZED, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = FORBIDDEN, description = "ADMIN role required", body = ErrorResponse),
        (status = NOT_FOUND, description = "No post with this id", body = ErrorResponse),
        (status = CONFLICT, description = "Title already used", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn update_post(
    State(state): State<AppState>,
    AdminCtx(admin): AdminCtx,
    post_id: PostId,
    AppJson(req): AppJson<PostRequest>,
) -> Result<Json<PostDto>, AppError> {
    req.validate().map_err(AppError::validation)?;

    let post = state
        .posts
        .update_post(post_id.id, req.into_new_post())
        .await?;

    tracing::debug!(post_id = post.id, user_id = %admin.user_id, jti = ?admin.jti, "update_post");
    Ok(Json(PostDto::from(post)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/posts/{post_id}",
    params(("post_id" = i64, Path, description = "Post id")),
    responses(
        (status = OK, description = "Post and its comments deleted", body = String, content_type = "text/plain"),
        (status = UNAUTHORIZED, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = FORBIDDEN, description = "ADMIN role required", body = ErrorResponse),
        (status = NOT_FOUND, description = "No post with this id", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn delete_post(
    State(state): State<AppState>,
    AdminCtx(admin): AdminCtx,
    post_id: PostId,
) -> Result<(StatusCode, &'static str), AppError> {
    state.posts.delete_post_by_id(post_id.id).await?;

    tracing::debug!(post_id = post_id.id, user_id = %admin.user_id, jti = ?admin.jti, "delete_post");
    Ok((StatusCode::OK, POST_DELETED))
}
