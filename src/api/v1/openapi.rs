//! OpenAPI document for the v1 routes, served as JSON at `/api-docs/openapi.json`.

use axum::Json;
use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

use crate::api::v1::{
    dto::{
        comments::{CommentDto, CommentRequest},
        posts::{PostDto, PostPageDto, PostRequest, PostV2Dto},
    },
    handlers::{comments, health, posts},
};
use crate::error::{ErrorBody, ErrorResponse};

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog API",
        description = "Posts and their comments. Post writes require an ADMIN bearer token."
    ),
    paths(
        health::health,
        posts::create_post,
        posts::list_posts,
        posts::get_post,
        posts::update_post,
        posts::delete_post,
        comments::create_comment,
        comments::list_comments,
        comments::get_comment,
        comments::update_comment,
        comments::delete_comment,
    ),
    components(schemas(
        PostRequest,
        PostDto,
        PostV2Dto,
        PostPageDto,
        CommentRequest,
        CommentDto,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "posts", description = "Post CRUD with paging and versioned reads"),
        (name = "comments", description = "Comments nested under a post"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("EdDSA access token; roles must contain ADMIN for post writes"))
                        .build(),
                ),
            )
        }
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
