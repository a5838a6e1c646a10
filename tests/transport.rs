mod common;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode, header};
use axum_test::{TestResponse, TestServer};
use blog_api::{
    app,
    config::Config,
    services::{
        InMemoryBlogService, PostService, ServiceResult,
        model::{NewPost, Page, PageRequest, Post},
    },
    state::AppState,
};
use rstest::rstest;
use serde_json::{Value, json};

use common::{admin_token, auth_service, error_code, post_body, test_config, v2_tags};

const REQUEST_ID: &str = "x-request-id";

/// Listing posts takes `delay`; everything else goes straight to memory.
struct SlowPosts {
    inner: Arc<InMemoryBlogService>,
    delay: Duration,
}

#[async_trait]
impl PostService for SlowPosts {
    async fn create_post(&self, post: NewPost) -> ServiceResult<Post> {
        self.inner.create_post(post).await
    }

    async fn get_all_posts(&self, page: PageRequest) -> ServiceResult<Page<Post>> {
        tokio::time::sleep(self.delay).await;
        self.inner.get_all_posts(page).await
    }

    async fn get_post_by_id(&self, id: i64) -> ServiceResult<Post> {
        self.inner.get_post_by_id(id).await
    }

    async fn update_post(&self, id: i64, post: NewPost) -> ServiceResult<Post> {
        self.inner.update_post(id, post).await
    }

    async fn delete_post_by_id(&self, id: i64) -> ServiceResult<()> {
        self.inner.delete_post_by_id(id).await
    }
}

fn init_transport_server(config: &Config, list_delay: Duration) -> TestServer {
    let memory = Arc::new(InMemoryBlogService::new());
    let posts = Arc::new(SlowPosts {
        inner: memory.clone(),
        delay: list_delay,
    });
    let state = AppState::new(posts, memory, auth_service(), v2_tags());

    TestServer::new(app::build_router(state, config)).expect("creation of test server")
}

fn header_str(response: &TestResponse, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .map(|v| v.to_str().expect("ascii header").to_string())
}

#[rstest]
#[case::api_route("/api/v1/health")]
#[case::unknown_route("/nowhere")]
#[tokio::test]
async fn security_headers_are_set_on_every_response(#[case] path: &str) {
    let server = init_transport_server(&test_config(&[]), Duration::ZERO);

    let response = server.get(path).await;

    for (name, value) in [
        ("x-frame-options", "DENY"),
        ("content-security-policy", "frame-ancestors 'none'"),
        ("x-content-type-options", "nosniff"),
        ("referrer-policy", "no-referrer"),
        ("permissions-policy", "camera=(), microphone=(), geolocation=()"),
    ] {
        assert_eq!(header_str(&response, name).as_deref(), Some(value), "{name}");
    }
}

#[tokio::test]
async fn request_id_is_generated_and_propagated() {
    let server = init_transport_server(&test_config(&[]), Duration::ZERO);

    let generated = server.get("/api/v1/health").await;
    let id = header_str(&generated, REQUEST_ID).expect("generated request id");
    assert!(!id.is_empty());

    let echoed = server
        .get("/api/v1/health")
        .add_header(
            HeaderName::from_static(REQUEST_ID),
            HeaderValue::from_static("req-42"),
        )
        .await;
    assert_eq!(header_str(&echoed, REQUEST_ID).as_deref(), Some("req-42"));
}

#[tokio::test]
async fn cors_preflight_allows_version_header_in_development() {
    let server = init_transport_server(&test_config(&[]), Duration::ZERO);

    let response = server
        .method(Method::OPTIONS, "/api/v1/posts/1")
        .add_header(header::ORIGIN, HeaderValue::from_static("https://any.test"))
        .add_header(
            header::ACCESS_CONTROL_REQUEST_METHOD,
            HeaderValue::from_static("GET"),
        )
        .add_header(
            header::ACCESS_CONTROL_REQUEST_HEADERS,
            HeaderValue::from_static("x-api-version"),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(
        header_str(&response, "access-control-allow-origin").as_deref(),
        Some("*")
    );
    let allowed = header_str(&response, "access-control-allow-headers")
        .expect("allow-headers")
        .to_ascii_lowercase();
    assert!(allowed.contains("x-api-version"), "{allowed}");
    assert!(header_str(&response, "access-control-allow-credentials").is_none());
}

#[rstest]
#[case::listed("https://blog.example", Some("https://blog.example"))]
#[case::unlisted("https://evil.example", None)]
#[tokio::test]
async fn cors_production_uses_exact_allowlist(
    #[case] origin: &'static str,
    #[case] expected: Option<&str>,
) {
    let config = test_config(&[
        ("APP_ENV", "production"),
        ("DATABASE_URL", "postgres://unused"),
        ("CORS_ALLOWED_ORIGINS", "https://blog.example"),
    ]);
    let server = init_transport_server(&config, Duration::ZERO);

    let response = server
        .get("/api/v1/health")
        .add_header(header::ORIGIN, HeaderValue::from_static(origin))
        .await;

    response.assert_status_ok();
    assert_eq!(
        header_str(&response, "access-control-allow-origin").as_deref(),
        expected
    );
}

#[tokio::test]
async fn oversized_body_is_413() {
    let config = test_config(&[("REQUEST_BODY_LIMIT_BYTES", "256")]);
    let server = init_transport_server(&config, Duration::ZERO);

    let mut body = post_body("Big");
    body["content"] = json!("x".repeat(1024));

    let response = server
        .post("/api/v1/posts")
        .authorization_bearer(admin_token())
        .json(&body)
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);

    // a body under the limit still goes through
    let response = server
        .post("/api/v1/posts")
        .authorization_bearer(admin_token())
        .json(&post_body("Small"))
        .await;
    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn slow_request_times_out_with_408() {
    let mut config = test_config(&[]);
    config.http_limits.timeout = Duration::from_millis(50);
    let server = init_transport_server(&config, Duration::from_millis(500));

    let response = server.get("/api/v1/posts").await;

    response.assert_status(StatusCode::REQUEST_TIMEOUT);

    // fast routes are unaffected
    server.get("/api/v1/health").await.assert_status_ok();
}

#[tokio::test]
async fn json_errors_pass_through_transport_layers() {
    let server = init_transport_server(&test_config(&[]), Duration::ZERO);

    let response = server.get("/api/v1/posts/abc").await;

    response.assert_status_bad_request();
    assert_eq!(error_code(&response.json::<Value>()), "INVALID_ID");
    assert!(header_str(&response, REQUEST_ID).is_some());
}
