mod common;

use axum::http::StatusCode;
use blog_api::services::{
    CommentService, PgBlogService, PostService, ServiceError,
    model::{NewComment, NewPost, PageRequest, SortDirection, SortField},
};
use rstest::{fixture, rstest};
use serde_json::Value;
use sqlx::{PgPool, postgres::PgPoolOptions};
use testcontainers_modules::{
    postgres::Postgres,
    testcontainers::{ContainerAsync, runners::AsyncRunner},
};

use common::{admin_token, error_code, init_test_server_with, post_body};

struct TestRuntime {
    _container: ContainerAsync<Postgres>,
    pool: PgPool,
    service: PgBlogService,
}

fn new_post(title: &str) -> NewPost {
    NewPost {
        title: title.into(),
        description: format!("{title} is a post about testing"),
        content: format!("Content of {title}"),
    }
}

fn new_comment(name: &str) -> NewComment {
    NewComment {
        name: name.into(),
        email: format!("{name}@example.com"),
        body: "This is a thoughtful comment.".into(),
    }
}

fn page(page_no: u32, page_size: u32, sort_by: SortField, sort_dir: SortDirection) -> PageRequest {
    PageRequest {
        page_no,
        page_size,
        sort_by,
        sort_dir,
    }
}

#[rstest]
#[tokio::test]
async fn create_then_get_returns_post_with_comments(#[future] runtime: TestRuntime) {
    let runtime = runtime.await;
    let service = &runtime.service;

    let created = service.create_post(new_post("First")).await.unwrap();
    assert!(created.comments.is_empty());

    let comment = service
        .create_comment(created.id, new_comment("ann"))
        .await
        .unwrap();

    let found = service.get_post_by_id(created.id).await.unwrap();
    assert_eq!(found.title, "First");
    assert_eq!(found.comments, vec![comment]);
}

#[rstest]
#[case::title_desc(SortField::Title, SortDirection::Desc, vec!["Gamma", "Beta", "Alpha"])]
#[case::title_asc(SortField::Title, SortDirection::Asc, vec!["Alpha", "Beta", "Gamma"])]
#[case::id_desc(SortField::Id, SortDirection::Desc, vec!["Alpha", "Gamma", "Beta"])]
#[tokio::test]
async fn list_orders_by_whitelisted_column(
    #[future] runtime: TestRuntime,
    #[case] sort_by: SortField,
    #[case] sort_dir: SortDirection,
    #[case] expected: Vec<&str>,
) {
    let runtime = runtime.await;
    let service = &runtime.service;
    for title in ["Beta", "Gamma", "Alpha"] {
        service.create_post(new_post(title)).await.unwrap();
    }

    let listed = service
        .get_all_posts(page(0, 10, sort_by, sort_dir))
        .await
        .unwrap();

    let titles: Vec<&str> = listed.content.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, expected);
    assert_eq!(listed.total_elements, 3);
    assert!(listed.last);
}

#[rstest]
#[tokio::test]
async fn list_pages_with_limit_and_offset(#[future] runtime: TestRuntime) {
    let runtime = runtime.await;
    let service = &runtime.service;
    for i in 1..=5 {
        service.create_post(new_post(&format!("Post {i}"))).await.unwrap();
    }

    let second = service
        .get_all_posts(page(1, 2, SortField::Id, SortDirection::Asc))
        .await
        .unwrap();

    let titles: Vec<&str> = second.content.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Post 3", "Post 4"]);
    assert_eq!(second.total_pages, 3);
    assert!(!second.last);

    let past_end = service
        .get_all_posts(page(9, 2, SortField::Id, SortDirection::Asc))
        .await
        .unwrap();
    assert!(past_end.content.is_empty());
    assert!(past_end.last);
}

#[rstest]
#[tokio::test]
async fn listed_posts_get_their_own_comments(#[future] runtime: TestRuntime) {
    let runtime = runtime.await;
    let service = &runtime.service;
    let first = service.create_post(new_post("One")).await.unwrap();
    let second = service.create_post(new_post("Two")).await.unwrap();
    let quiet = service.create_post(new_post("Three")).await.unwrap();

    service.create_comment(first.id, new_comment("ann")).await.unwrap();
    service.create_comment(second.id, new_comment("bob")).await.unwrap();
    service.create_comment(first.id, new_comment("cid")).await.unwrap();

    let listed = service
        .get_all_posts(page(0, 10, SortField::Id, SortDirection::Asc))
        .await
        .unwrap();

    let names = |id: i64| -> Vec<String> {
        listed
            .content
            .iter()
            .find(|p| p.id == id)
            .expect("listed post")
            .comments
            .iter()
            .map(|c| c.name.clone())
            .collect()
    };
    assert_eq!(names(first.id), vec!["ann", "cid"]);
    assert_eq!(names(second.id), vec!["bob"]);
    assert!(names(quiet.id).is_empty());
}

#[rstest]
#[tokio::test]
async fn duplicate_title_maps_unique_violation(#[future] runtime: TestRuntime) {
    let runtime = runtime.await;
    let service = &runtime.service;
    service.create_post(new_post("Taken")).await.unwrap();
    let other = service.create_post(new_post("Free")).await.unwrap();

    let err = service.create_post(new_post("Taken")).await.unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateTitle { title } if title == "Taken"));

    let err = service
        .update_post(other.id, new_post("Taken"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateTitle { .. }));
}

#[rstest]
#[tokio::test]
async fn deleting_post_cascades_to_comments(#[future] runtime: TestRuntime) {
    let runtime = runtime.await;
    let service = &runtime.service;
    let post = service.create_post(new_post("Doomed")).await.unwrap();
    service.create_comment(post.id, new_comment("ann")).await.unwrap();
    service.create_comment(post.id, new_comment("bob")).await.unwrap();

    service.delete_post_by_id(post.id).await.unwrap();

    let remaining: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM comments WHERE "postId" = $1"#)
        .bind(post.id)
        .fetch_one(&runtime.pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    let err = service.get_post_by_id(post.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::PostNotFound { .. }));
    let err = service.delete_post_by_id(post.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::PostNotFound { .. }));
}

#[rstest]
#[tokio::test]
async fn comment_rules_check_post_then_comment_then_owner(#[future] runtime: TestRuntime) {
    let runtime = runtime.await;
    let service = &runtime.service;
    let owner = service.create_post(new_post("Owner")).await.unwrap();
    let other = service.create_post(new_post("Other")).await.unwrap();
    let comment = service
        .create_comment(owner.id, new_comment("eve"))
        .await
        .unwrap();

    let err = service
        .get_comment_by_id(999, comment.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::PostNotFound { id: 999 }));

    let err = service.get_comment_by_id(owner.id, 999).await.unwrap_err();
    assert!(matches!(err, ServiceError::CommentNotFound { id: 999 }));

    let err = service
        .update_comment(other.id, comment.id, new_comment("mallory"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::CommentNotInPost { .. }));

    let err = service
        .delete_comment(other.id, comment.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::CommentNotInPost { .. }));

    let updated = service
        .update_comment(owner.id, comment.id, new_comment("eve2"))
        .await
        .unwrap();
    assert_eq!(updated.name, "eve2");

    service.delete_comment(owner.id, comment.id).await.unwrap();
    assert!(
        service
            .get_comments_by_post_id(owner.id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[rstest]
#[tokio::test]
async fn http_duplicate_title_is_409_on_postgres(#[future] runtime: TestRuntime) {
    let runtime = runtime.await;
    let server = init_test_server_with(runtime.service.clone());

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let response = server
            .post("/api/v1/posts")
            .authorization_bearer(admin_token())
            .json(&post_body("Only once"))
            .await;
        response.assert_status(expected);
        if expected == StatusCode::CONFLICT {
            assert_eq!(error_code(&response.json::<Value>()), "DUPLICATE_TITLE");
        }
    }
}

#[fixture]
async fn runtime(#[future] container: ContainerAsync<Postgres>) -> TestRuntime {
    let container = container.await;
    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&format!("postgres://testuser:testpass@{host}:{port}/blog"))
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    TestRuntime {
        _container: container,
        service: PgBlogService::new(pool.clone()),
        pool,
    }
}

#[fixture]
async fn container() -> ContainerAsync<Postgres> {
    Postgres::default()
        .with_db_name("blog")
        .with_user("testuser")
        .with_password("testpass")
        .start()
        .await
        .unwrap()
}
