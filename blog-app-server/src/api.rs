//! HTTP API for blogs

use crate::{current_user::HeaderCurrentUser, middleware::request_timer, Result};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use blog_app_core::{
    blog::{AuthorId, BlogId},
    create_blog::CreateBlogCommand,
    ports::CurrentUser,
    Failure, FailureKind,
};
use blog_app_storage::StorageManager;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Build the application router
pub fn router(storage: Arc<StorageManager>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/blogs", get(blogs_list).post(blogs_create))
        .route("/blogs/:id", get(blogs_detail))
        .route("/authors/:author_id/blogs", get(author_blogs_list))
        .route("/categories", get(categories_list))
        .with_state(storage)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(request_timer)),
        )
}

/// Transport status for an expected failure
pub fn failure_status(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::Validation | FailureKind::Unspecified => StatusCode::BAD_REQUEST,
        FailureKind::Conflict => StatusCode::CONFLICT,
        FailureKind::NotFound => StatusCode::NOT_FOUND,
    }
}

fn failure_response(failure: Failure) -> Response {
    let body = Json(json!({
        "error": failure.to_string(),
        "kind": failure.kind(),
    }));
    (failure_status(failure.kind()), body).into_response()
}

/// Create a blog authored by the caller
pub async fn blogs_create(
    State(storage): State<Arc<StorageManager>>,
    headers: HeaderMap,
    Json(command): Json<CreateBlogCommand>,
) -> Result<Response> {
    let current_user: Arc<dyn CurrentUser> = Arc::new(HeaderCurrentUser::from_headers(&headers));
    let outcome = storage
        .blog_service()
        .create_blog(current_user, command)
        .await?;

    Ok(match outcome.into_result() {
        Ok(id) => (StatusCode::CREATED, Json(json!({ "id": id }))).into_response(),
        Err(failure) => failure_response(failure),
    })
}

/// Get a single blog
pub async fn blogs_detail(
    State(storage): State<Arc<StorageManager>>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let outcome = storage
        .blog_service()
        .get_blog(BlogId::from_uuid(id))
        .await?;

    Ok(match outcome.into_result() {
        Ok(blog) => Json(blog).into_response(),
        Err(failure) => failure_response(failure),
    })
}

/// List all blogs
pub async fn blogs_list(State(storage): State<Arc<StorageManager>>) -> Result<Json<Value>> {
    let blogs = storage.blog_service().list_blogs().await?;

    Ok(Json(json!({
        "total": blogs.len(),
        "blogs": blogs,
    })))
}

/// List blogs written by one author
pub async fn author_blogs_list(
    State(storage): State<Arc<StorageManager>>,
    Path(author_id): Path<Uuid>,
) -> Result<Json<Value>> {
    let blogs = storage
        .blog_service()
        .list_blogs_by_author(AuthorId::from_uuid(author_id))
        .await?;

    Ok(Json(json!({
        "author_id": author_id,
        "total": blogs.len(),
        "blogs": blogs,
    })))
}

/// List categories
pub async fn categories_list(State(storage): State<Arc<StorageManager>>) -> Result<Json<Value>> {
    let categories = storage.blog_service().list_categories().await?;

    Ok(Json(json!({
        "total": categories.len(),
        "categories": categories,
    })))
}

/// Health check
pub async fn health(State(storage): State<Arc<StorageManager>>) -> Result<Json<Value>> {
    storage.health_check().await?;
    let stats = storage.stats().await?;

    Ok(Json(json!({
        "status": "healthy",
        "blogs_count": stats.blogs_count,
        "categories_count": stats.categories_count,
        "timestamp": chrono::Utc::now(),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::current_user::AUTHOR_ID_HEADER;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request},
    };
    use blog_app_storage::DatabaseConfig;
    use tempfile::NamedTempFile;
    use tower::ServiceExt;

    async fn setup_app() -> (Router, NamedTempFile) {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", temp_file.path().display()),
            max_connections: Some(5),
            migrate_on_startup: true,
        };
        let storage = StorageManager::new(&config)
            .await
            .expect("Failed to create storage");
        (router(Arc::new(storage)), temp_file)
    }

    fn create_request(author: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/blogs")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(author) = author {
            builder = builder.header(AUTHOR_ID_HEADER, author);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (app, _temp) = setup_app().await;
        let author = AuthorId::new().to_string();

        let (status, body) = send(
            &app,
            create_request(Some(author.as_str()), json!({"title": "Hello", "content": "World"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["id"].as_str().unwrap().to_string();

        let (status, blog) = send(&app, get_request(&format!("/blogs/{}", id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(blog["title"], "Hello");
        assert_eq!(blog["content"], "World");
        assert_eq!(blog["author_id"], author.as_str());
    }

    #[tokio::test]
    async fn test_duplicate_title_is_conflict() {
        let (app, _temp) = setup_app().await;
        let author = AuthorId::new().to_string();
        let body = json!({"title": "Twice", "content": ""});

        let (status, _) = send(&app, create_request(Some(author.as_str()), body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, error) = send(&app, create_request(Some(author.as_str()), body)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(error["kind"], "conflict");
        assert!(error["error"].as_str().unwrap().contains("Twice"));
    }

    #[tokio::test]
    async fn test_validation_failures_are_bad_request() {
        let (app, _temp) = setup_app().await;

        let (status, error) = send(
            &app,
            create_request(Some(AuthorId::new().to_string().as_str()), json!({"title": "  "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"], "title invalid");

        let nil = AuthorId::nil().to_string();
        let (status, error) =
            send(&app, create_request(Some(nil.as_str()), json!({"title": "Fine"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"], "author id invalid");

        let (_, listed) = send(&app, get_request("/blogs")).await;
        assert_eq!(listed["total"], 0);
    }

    #[tokio::test]
    async fn test_missing_author_is_unauthorized() {
        let (app, _temp) = setup_app().await;

        let (status, error) = send(&app, create_request(None, json!({"title": "Hi"}))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error["error"], "Authentication required");

        let (status, _) = send(
            &app,
            create_request(Some("not-a-uuid"), json!({"title": "Hi"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_blog_is_not_found() {
        let (app, _temp) = setup_app().await;
        let (status, error) =
            send(&app, get_request(&format!("/blogs/{}", BlogId::new()))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error["kind"], "not_found");
    }

    #[tokio::test]
    async fn test_listing_and_health() {
        let (app, _temp) = setup_app().await;
        let author = AuthorId::new().to_string();
        let other = AuthorId::new().to_string();

        for (who, title) in [(&author, "A"), (&author, "B"), (&other, "A")] {
            let (status, _) =
                send(&app, create_request(Some(who.as_str()), json!({"title": title}))).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, all) = send(&app, get_request("/blogs")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all["total"], 3);

        let (status, mine) =
            send(&app, get_request(&format!("/authors/{}/blogs", author))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(mine["total"], 2);

        let (status, health) = send(&app, get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(health["status"], "healthy");
        assert_eq!(health["blogs_count"], 3);
        assert_eq!(health["categories_count"], 3);
    }

    #[tokio::test]
    async fn test_categories_and_filed_blog() {
        let (app, _temp) = setup_app().await;

        let (status, listed) = send(&app, get_request("/categories")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed["total"], 3);
        let category = listed["categories"][0]["id"].as_str().unwrap().to_string();

        let author = AuthorId::new().to_string();
        let (status, body) = send(
            &app,
            create_request(
                Some(author.as_str()),
                json!({"title": "Filed", "category_id": category}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let id = body["id"].as_str().unwrap().to_string();
        let (_, blog) = send(&app, get_request(&format!("/blogs/{}", id))).await;
        assert_eq!(blog["category_id"], category.as_str());

        let (status, error) = send(
            &app,
            create_request(
                Some(author.as_str()),
                json!({"title": "Lost", "category_id": uuid::Uuid::new_v4()}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"], "category invalid");
    }

    #[test]
    fn test_failure_status_mapping() {
        assert_eq!(
            failure_status(FailureKind::Validation),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(failure_status(FailureKind::Conflict), StatusCode::CONFLICT);
        assert_eq!(failure_status(FailureKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            failure_status(FailureKind::Unspecified),
            StatusCode::BAD_REQUEST
        );
    }
}
