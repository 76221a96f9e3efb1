use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use blogvlog::{app, config::Config, services::Database, state::AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio_test::assert_ok;
use tower::ServiceExt;

async fn setup() -> (Arc<AppState>, Router) {
    let db = Arc::new(Database::in_memory().await.unwrap());
    let state = AppState::new(Config::default(), db).unwrap();
    (state.clone(), app(state))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

async fn get_html(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .uri(uri)
        .header(header::ACCEPT, "text/html")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

fn blog(slug: &str, tags: &[&str]) -> Value {
    json!({
        "Title": format!("Post {}", slug),
        "Excerpt": "Short summary",
        "Content": "one two three four five",
        "Slug": slug,
        "Tags": tags,
    })
}

async fn create_user(app: &Router, username: &str) -> i64 {
    let (status, user) = send(
        app,
        Method::POST,
        "/api/users",
        Some(json!({
            "Username": username,
            "Email": format!("{}@example.com", username),
            "Roles": ["user"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    user["UserId"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (_state, app) = setup().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".to_string()));
}

#[tokio::test]
async fn test_blog_lifecycle() {
    let (_state, app) = setup().await;

    let (status, created) = send(&app, Method::POST, "/api/blogs", Some(blog("first", &["rust"]))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created.is_object());
    assert_eq!(created["Readtime"], 1);
    assert_eq!(created["ArticleType"], "blog");
    let id = created["ArticleId"].as_i64().unwrap();

    let (status, fetched) = send(&app, Method::GET, &format!("/api/blogs/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["Slug"], "first");

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/blogs/{}", id),
        Some(blog("renamed", &[])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["Slug"], "renamed");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/blogs/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &format!("/api/blogs/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "Blog not found");
}

#[tokio::test]
async fn test_bulk_create_returns_array() {
    let (_state, app) = setup().await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/blogs",
        Some(json!([blog("a", &[]), blog("b", &[])])),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.as_array().unwrap().len(), 2);

    let (_, blogs) = send(&app, Method::GET, "/api/blogs", None).await;
    assert_eq!(blogs.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_invalid_bodies_are_rejected() {
    let (_state, app) = setup().await;

    let (status, body) = send(&app, Method::POST, "/api/blogs", Some(json!([]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_FAILED");

    let mut long_tag = blog("tagged", &[]);
    long_tag["Tags"] = json!(["x".repeat(51)]);
    let (status, _) = send(&app, Method::POST, "/api/blogs", Some(long_tag)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut empty_tag = blog("empty-tag", &[]);
    empty_tag["Tags"] = json!(["rust", ""]);
    let (status, _) = send(&app, Method::POST, "/api/blogs", Some(empty_tag)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut unknown = blog("unknown", &[]);
    unknown["Author"] = json!("someone");
    let (status, _) = send(&app, Method::POST, "/api/blogs", Some(unknown)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, blogs) = send(&app, Method::GET, "/api/blogs", None).await;
    assert!(blogs.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_ids_are_rejected() {
    let (_state, app) = setup().await;

    for uri in ["/api/blogs/0", "/api/blogs/-3", "/api/vlogs/abc", "/api/users/0"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"]["code"], "VALIDATION_FAILED");
    }
}

#[tokio::test]
async fn test_vlog_with_video_and_authors() {
    let (_state, app) = setup().await;
    let user_id = create_user(&app, "ann").await;

    let (status, vlog) = send(
        &app,
        Method::POST,
        "/api/vlogs",
        Some(json!({
            "Title": "Road trip",
            "Excerpt": "Filmed on the road",
            "Content": "Lots of driving",
            "Slug": "road-trip",
            "Tags": ["travel"],
            "UserIds": [user_id],
            "VideoFile": {"VideoFileUrl": "https://cdn.example.com/trip.mp4"},
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(vlog["ArticleType"], "vlog");
    assert!(vlog.get("Readtime").is_none());
    assert_eq!(vlog["VideoFile"]["VideoFileUrl"], "https://cdn.example.com/trip.mp4");
    let id = vlog["ArticleId"].as_i64().unwrap();

    let (status, authors) = send(&app, Method::GET, &format!("/api/articles/{}/authors", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(authors, json!(["ann"]));

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/vlogs/{}", id),
        Some(json!({"Title": "Longer road trip"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["Title"], "Longer road trip");
    assert_eq!(updated["Excerpt"], "Filmed on the road");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/vlogs/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = send(&app, Method::GET, &format!("/api/vlogs/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Vlog not found");
}

#[tokio::test]
async fn test_vlog_with_unknown_author_is_not_created() {
    let (_state, app) = setup().await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/vlogs",
        Some(json!({
            "Title": "Orphan",
            "Excerpt": "No such author",
            "Content": "Nothing",
            "Slug": "orphan",
            "UserIds": [42],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, vlogs) = send(&app, Method::GET, "/api/vlogs", None).await;
    assert!(vlogs.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_article_queries() {
    let (_state, app) = setup().await;
    send(&app, Method::POST, "/api/blogs", Some(blog("rusty", &["rust", "web"]))).await;
    send(&app, Method::POST, "/api/blogs", Some(blog("cooking", &["food"]))).await;

    let (status, all) = send(&app, Method::GET, "/api/articles", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, tagged) = send(&app, Method::GET, "/api/articles?tag=rust", None).await;
    let tagged = tagged.as_array().unwrap();
    assert_eq!(tagged.len(), 1);
    assert_eq!(tagged[0]["Slug"], "rusty");

    let (status, by_slug) = send(&app, Method::GET, "/api/articles/slug/cooking", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_slug["Tags"], json!(["food"]));

    let (status, body) = send(&app, Method::GET, "/api/articles/slug/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Article not found");
}

#[tokio::test]
async fn test_comment_lifecycle() {
    let (_state, app) = setup().await;
    let user_id = create_user(&app, "bob").await;
    let (_, article) = send(&app, Method::POST, "/api/blogs", Some(blog("talk", &[]))).await;
    let article_id = article["ArticleId"].as_i64().unwrap();
    let base = format!("/api/articles/{}/comments", article_id);

    let (status, comment) = send(
        &app,
        Method::POST,
        &base,
        Some(json!({"UserId": user_id, "Content": "Nice post"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(comment["ArticleId"], article_id);
    assert_eq!(comment["User"]["Username"], "bob");
    let comment_id = comment["CommentId"].as_i64().unwrap();

    let (status, comments) = send(&app, Method::GET, &base, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(comments.as_array().unwrap().len(), 1);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("{}/{}", base, comment_id),
        Some(json!({"Content": "Edited"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["Content"], "Edited");

    let (status, _) = send(&app, Method::DELETE, &format!("{}/{}", base, comment_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = send(&app, Method::DELETE, &format!("{}/{}", base, comment_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Comment not found");
}

#[tokio::test]
async fn test_comment_requires_existing_article_and_user() {
    let (_state, app) = setup().await;
    let user_id = create_user(&app, "cat").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/articles/99/comments",
        Some(json!({"UserId": user_id, "Content": "Hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Article not found");

    let (status, comments) = send(&app, Method::GET, "/api/articles/99/comments", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(comments, json!([]));

    let (_, article) = send(&app, Method::POST, "/api/blogs", Some(blog("lonely", &[]))).await;
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/articles/{}/comments", article["ArticleId"]),
        Some(json!({"UserId": 99, "Content": "Hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "User not found");

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/articles/{}/comments", article["ArticleId"]),
        Some(json!({"UserId": user_id, "Content": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_comment_is_announced_to_subscribers() {
    let (state, app) = setup().await;
    let user_id = create_user(&app, "dan").await;
    let (_, article) = send(&app, Method::POST, "/api/blogs", Some(blog("live", &[]))).await;
    let article_id = article["ArticleId"].as_i64().unwrap();

    let (channel, mut rx) = state.comment_router.connect();
    assert!(state.comment_router.join(channel, article_id));

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/articles/{}/comments", article_id),
        Some(json!({"UserId": user_id, "Content": "Live!"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let event = assert_ok!(rx.try_recv());
    let frame = serde_json::to_value(&event).unwrap();
    assert_eq!(frame["event"], "comment:new");
    assert_eq!(frame["data"]["Content"], "Live!");
}

#[tokio::test]
async fn test_user_lifecycle() {
    let (_state, app) = setup().await;
    let user_id = create_user(&app, "eve").await;
    let uri = format!("/api/users/{}", user_id);

    let (status, updated) = send(&app, Method::PUT, &uri, Some(json!({"Email": "eve@new.example.com"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["Email"], "eve@new.example.com");

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({"Email": "not-an-email"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "User not found");
}

#[tokio::test]
async fn test_pages_and_assets() {
    let (_state, app) = setup().await;

    let (status, html) = get_html(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("/js/index.js"));

    let (status, html) = get_html(&app, "/create").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("create-form"));

    let (_, article) = send(&app, Method::POST, "/api/blogs", Some(blog("shown", &[]))).await;
    let id = article["ArticleId"].as_i64().unwrap();
    let (status, html) = get_html(&app, &format!("/blogs/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(&format!("const ARTICLE_ID = {};", id)));

    let (status, _) = get_html(&app, &format!("/vlogs/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, script) = get_html(&app, "/js/common.js").await;
    assert_eq!(status, StatusCode::OK);
    assert!(script.contains("apiRequest"));

    let (status, _) = get_html(&app, "/js/missing.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_routes() {
    let (_state, app) = setup().await;

    let (status, html) = get_html(&app, "/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("/nowhere"));

    let (status, body) = send(&app, Method::GET, "/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}
