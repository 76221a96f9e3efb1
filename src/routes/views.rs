use crate::{
    error::Result,
    models::{article::ArticleType, params::IdParam},
    state::AppState,
    utils::validation::ValidPath,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;
use std::sync::Arc;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index_page))
        .route("/blogs", get(blogs_page))
        .route("/vlogs", get(vlogs_page))
        .route("/create", get(create_page))
        .route("/blogs/:id", get(blog_detail_page))
        .route("/vlogs/:id", get(vlog_detail_page))
}

fn render_page(app_state: &AppState, name: &str, title: &str, scripts: &[&str]) -> Result<Html<String>> {
    let html = app_state.views.render(
        name,
        &json!({
            "title": title,
            "scripts": scripts,
        }),
    )?;
    Ok(Html(html))
}

/// 首页：全部文章与标签过滤
pub async fn index_page(State(app_state): State<Arc<AppState>>) -> Result<Html<String>> {
    render_page(&app_state, "index", "Blogs & Vlogs", &["index"])
}

pub async fn blogs_page(State(app_state): State<Arc<AppState>>) -> Result<Html<String>> {
    render_page(&app_state, "blogs", "Blogs", &["blogs"])
}

pub async fn vlogs_page(State(app_state): State<Arc<AppState>>) -> Result<Html<String>> {
    render_page(&app_state, "vlogs", "Vlogs", &["vlogs"])
}

pub async fn create_page(State(app_state): State<Arc<AppState>>) -> Result<Html<String>> {
    render_page(&app_state, "create", "Create Content", &["create"])
}

pub async fn blog_detail_page(
    State(app_state): State<Arc<AppState>>,
    ValidPath(IdParam { id }): ValidPath<IdParam>,
) -> Result<Response> {
    detail_page(&app_state, ArticleType::Blog, id).await
}

pub async fn vlog_detail_page(
    State(app_state): State<Arc<AppState>>,
    ValidPath(IdParam { id }): ValidPath<IdParam>,
) -> Result<Response> {
    detail_page(&app_state, ArticleType::Vlog, id).await
}

/// 详情页：文章不存在时渲染 404 错误页
async fn detail_page(app_state: &AppState, kind: ArticleType, id: i64) -> Result<Response> {
    let article = app_state
        .article_service
        .get_by_id_and_type(id, kind)
        .await?;

    if article.is_none() {
        let message = format!("{} not found", kind.label());
        let html = app_state.views.render_error(404, &message, None)?;
        return Ok((StatusCode::NOT_FOUND, Html(html)).into_response());
    }

    let html = app_state.views.render(
        "article-detail",
        &json!({
            "title": format!("{} Detail", kind.label()),
            "article_id": id,
            "kind": kind.as_str(),
            "scripts": ["article-detail", "comments-realtime"],
        }),
    )?;
    Ok(Html(html).into_response())
}
