use crate::{
    error::{AppError, Result},
    models::{
        article::{Article, ArticleQuery},
        params::{IdParam, SlugParam},
    },
    state::AppState,
    utils::validation::ValidPath,
};
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/articles", get(list_articles))
        .route("/articles/slug/:slug", get(get_article_by_slug))
        .route("/articles/:id", get(get_article))
        .route("/articles/:id/authors", get(get_article_authors))
}

/// 获取文章列表，可按标签过滤
/// GET /api/articles?tag=
pub async fn list_articles(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<ArticleQuery>,
) -> Result<Json<Vec<Article>>> {
    query.validate()?;
    debug!("Fetching articles with query: {:?}", query);

    let articles = match query.tag.as_deref() {
        Some(tag) if !tag.is_empty() => app_state.article_service.list_by_tag(tag).await?,
        _ => app_state.article_service.list().await?,
    };
    Ok(Json(articles))
}

/// GET /api/articles/:id
pub async fn get_article(
    State(app_state): State<Arc<AppState>>,
    ValidPath(IdParam { id }): ValidPath<IdParam>,
) -> Result<Json<Article>> {
    app_state
        .article_service
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Article not found"))
}

/// GET /api/articles/slug/:slug
pub async fn get_article_by_slug(
    State(app_state): State<Arc<AppState>>,
    ValidPath(SlugParam { slug }): ValidPath<SlugParam>,
) -> Result<Json<Article>> {
    app_state
        .article_service
        .get_by_slug(&slug)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Article not found"))
}

/// 文章作者的用户名
/// GET /api/articles/:id/authors
pub async fn get_article_authors(
    State(app_state): State<Arc<AppState>>,
    ValidPath(IdParam { id }): ValidPath<IdParam>,
) -> Result<Json<Vec<String>>> {
    if !app_state.article_service.exists(id).await? {
        return Err(AppError::not_found("Article not found"));
    }
    Ok(Json(app_state.article_service.authors(id).await?))
}
