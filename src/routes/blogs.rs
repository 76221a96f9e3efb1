use crate::{
    error::{AppError, Result},
    models::{article::Article, blog::BlogRequest, params::IdParam, OneOrMany},
    state::AppState,
    utils::validation::{ValidJson, ValidPath},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;
use tracing::{debug, info};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/blogs", get(list_blogs).post(create_blogs))
        .route(
            "/blogs/:id",
            get(get_blog).put(update_blog).delete(delete_blog),
        )
}

/// GET /api/blogs
pub async fn list_blogs(State(app_state): State<Arc<AppState>>) -> Result<Json<Vec<Article>>> {
    Ok(Json(app_state.blog_service.list().await?))
}

/// GET /api/blogs/:id
pub async fn get_blog(
    State(app_state): State<Arc<AppState>>,
    ValidPath(IdParam { id }): ValidPath<IdParam>,
) -> Result<Json<Article>> {
    app_state
        .blog_service
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Blog not found"))
}

/// 创建一篇或多篇博客
/// POST /api/blogs
pub async fn create_blogs(
    State(app_state): State<Arc<AppState>>,
    ValidJson(body): ValidJson<OneOrMany<BlogRequest>>,
) -> Result<(StatusCode, Json<OneOrMany<Article>>)> {
    let many = body.is_many();
    let created = app_state.blog_service.create_many(body.into_vec()).await?;
    info!("Created {} blog(s) via API", created.len());

    let created = OneOrMany::reshape(many, created)
        .ok_or_else(|| AppError::internal("Created blog could not be loaded"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/blogs/:id
pub async fn update_blog(
    State(app_state): State<Arc<AppState>>,
    ValidPath(IdParam { id }): ValidPath<IdParam>,
    ValidJson(request): ValidJson<BlogRequest>,
) -> Result<Json<Article>> {
    debug!("Updating blog {}", id);
    app_state
        .blog_service
        .update(id, request)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Blog not found"))
}

/// DELETE /api/blogs/:id
pub async fn delete_blog(
    State(app_state): State<Arc<AppState>>,
    ValidPath(IdParam { id }): ValidPath<IdParam>,
) -> Result<StatusCode> {
    if app_state.blog_service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Blog not found"))
    }
}
