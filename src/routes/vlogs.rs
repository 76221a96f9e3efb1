use crate::{
    error::{AppError, Result},
    models::{
        article::Article,
        params::IdParam,
        vlog::{CreateVlogRequest, UpdateVlogRequest},
        OneOrMany,
    },
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
use tracing::info;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/vlogs", get(list_vlogs).post(create_vlogs))
        .route(
            "/vlogs/:id",
            get(get_vlog).put(update_vlog).delete(delete_vlog),
        )
}

/// GET /api/vlogs
pub async fn list_vlogs(State(app_state): State<Arc<AppState>>) -> Result<Json<Vec<Article>>> {
    Ok(Json(app_state.vlog_service.list().await?))
}

/// GET /api/vlogs/:id
pub async fn get_vlog(
    State(app_state): State<Arc<AppState>>,
    ValidPath(IdParam { id }): ValidPath<IdParam>,
) -> Result<Json<Article>> {
    app_state
        .vlog_service
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Vlog not found"))
}

/// 创建一个或多个视频博客（含视频文件与作者）
/// POST /api/vlogs
pub async fn create_vlogs(
    State(app_state): State<Arc<AppState>>,
    ValidJson(body): ValidJson<OneOrMany<CreateVlogRequest>>,
) -> Result<(StatusCode, Json<OneOrMany<Article>>)> {
    let many = body.is_many();
    let created = app_state.vlog_service.create_many(body.into_vec()).await?;
    info!("Created {} vlog(s) via API", created.len());

    let created = OneOrMany::reshape(many, created)
        .ok_or_else(|| AppError::internal("Created vlog could not be loaded"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// 部分更新
/// PUT /api/vlogs/:id
pub async fn update_vlog(
    State(app_state): State<Arc<AppState>>,
    ValidPath(IdParam { id }): ValidPath<IdParam>,
    ValidJson(request): ValidJson<UpdateVlogRequest>,
) -> Result<Json<Article>> {
    app_state
        .vlog_service
        .update(id, request)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Vlog not found"))
}

/// DELETE /api/vlogs/:id
pub async fn delete_vlog(
    State(app_state): State<Arc<AppState>>,
    ValidPath(IdParam { id }): ValidPath<IdParam>,
) -> Result<StatusCode> {
    if app_state.vlog_service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Vlog not found"))
    }
}
