use crate::{
    error::{AppError, Result},
    models::{
        params::IdParam,
        user::{CreateUserRequest, UpdateUserRequest, User},
    },
    state::AppState,
    utils::validation::{ValidJson, ValidPath},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// GET /api/users/:id
pub async fn get_user(
    State(app_state): State<Arc<AppState>>,
    ValidPath(IdParam { id }): ValidPath<IdParam>,
) -> Result<Json<User>> {
    app_state
        .user_service
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("User not found"))
}

/// POST /api/users
pub async fn create_user(
    State(app_state): State<Arc<AppState>>,
    ValidJson(request): ValidJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let user = app_state.user_service.create(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// 只允许修改邮箱
/// PUT /api/users/:id
pub async fn update_user(
    State(app_state): State<Arc<AppState>>,
    ValidPath(IdParam { id }): ValidPath<IdParam>,
    ValidJson(request): ValidJson<UpdateUserRequest>,
) -> Result<Json<User>> {
    app_state
        .user_service
        .update(id, request)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("User not found"))
}

/// DELETE /api/users/:id
pub async fn delete_user(
    State(app_state): State<Arc<AppState>>,
    ValidPath(IdParam { id }): ValidPath<IdParam>,
) -> Result<StatusCode> {
    if app_state.user_service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("User not found"))
    }
}
