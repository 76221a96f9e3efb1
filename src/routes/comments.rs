use crate::{
    error::{AppError, Result},
    models::{
        comment::{Comment, CreateCommentRequest, UpdateCommentRequest},
        params::{CommentPathParams, IdParam},
    },
    state::AppState,
    utils::validation::{ValidJson, ValidPath},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tracing::{debug, info};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/articles/:id/comments",
            get(list_comments).post(create_comment),
        )
        .route(
            "/articles/:id/comments/:comment_id",
            put(update_comment).delete(delete_comment),
        )
}

async fn ensure_article(app_state: &AppState, article_id: i64) -> Result<()> {
    if app_state.article_service.exists(article_id).await? {
        Ok(())
    } else {
        Err(AppError::not_found("Article not found"))
    }
}

/// 获取文章的评论（按发布顺序）；文章不存在时为空列表
/// GET /api/articles/:id/comments
pub async fn list_comments(
    State(app_state): State<Arc<AppState>>,
    ValidPath(IdParam { id }): ValidPath<IdParam>,
) -> Result<Json<Vec<Comment>>> {
    Ok(Json(app_state.comment_service.list_for_article(id).await?))
}

/// 创建评论并推送给正在浏览该文章的连接
/// POST /api/articles/:id/comments
pub async fn create_comment(
    State(app_state): State<Arc<AppState>>,
    ValidPath(IdParam { id }): ValidPath<IdParam>,
    ValidJson(request): ValidJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>)> {
    let comment = app_state.comment_service.create(id, request).await?;

    let delivered = app_state
        .comment_router
        .announce(id, serde_json::to_value(&comment)?);
    info!(
        "Comment {} announced to {} connection(s)",
        comment.comment_id, delivered
    );

    Ok((StatusCode::CREATED, Json(comment)))
}

/// PUT /api/articles/:id/comments/:comment_id
pub async fn update_comment(
    State(app_state): State<Arc<AppState>>,
    ValidPath(CommentPathParams { id, comment_id }): ValidPath<CommentPathParams>,
    ValidJson(request): ValidJson<UpdateCommentRequest>,
) -> Result<Json<Comment>> {
    ensure_article(&app_state, id).await?;
    debug!("Updating comment {} on article {}", comment_id, id);

    app_state
        .comment_service
        .update(id, comment_id, request)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Comment not found"))
}

/// DELETE /api/articles/:id/comments/:comment_id
pub async fn delete_comment(
    State(app_state): State<Arc<AppState>>,
    ValidPath(CommentPathParams { id, comment_id }): ValidPath<CommentPathParams>,
) -> Result<StatusCode> {
    ensure_article(&app_state, id).await?;

    if app_state.comment_service.delete(id, comment_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Comment not found"))
    }
}
