pub mod articles;
pub mod assets;
pub mod blogs;
pub mod comments;
pub mod users;
pub mod views;
pub mod vlogs;
pub mod websocket;

use crate::{error::AppError, state::AppState, utils::middleware::request_logging_middleware};
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::{sync::Arc, time::Duration};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{error, warn};

/// REST 接口，挂载在 `/api` 下
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(articles::router())
        .merge(blogs::router())
        .merge(vlogs::router())
        .merge(comments::router())
        .merge(users::router())
}

/// 组装完整的应用路由
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_origin(
            state
                .config
                .allowed_origins()
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin: {}", origin);
                        None
                    }
                })
                .collect::<Vec<_>>(),
        )
        .max_age(Duration::from_secs(state.config.cors_max_age));

    Router::new()
        .route("/health", get(health_check))
        .merge(websocket::router())
        .nest("/api", api_router())
        .merge(views::router())
        .merge(assets::router())
        .fallback(not_found)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check(State(app_state): State<Arc<AppState>>) -> Result<&'static str, AppError> {
    app_state.db.verify_connection().await.map_err(|e| {
        error!("Health check failed: {}", e);
        AppError::ServiceUnavailable("Database unavailable".to_string())
    })?;
    Ok("ok")
}

/// 浏览器请求返回错误页，其余返回 JSON
async fn not_found(
    State(app_state): State<Arc<AppState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let wants_html = headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .map(|accept| accept.contains("text/html"))
        .unwrap_or(false);

    if wants_html {
        match app_state
            .views
            .render_error(404, "Page not found", Some(uri.path()))
        {
            Ok(html) => return (StatusCode::NOT_FOUND, Html(html)).into_response(),
            Err(e) => return e.into_response(),
        }
    }

    AppError::NotFound(format!("Route {} not found", uri.path())).into_response()
}
