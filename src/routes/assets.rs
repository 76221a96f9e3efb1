use crate::{error::AppError, state::AppState};
use axum::{
    extract::Path,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;

const SCRIPTS: &[(&str, &str)] = &[
    ("common", include_str!("../../public/js/common.js")),
    ("index", include_str!("../../public/js/index.js")),
    ("blogs", include_str!("../../public/js/blogs.js")),
    ("vlogs", include_str!("../../public/js/vlogs.js")),
    ("create", include_str!("../../public/js/create.js")),
    ("article-detail", include_str!("../../public/js/article-detail.js")),
    ("comments-realtime", include_str!("../../public/js/comments-realtime.js")),
];

const STYLESHEET: &str = include_str!("../../public/css/style.css");

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/js/:name", get(script))
        .route("/css/style.css", get(stylesheet))
}

pub fn find_script(file_name: &str) -> Option<&'static str> {
    let name = file_name.strip_suffix(".js")?;
    SCRIPTS
        .iter()
        .find(|(script, _)| *script == name)
        .map(|(_, source)| *source)
}

async fn script(Path(file_name): Path<String>) -> Result<Response, AppError> {
    let source = find_script(&file_name)
        .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", file_name)))?;
    Ok((
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        source,
    )
        .into_response())
}

async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}
