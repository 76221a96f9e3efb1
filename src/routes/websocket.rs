use crate::state::AppState;
use axum::{
    extract::{ws::WebSocketUpgrade, State},
    response::Response,
    routing::get,
    Router,
};
use std::sync::Arc;
use tracing::debug;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/ws", get(websocket_handler))
}

/// WebSocket连接处理器
async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    debug!("WebSocket upgrade request");

    let service = state.websocket_service.clone();
    ws.on_upgrade(move |socket| async move { service.handle_connection(socket).await })
}
