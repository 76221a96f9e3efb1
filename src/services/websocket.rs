use crate::{
    models::websocket::{ChannelId, ClientEvent, CommentCreated},
    services::realtime::CommentRouter,
};
use axum::extract::ws::{Message, WebSocket};
use futures::{sink::SinkExt, stream::StreamExt};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// WebSocket 连接管理：把套接字事件翻译成评论路由上的操作
#[derive(Clone)]
pub struct WebSocketService {
    router: Arc<CommentRouter>,
}

impl WebSocketService {
    pub fn new(router: Arc<CommentRouter>) -> Self {
        Self { router }
    }

    /// 处理新的WebSocket连接，直到任一方向结束
    pub async fn handle_connection(&self, websocket: WebSocket) {
        let (channel, mut rx) = self.router.connect();
        let (mut ws_tx, mut ws_rx) = websocket.split();

        // 处理发送消息任务
        let mut send_task = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                match serde_json::to_string(&event) {
                    Ok(text) => {
                        if let Err(e) = ws_tx.send(Message::Text(text)).await {
                            warn!("Failed to send WebSocket message to {}: {}", channel, e);
                            break;
                        }
                    }
                    Err(e) => error!("Failed to serialize event: {}", e),
                }
            }
            debug!("Send task ended for {}", channel);
        });

        // 处理接收消息任务
        let service = self.clone();
        let mut receive_task = tokio::spawn(async move {
            while let Some(msg_result) = ws_rx.next().await {
                match msg_result {
                    Ok(Message::Text(text)) => service.handle_incoming_message(channel, &text),
                    Ok(Message::Binary(data)) => {
                        debug!("Ignoring binary message of {} bytes from {}", data.len(), channel);
                    }
                    Ok(Message::Close(_)) => {
                        info!("WebSocket connection closed: {}", channel);
                        break;
                    }
                    Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {}
                    Err(e) => {
                        warn!("WebSocket error for {}: {}", channel, e);
                        break;
                    }
                }
            }
            debug!("Receive task ended for {}", channel);
        });

        tokio::select! {
            _ = &mut send_task => receive_task.abort(),
            _ = &mut receive_task => send_task.abort(),
        }

        self.router.disconnect(channel);
        debug!("Router state after disconnect: {:?}", self.router.stats());
    }

    /// 解析一帧客户端事件并执行；无法解析时向发送方回报错误
    pub fn handle_incoming_message(&self, channel: ChannelId, text: &str) {
        match serde_json::from_str::<ClientEvent>(text) {
            Ok(ClientEvent::JoinArticle(article_id)) => {
                self.router.join(channel, article_id);
            }
            Ok(ClientEvent::LeaveArticle(article_id)) => {
                self.router.leave(channel, article_id);
            }
            Ok(ClientEvent::CommentCreated(CommentCreated { comment })) => {
                self.router.announce_from(channel, comment);
            }
            Err(e) => {
                warn!("Invalid event from {}: {}", channel, e);
                self.router
                    .report_error(channel, "Invalid event", &e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::websocket::ServerEvent;
    use serde_json::json;

    #[test]
    fn test_frames_drive_the_router() {
        let router = Arc::new(CommentRouter::new());
        let service = WebSocketService::new(router.clone());
        let (x, mut rx) = router.connect();

        service.handle_incoming_message(x, r#"{"event":"join-article","data":42}"#);
        assert_eq!(router.subscriber_count(42), 1);

        service.handle_incoming_message(
            x,
            r#"{"event":"comment:created","data":{"comment":{"ArticleId":42,"CommentId":1}}}"#,
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            ServerEvent::CommentNew(json!({"ArticleId": 42, "CommentId": 1}))
        );

        service.handle_incoming_message(x, r#"{"event":"leave-article","data":42}"#);
        assert_eq!(router.subscriber_count(42), 0);
    }

    #[test]
    fn test_garbage_frame_reports_error_to_sender() {
        let router = Arc::new(CommentRouter::new());
        let service = WebSocketService::new(router.clone());
        let (x, mut rx) = router.connect();

        service.handle_incoming_message(x, "not json");
        assert!(matches!(rx.try_recv().unwrap(), ServerEvent::CommentError(_)));
    }

    #[test]
    fn test_non_integer_article_id_reports_error() {
        let router = Arc::new(CommentRouter::new());
        let service = WebSocketService::new(router.clone());
        let (x, mut rx) = router.connect();

        service.handle_incoming_message(
            x,
            r#"{"event":"comment:created","data":{"comment":{"ArticleId":"forty-two"}}}"#,
        );
        match rx.try_recv().unwrap() {
            ServerEvent::CommentError(error) => {
                assert_eq!(error.message, "Failed to broadcast comment");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_string_and_number_ids_share_a_room() {
        let router = Arc::new(CommentRouter::new());
        let service = WebSocketService::new(router.clone());
        let (x, mut x_rx) = router.connect();
        let (y, mut y_rx) = router.connect();

        service.handle_incoming_message(x, r#"{"event":"join-article","data":"42"}"#);
        service.handle_incoming_message(y, r#"{"event":"join-article","data":42}"#);
        assert_eq!(router.subscriber_count(42), 2);

        service.handle_incoming_message(
            y,
            r#"{"event":"comment:created","data":{"comment":{"ArticleId":"42","CommentId":3}}}"#,
        );
        let expected = ServerEvent::CommentNew(json!({"ArticleId": "42", "CommentId": 3}));
        assert_eq!(x_rx.try_recv().unwrap(), expected);
        assert_eq!(y_rx.try_recv().unwrap(), expected);
    }
}
