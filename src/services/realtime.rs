use crate::models::websocket::{article_id_of, ChannelId, ServerEvent};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub type EventSender = mpsc::UnboundedSender<ServerEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<ServerEvent>;

/// 已连接通道的状态
#[derive(Debug)]
struct ChannelEntry {
    tx: EventSender,
    articles: HashSet<i64>,
    connected_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Rooms {
    channels: HashMap<ChannelId, ChannelEntry>,
    // 文章 ID → 订阅的通道
    subscribers: HashMap<i64, HashSet<ChannelId>>,
}

impl Rooms {
    fn unsubscribe(&mut self, channel: ChannelId, article_id: i64) {
        if let Some(set) = self.subscribers.get_mut(&article_id) {
            set.remove(&channel);
            if set.is_empty() {
                self.subscribers.remove(&article_id);
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RouterStats {
    pub connections: usize,
    pub rooms: usize,
    pub subscriptions: usize,
    pub oldest_connection: Option<DateTime<Utc>>,
}

/// 评论实时路由：按文章 ID 把新评论推送给正在查看该文章的通道。
///
/// 不持久化、不去重、不保证顺序。每个操作在同一把锁内原子完成，
/// 消息通过每个通道各自的无界队列发送，发送失败直接忽略。
#[derive(Debug, Default)]
pub struct CommentRouter {
    rooms: RwLock<Rooms>,
}

impl CommentRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册新通道，返回其 ID 与出站事件接收端
    pub fn connect(&self) -> (ChannelId, EventReceiver) {
        let channel = ChannelId::new();
        let (tx, rx) = mpsc::unbounded_channel();
        self.rooms.write().channels.insert(
            channel,
            ChannelEntry {
                tx,
                articles: HashSet::new(),
                connected_at: Utc::now(),
            },
        );
        info!("Channel connected: {}", channel);
        (channel, rx)
    }

    /// 订阅文章；重复订阅无副作用。未连接的通道返回 `false`
    pub fn join(&self, channel: ChannelId, article_id: i64) -> bool {
        let mut rooms = self.rooms.write();
        let Some(entry) = rooms.channels.get_mut(&channel) else {
            debug!("Ignoring join from unknown channel {}", channel);
            return false;
        };
        if !entry.articles.insert(article_id) {
            return true;
        }
        rooms.subscribers.entry(article_id).or_default().insert(channel);
        info!("Channel {} joined article-{}", channel, article_id);
        true
    }

    /// 取消订阅；未订阅时为空操作
    pub fn leave(&self, channel: ChannelId, article_id: i64) {
        let mut rooms = self.rooms.write();
        let removed = rooms
            .channels
            .get_mut(&channel)
            .map(|entry| entry.articles.remove(&article_id))
            .unwrap_or(false);
        if removed {
            rooms.unsubscribe(channel, article_id);
            info!("Channel {} left article-{}", channel, article_id);
        }
    }

    /// 把评论推送给文章的所有订阅者（包括发起者），返回成功投递数
    pub fn announce(&self, article_id: i64, comment: Value) -> usize {
        let rooms = self.rooms.read();
        let Some(subscribers) = rooms.subscribers.get(&article_id) else {
            debug!("No subscribers for article-{}", article_id);
            return 0;
        };

        let delivered = subscribers
            .iter()
            .filter_map(|channel| rooms.channels.get(channel))
            .filter(|entry| entry.tx.send(ServerEvent::CommentNew(comment.clone())).is_ok())
            .count();

        info!(
            "Broadcast comment to article-{}: {}/{} channel(s)",
            article_id,
            delivered,
            subscribers.len()
        );
        delivered
    }

    /// 处理客户端发来的评论通知；缺少 `ArticleId` 时只向发起者回报错误
    pub fn announce_from(&self, origin: ChannelId, comment: Value) -> usize {
        match article_id_of(&comment) {
            Some(article_id) => self.announce(article_id, comment),
            None => {
                warn!("Malformed comment announcement from {}", origin);
                self.report_error(
                    origin,
                    "Failed to broadcast comment",
                    "comment.ArticleId must be an integer or integer string",
                );
                0
            }
        }
    }

    /// 只向指定通道发送错误事件
    pub fn report_error(&self, channel: ChannelId, message: &str, error: &str) {
        let rooms = self.rooms.read();
        if let Some(entry) = rooms.channels.get(&channel) {
            let _ = entry.tx.send(ServerEvent::error(message, error));
        }
    }

    /// 移除通道及其全部订阅，返回离开的文章数
    pub fn disconnect(&self, channel: ChannelId) -> usize {
        let mut rooms = self.rooms.write();
        let Some(entry) = rooms.channels.remove(&channel) else {
            return 0;
        };
        for article_id in &entry.articles {
            rooms.unsubscribe(channel, *article_id);
        }
        info!(
            "Channel disconnected: {} (left {} article(s))",
            channel,
            entry.articles.len()
        );
        entry.articles.len()
    }

    pub fn is_connected(&self, channel: ChannelId) -> bool {
        self.rooms.read().channels.contains_key(&channel)
    }

    pub fn subscriber_count(&self, article_id: i64) -> usize {
        self.rooms
            .read()
            .subscribers
            .get(&article_id)
            .map_or(0, HashSet::len)
    }

    pub fn stats(&self) -> RouterStats {
        let rooms = self.rooms.read();
        RouterStats {
            connections: rooms.channels.len(),
            rooms: rooms.subscribers.len(),
            subscriptions: rooms.subscribers.values().map(HashSet::len).sum(),
            oldest_connection: rooms.channels.values().map(|e| e.connected_at).min(),
        }
    }
}
