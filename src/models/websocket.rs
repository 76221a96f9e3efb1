use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// 单个 WebSocket 连接的标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(Uuid);

impl ChannelId {
    pub fn new() -> Self {
        ChannelId(Uuid::new_v4())
    }
}

impl Default for ChannelId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn_{}", self.0)
    }
}

/// 客户端 → 服务端事件，帧格式为 `{"event": ..., "data": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "join-article", deserialize_with = "deserialize_article_id")]
    JoinArticle(i64),

    #[serde(rename = "leave-article", deserialize_with = "deserialize_article_id")]
    LeaveArticle(i64),

    #[serde(rename = "comment:created")]
    CommentCreated(CommentCreated),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentCreated {
    pub comment: Value,
}

/// 服务端 → 客户端事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "comment:new")]
    CommentNew(Value),

    #[serde(rename = "comment:error")]
    CommentError(SocketError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocketError {
    pub message: String,
    pub error: String,
}

impl ServerEvent {
    pub fn error(message: impl Into<String>, error: impl Into<String>) -> Self {
        ServerEvent::CommentError(SocketError {
            message: message.into(),
            error: error.into(),
        })
    }
}

/// 文章 ID 可以是整数或整数字符串，`42` 与 `"42"` 指向同一篇文章
pub fn parse_article_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn deserialize_article_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_article_id(&value)
        .ok_or_else(|| de::Error::custom(format!("invalid article id: {}", value)))
}

/// 读取已序列化评论中的 `ArticleId`
pub fn article_id_of(comment: &Value) -> Option<i64> {
    comment.get("ArticleId").and_then(parse_article_id)
}
