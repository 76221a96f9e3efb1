use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use validator::Validate;

use crate::models::user::{Role, User};

/// 评论，附带预加载的作者
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Comment {
    pub comment_id: i64,
    pub content: String,
    pub published_at: DateTime<Utc>,
    pub article_id: i64,
    pub user_id: i64,
    pub user: User,
}

/// `comments JOIN users` 查询的一行
#[derive(Debug, sqlx::FromRow)]
pub struct CommentRow {
    pub comment_id: i64,
    pub content: String,
    pub published_at: DateTime<Utc>,
    pub article_id: i64,
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub roles: Json<Vec<Role>>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            comment_id: row.comment_id,
            content: row.content,
            published_at: row.published_at,
            article_id: row.article_id,
            user_id: row.user_id,
            user: User {
                user_id: row.user_id,
                username: row.username,
                email: row.email,
                roles: row.roles.0,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct CreateCommentRequest {
    #[validate(range(min = 1, message = "\"UserId\" must be a positive number"))]
    pub user_id: i64,

    #[validate(length(min = 2, max = 1000, message = "\"Content\" length must be between 2 and 1000 characters"))]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 2, max = 1000, message = "\"Content\" length must be between 2 and 1000 characters"))]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_comment_limits() {
        let ok = CreateCommentRequest {
            user_id: 1,
            content: "hi".to_string(),
        };
        assert!(ok.validate().is_ok());

        let short = CreateCommentRequest {
            user_id: 1,
            content: "h".to_string(),
        };
        assert!(short.validate().is_err());

        let bad_user = CreateCommentRequest {
            user_id: 0,
            content: "hello".to_string(),
        };
        assert!(bad_user.validate().is_err());

        let long = UpdateCommentRequest {
            content: "x".repeat(1001),
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_row_embeds_user() {
        let comment = Comment::from(CommentRow {
            comment_id: 5,
            content: "Nice".to_string(),
            published_at: Utc::now(),
            article_id: 42,
            user_id: 9,
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            roles: Json(vec![Role::User]),
        });

        let value = serde_json::to_value(&comment).unwrap();
        assert_eq!(value["CommentId"], json!(5));
        assert_eq!(value["ArticleId"], json!(42));
        assert_eq!(value["User"]["Username"], json!("bob"));
    }
}
