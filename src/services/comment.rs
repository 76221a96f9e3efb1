use crate::{
    error::{AppError, Result},
    models::comment::{Comment, CommentRow, CreateCommentRequest, UpdateCommentRequest},
    services::Database,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

const SELECT_COMMENTS: &str = r#"
    SELECT c.comment_id, c.content, c.published_at, c.article_id, c.user_id,
           u.username, u.email, u.roles
    FROM comments c
    JOIN users u ON u.user_id = c.user_id"#;

#[derive(Clone)]
pub struct CommentService {
    db: Arc<Database>,
}

impl CommentService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// 获取文章的评论，按创建顺序从早到晚
    pub async fn list_for_article(&self, article_id: i64) -> Result<Vec<Comment>> {
        let sql = format!(
            "{} WHERE c.article_id = ? ORDER BY c.comment_id",
            SELECT_COMMENTS
        );
        let rows = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(article_id)
            .fetch_all(self.db.pool())
            .await?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    /// 获取属于指定文章的评论
    pub async fn get(&self, article_id: i64, comment_id: i64) -> Result<Option<Comment>> {
        let sql = format!(
            "{} WHERE c.comment_id = ? AND c.article_id = ?",
            SELECT_COMMENTS
        );
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(comment_id)
            .bind(article_id)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(row.map(Comment::from))
    }

    /// 创建评论；文章或用户不存在时返回 404
    pub async fn create(&self, article_id: i64, request: CreateCommentRequest) -> Result<Comment> {
        debug!("Creating comment on article {} by user {}", article_id, request.user_id);

        let article: Option<i64> =
            sqlx::query_scalar("SELECT article_id FROM articles WHERE article_id = ?")
                .bind(article_id)
                .fetch_optional(self.db.pool())
                .await?;
        if article.is_none() {
            return Err(AppError::not_found("Article not found"));
        }

        let user: Option<i64> = sqlx::query_scalar("SELECT user_id FROM users WHERE user_id = ?")
            .bind(request.user_id)
            .fetch_optional(self.db.pool())
            .await?;
        if user.is_none() {
            return Err(AppError::not_found("User not found"));
        }

        let result = sqlx::query(
            "INSERT INTO comments (content, published_at, article_id, user_id) VALUES (?, ?, ?, ?)",
        )
        .bind(&request.content)
        .bind(Utc::now())
        .bind(article_id)
        .bind(request.user_id)
        .execute(self.db.pool())
        .await?;

        let comment_id = result.last_insert_rowid();
        info!("Created comment {} on article {}", comment_id, article_id);

        self.get(article_id, comment_id)
            .await?
            .ok_or_else(|| AppError::internal("Created comment could not be loaded"))
    }

    pub async fn update(
        &self,
        article_id: i64,
        comment_id: i64,
        request: UpdateCommentRequest,
    ) -> Result<Option<Comment>> {
        let result =
            sqlx::query("UPDATE comments SET content = ? WHERE comment_id = ? AND article_id = ?")
                .bind(&request.content)
                .bind(comment_id)
                .bind(article_id)
                .execute(self.db.pool())
                .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(article_id, comment_id).await
    }

    pub async fn delete(&self, article_id: i64, comment_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE comment_id = ? AND article_id = ?")
            .bind(comment_id)
            .bind(article_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
