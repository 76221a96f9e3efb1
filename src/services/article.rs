use crate::{
    error::{AppError, Result},
    models::article::{Article, ArticleRow, ArticleType, NewArticle},
    services::Database,
};
use chrono::{DateTime, Utc};
use sqlx::{types::Json, SqliteConnection};
use std::sync::Arc;
use tracing::debug;

/// 文章及其视频文件的查询列
const SELECT_ARTICLES: &str = r#"
    SELECT a.article_id, a.title, a.excerpt, a.content, a.slug, a.tags,
           a.published_at, a.updated_at, a.article_type, a.readtime,
           a.video_file_id, v.video_file_url
    FROM articles a
    LEFT JOIN video_files v ON v.video_file_id = a.video_file_id"#;

/// 两种文章共用的读取与写入
#[derive(Clone)]
pub struct ArticleService {
    db: Arc<Database>,
}

impl ArticleService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// 获取全部文章
    pub async fn list(&self) -> Result<Vec<Article>> {
        let sql = format!("{} ORDER BY a.article_id", SELECT_ARTICLES);
        let rows = sqlx::query_as::<_, ArticleRow>(&sql)
            .fetch_all(self.db.pool())
            .await?;
        rows.into_iter().map(Article::try_from).collect()
    }

    /// 获取包含指定标签的文章
    pub async fn list_by_tag(&self, tag: &str) -> Result<Vec<Article>> {
        debug!("Filtering articles by tag: {}", tag);
        let sql = format!(
            "{} WHERE EXISTS (SELECT 1 FROM json_each(a.tags) WHERE json_each.value = ?) ORDER BY a.article_id",
            SELECT_ARTICLES
        );
        let rows = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(tag)
            .fetch_all(self.db.pool())
            .await?;
        rows.into_iter().map(Article::try_from).collect()
    }

    pub async fn list_by_type(&self, article_type: ArticleType) -> Result<Vec<Article>> {
        let sql = format!(
            "{} WHERE a.article_type = ? ORDER BY a.article_id",
            SELECT_ARTICLES
        );
        let rows = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(article_type.as_str())
            .fetch_all(self.db.pool())
            .await?;
        rows.into_iter().map(Article::try_from).collect()
    }

    pub async fn get_by_id(&self, article_id: i64) -> Result<Option<Article>> {
        let sql = format!("{} WHERE a.article_id = ?", SELECT_ARTICLES);
        let row = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(article_id)
            .fetch_optional(self.db.pool())
            .await?;
        row.map(Article::try_from).transpose()
    }

    /// 按 ID 获取指定类型的文章；类型不符视为不存在
    pub async fn get_by_id_and_type(
        &self,
        article_id: i64,
        article_type: ArticleType,
    ) -> Result<Option<Article>> {
        let sql = format!(
            "{} WHERE a.article_id = ? AND a.article_type = ?",
            SELECT_ARTICLES
        );
        let row = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(article_id)
            .bind(article_type.as_str())
            .fetch_optional(self.db.pool())
            .await?;
        row.map(Article::try_from).transpose()
    }

    /// slug 不唯一时返回最早的一篇
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Article>> {
        let sql = format!(
            "{} WHERE a.slug = ? ORDER BY a.article_id LIMIT 1",
            SELECT_ARTICLES
        );
        let row = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(slug)
            .fetch_optional(self.db.pool())
            .await?;
        row.map(Article::try_from).transpose()
    }

    pub async fn exists(&self, article_id: i64) -> Result<bool> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT article_id FROM articles WHERE article_id = ?")
                .bind(article_id)
                .fetch_optional(self.db.pool())
                .await?;
        Ok(found.is_some())
    }

    /// 文章关联作者的用户名
    pub async fn authors(&self, article_id: i64) -> Result<Vec<String>> {
        let usernames = sqlx::query_scalar(
            r#"SELECT u.username FROM user_articles ua
               JOIN users u ON u.user_id = ua.user_id
               WHERE ua.article_id = ?
               ORDER BY u.user_id"#,
        )
        .bind(article_id)
        .fetch_all(self.db.pool())
        .await?;
        Ok(usernames)
    }

    pub async fn existing_slugs(&self) -> Result<Vec<String>> {
        let slugs = sqlx::query_scalar("SELECT slug FROM articles")
            .fetch_all(self.db.pool())
            .await?;
        Ok(slugs)
    }

    /// 在独立事务中关联作者
    pub async fn add_authors(&self, article_id: i64, user_ids: &[i64]) -> Result<()> {
        let mut tx = self.db.pool().begin().await?;
        Self::link_authors(&mut tx, article_id, user_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    /// 关联作者；任一用户不存在时返回 404
    pub(crate) async fn link_authors(
        conn: &mut SqliteConnection,
        article_id: i64,
        user_ids: &[i64],
    ) -> Result<()> {
        for user_id in user_ids {
            let exists: Option<i64> = sqlx::query_scalar("SELECT user_id FROM users WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(&mut *conn)
                .await?;
            if exists.is_none() {
                return Err(AppError::NotFound(format!("User {} not found", user_id)));
            }

            sqlx::query("INSERT OR IGNORE INTO user_articles (user_id, article_id) VALUES (?, ?)")
                .bind(user_id)
                .bind(article_id)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }

    /// 在给定连接（通常是事务）上插入文章，返回新 ID
    pub(crate) async fn insert(
        conn: &mut SqliteConnection,
        article: &NewArticle,
        now: DateTime<Utc>,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"INSERT INTO articles
                (title, excerpt, content, slug, tags, published_at, updated_at, article_type, readtime, video_file_id)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&article.title)
        .bind(&article.excerpt)
        .bind(&article.content)
        .bind(&article.slug)
        .bind(Json(&article.tags))
        .bind(now)
        .bind(now)
        .bind(article.article_type.as_str())
        .bind(article.readtime)
        .bind(article.video_file_id)
        .execute(&mut *conn)
        .await?;

        Ok(result.last_insert_rowid())
    }
}
