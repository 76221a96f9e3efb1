use crate::{
    error::Result,
    models::{
        article::{Article, ArticleType},
        blog::BlogRequest,
    },
    services::{ArticleService, Database},
};
use chrono::Utc;
use sqlx::types::Json;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct BlogService {
    db: Arc<Database>,
    articles: ArticleService,
}

impl BlogService {
    pub fn new(db: Arc<Database>) -> Self {
        let articles = ArticleService::new(db.clone());
        Self { db, articles }
    }

    pub async fn list(&self) -> Result<Vec<Article>> {
        self.articles.list_by_type(ArticleType::Blog).await
    }

    pub async fn get(&self, blog_id: i64) -> Result<Option<Article>> {
        self.articles
            .get_by_id_and_type(blog_id, ArticleType::Blog)
            .await
    }

    /// 在同一事务中创建一篇或多篇博客
    pub async fn create_many(&self, requests: Vec<BlogRequest>) -> Result<Vec<Article>> {
        let now = Utc::now();
        let mut tx = self.db.pool().begin().await?;
        let mut ids = Vec::with_capacity(requests.len());
        for request in requests {
            let article = request.into_new_article();
            ids.push(ArticleService::insert(&mut tx, &article, now).await?);
        }
        tx.commit().await?;

        info!("Created {} blog(s)", ids.len());

        let mut created = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(blog) = self.get(id).await? {
                created.push(blog);
            }
        }
        Ok(created)
    }

    /// 整体更新并重新计算阅读时间；博客不存在时返回 `None`
    pub async fn update(&self, blog_id: i64, request: BlogRequest) -> Result<Option<Article>> {
        debug!("Updating blog: {}", blog_id);

        let readtime = request.readtime();
        let result = sqlx::query(
            r#"UPDATE articles
               SET title = ?, excerpt = ?, content = ?, slug = ?, tags = ?, readtime = ?, updated_at = ?
               WHERE article_id = ? AND article_type = 'blog'"#,
        )
        .bind(&request.title)
        .bind(&request.excerpt)
        .bind(&request.content)
        .bind(&request.slug)
        .bind(Json(&request.tags))
        .bind(readtime)
        .bind(Utc::now())
        .bind(blog_id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(blog_id).await
    }

    /// 删除博客，评论与作者关联随外键级联删除
    pub async fn delete(&self, blog_id: i64) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM articles WHERE article_id = ? AND article_type = 'blog'")
                .bind(blog_id)
                .execute(self.db.pool())
                .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted blog: {}", blog_id);
        }
        Ok(deleted)
    }
}
