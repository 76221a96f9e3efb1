use crate::{
    error::Result,
    models::{
        article::{Article, ArticleType},
        vlog::{CreateVlogRequest, UpdateVlogRequest},
    },
    services::{ArticleService, Database},
};
use chrono::Utc;
use sqlx::types::Json;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct VlogService {
    db: Arc<Database>,
    articles: ArticleService,
}

impl VlogService {
    pub fn new(db: Arc<Database>) -> Self {
        let articles = ArticleService::new(db.clone());
        Self { db, articles }
    }

    pub async fn list(&self) -> Result<Vec<Article>> {
        self.articles.list_by_type(ArticleType::Vlog).await
    }

    pub async fn get(&self, vlog_id: i64) -> Result<Option<Article>> {
        self.articles
            .get_by_id_and_type(vlog_id, ArticleType::Vlog)
            .await
    }

    /// 创建视频博客：视频文件、文章与作者关联写入同一事务
    pub async fn create_many(&self, requests: Vec<CreateVlogRequest>) -> Result<Vec<Article>> {
        let now = Utc::now();
        let mut tx = self.db.pool().begin().await?;
        let mut ids = Vec::with_capacity(requests.len());

        for request in requests {
            let (mut article, user_ids, video_file) = request.into_parts();

            if let Some(video_file) = video_file {
                let result = sqlx::query("INSERT INTO video_files (video_file_url) VALUES (?)")
                    .bind(&video_file.video_file_url)
                    .execute(&mut *tx)
                    .await?;
                article.video_file_id = Some(result.last_insert_rowid());
            }

            let article_id = ArticleService::insert(&mut tx, &article, now).await?;
            ArticleService::link_authors(&mut tx, article_id, &user_ids).await?;
            ids.push(article_id);
        }

        tx.commit().await?;
        info!("Created {} vlog(s)", ids.len());

        let mut created = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(vlog) = self.get(id).await? {
                created.push(vlog);
            }
        }
        Ok(created)
    }

    /// 部分更新；视频博客不存在时返回 `None`
    pub async fn update(&self, vlog_id: i64, request: UpdateVlogRequest) -> Result<Option<Article>> {
        debug!("Updating vlog: {}", vlog_id);

        let result = sqlx::query(
            r#"UPDATE articles
               SET title = COALESCE(?, title),
                   excerpt = COALESCE(?, excerpt),
                   content = COALESCE(?, content),
                   slug = COALESCE(?, slug),
                   tags = COALESCE(?, tags),
                   updated_at = ?
               WHERE article_id = ? AND article_type = 'vlog'"#,
        )
        .bind(request.title)
        .bind(request.excerpt)
        .bind(request.content)
        .bind(request.slug)
        .bind(request.tags.map(Json))
        .bind(Utc::now())
        .bind(vlog_id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(vlog_id).await
    }

    /// 删除视频博客及其视频文件
    pub async fn delete(&self, vlog_id: i64) -> Result<bool> {
        let mut tx = self.db.pool().begin().await?;

        let video_file_id: Option<Option<i64>> = sqlx::query_scalar(
            "SELECT video_file_id FROM articles WHERE article_id = ? AND article_type = 'vlog'",
        )
        .bind(vlog_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(video_file_id) = video_file_id else {
            return Ok(false);
        };

        sqlx::query("DELETE FROM articles WHERE article_id = ?")
            .bind(vlog_id)
            .execute(&mut *tx)
            .await?;

        if let Some(video_file_id) = video_file_id {
            sqlx::query("DELETE FROM video_files WHERE video_file_id = ?")
                .bind(video_file_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        info!("Deleted vlog: {}", vlog_id);
        Ok(true)
    }
}
