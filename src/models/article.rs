use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::error::AppError;

/// 文章类型（单表继承的鉴别字段）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleType {
    Blog,
    Vlog,
}

impl ArticleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleType::Blog => "blog",
            ArticleType::Vlog => "vlog",
        }
    }

    /// 用于 "X not found" 之类的错误信息
    pub fn label(&self) -> &'static str {
        match self {
            ArticleType::Blog => "Blog",
            ArticleType::Vlog => "Vlog",
        }
    }
}

impl fmt::Display for ArticleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blog" => Ok(ArticleType::Blog),
            "vlog" => Ok(ArticleType::Vlog),
            other => Err(AppError::Internal(format!("Unknown article type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VideoFile {
    pub video_file_id: i64,
    pub video_file_url: String,
}

/// 文章（博客或视频博客）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Article {
    pub article_id: i64,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub slug: String,
    pub tags: Vec<String>,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub article_type: ArticleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readtime: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_file: Option<VideoFile>,
}

/// `articles LEFT JOIN video_files` 查询的一行
#[derive(Debug, sqlx::FromRow)]
pub struct ArticleRow {
    pub article_id: i64,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub slug: String,
    pub tags: Json<Vec<String>>,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub article_type: String,
    pub readtime: Option<i64>,
    pub video_file_id: Option<i64>,
    pub video_file_url: Option<String>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = AppError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        let video_file = match (row.video_file_id, row.video_file_url) {
            (Some(video_file_id), Some(video_file_url)) => Some(VideoFile {
                video_file_id,
                video_file_url,
            }),
            _ => None,
        };

        Ok(Article {
            article_id: row.article_id,
            title: row.title,
            excerpt: row.excerpt,
            content: row.content,
            slug: row.slug,
            tags: row.tags.0,
            published_at: row.published_at,
            updated_at: row.updated_at,
            article_type: row.article_type.parse()?,
            readtime: row.readtime,
            video_file,
        })
    }
}

/// 写入 `articles` 表所需的字段
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub slug: String,
    pub tags: Vec<String>,
    pub article_type: ArticleType,
    pub readtime: Option<i64>,
    pub video_file_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ArticleQuery {
    #[validate(length(max = 50, message = "\"tag\" length must be less than or equal to 50 characters long"))]
    pub tag: Option<String>,
}
