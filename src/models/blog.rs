use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::article::{ArticleType, NewArticle};
use crate::utils::{text::estimate_read_time, validation::validate_tags};

/// 创建或整体更新博客的请求体
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct BlogRequest {
    #[validate(length(min = 1, max = 200, message = "\"Title\" length must be between 1 and 200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 500, message = "\"Excerpt\" length must be between 1 and 500 characters"))]
    pub excerpt: String,

    #[validate(length(min = 1, message = "\"Content\" is not allowed to be empty"))]
    pub content: String,

    #[validate(length(min = 1, max = 255, message = "\"Slug\" length must be between 1 and 255 characters"))]
    pub slug: String,

    #[serde(default)]
    #[validate(custom = "validate_tags")]
    pub tags: Vec<String>,
}

impl BlogRequest {
    /// 阅读时间由正文字数计算
    pub fn readtime(&self) -> i64 {
        estimate_read_time(&self.content)
    }

    pub fn into_new_article(self) -> NewArticle {
        let readtime = self.readtime();
        NewArticle {
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            slug: self.slug,
            tags: self.tags,
            article_type: ArticleType::Blog,
            readtime: Some(readtime),
            video_file_id: None,
        }
    }
}
