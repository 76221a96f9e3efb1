use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::article::{ArticleType, NewArticle};
use crate::utils::validation::{validate_tags, validate_user_ids};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct VideoFileInput {
    #[validate(url(message = "\"VideoFileUrl\" must be a valid uri"))]
    pub video_file_url: String,
}

/// 创建视频博客的请求体
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct CreateVlogRequest {
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

    #[serde(default)]
    #[validate(custom = "validate_user_ids")]
    pub user_ids: Vec<i64>,

    #[validate]
    pub video_file: Option<VideoFileInput>,
}

impl CreateVlogRequest {
    /// 拆分为文章字段、作者 ID 与视频文件
    pub fn into_parts(self) -> (NewArticle, Vec<i64>, Option<VideoFileInput>) {
        let article = NewArticle {
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            slug: self.slug,
            tags: self.tags,
            article_type: ArticleType::Vlog,
            readtime: None,
            video_file_id: None,
        };
        (article, self.user_ids, self.video_file)
    }
}

/// 部分更新：缺省字段保持不变
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct UpdateVlogRequest {
    #[validate(length(min = 5, max = 200, message = "\"Title\" length must be between 5 and 200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 20, max = 500, message = "\"Excerpt\" length must be between 20 and 500 characters"))]
    pub excerpt: Option<String>,

    #[validate(length(min = 50, message = "\"Content\" length must be at least 50 characters long"))]
    pub content: Option<String>,

    #[validate(length(min = 1, max = 255, message = "\"Slug\" length must be between 1 and 255 characters"))]
    pub slug: Option<String>,

    #[validate(custom = "validate_tags")]
    pub tags: Option<Vec<String>>,
}
