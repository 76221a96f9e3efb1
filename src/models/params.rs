use serde::Deserialize;
use validator::Validate;

/// `/:id` 路径参数
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct IdParam {
    #[validate(range(min = 1, message = "\"id\" must be a positive number"))]
    pub id: i64,
}

/// `/api/articles/:id/comments/:comment_id`
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct CommentPathParams {
    #[validate(range(min = 1, message = "\"id\" must be a positive number"))]
    pub id: i64,
    #[validate(range(min = 1, message = "\"comment_id\" must be a positive number"))]
    pub comment_id: i64,
}

/// `/api/articles/slug/:slug`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SlugParam {
    #[validate(length(
        min = 1,
        max = 128,
        message = "\"slug\" length must be less than or equal to 128 characters long"
    ))]
    pub slug: String,
}
