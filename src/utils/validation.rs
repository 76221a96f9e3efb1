use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path},
    http::{request::Parts, Request},
    Json,
};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// 单个标签的最大长度
pub const MAX_TAG_LENGTH: usize = 50;

fn error_with_message(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::from(message));
    error
}

/// 每个标签非空且不超过 50 个字符
pub fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if let Some(index) = tags.iter().position(|tag| tag.is_empty()) {
        return Err(error_with_message(
            "tag_empty",
            format!("\"Tags[{}]\" is not allowed to be empty", index),
        ));
    }
    match tags
        .iter()
        .position(|tag| tag.chars().count() > MAX_TAG_LENGTH)
    {
        Some(index) => Err(error_with_message(
            "tag_length",
            format!(
                "\"Tags[{}]\" length must be less than or equal to {} characters long",
                index, MAX_TAG_LENGTH
            ),
        )),
        None => Ok(()),
    }
}

/// 作者 ID 必须为正整数
pub fn validate_user_ids(user_ids: &[i64]) -> Result<(), ValidationError> {
    match user_ids.iter().position(|id| *id <= 0) {
        Some(index) => Err(error_with_message(
            "positive",
            format!("\"UserIds[{}]\" must be a positive number", index),
        )),
        None => Ok(()),
    }
}

/// JSON 请求体提取器：反序列化后立即执行 `Validate`
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S, B> FromRequest<S, B> for ValidJson<T>
where
    T: Validate,
    Json<T>: FromRequest<S, B, Rejection = JsonRejection>,
    S: Send + Sync,
    B: Send + 'static,
{
    type Rejection = AppError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::JsonDataError(e) => AppError::Validation(e.body_text()),
                other => AppError::BadRequest(other.body_text()),
            })?;
        value.validate()?;
        Ok(ValidJson(value))
    }
}

/// 路径参数提取器：解析失败或校验失败都返回 400
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidPath(value))
    }
}
