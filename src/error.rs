use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use thiserror::Error;
use validator::ValidationErrorsKind;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation error: {0}")]
    ValidatorError(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::ValidatorError(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database(_)
            | AppError::Internal(_)
            | AppError::Serialization(_)
            | AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) | AppError::ValidatorError(_) => "VALIDATION_FAILED",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_)
            | AppError::Serialization(_)
            | AppError::Template(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Message safe to show to clients. Server-side failures are masked.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::ServiceUnavailable(msg) => msg.clone(),
            AppError::ValidatorError(e) => first_validation_message(e),
            AppError::Database(_) => "Database error".to_string(),
            _ => "Internal server error".to_string(),
        }
    }

    fn details(&self) -> Option<Value> {
        match self {
            AppError::ValidatorError(e) => Some(json!(validation_details(e))),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => tracing::error!("Database error: {}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            AppError::Serialization(e) => tracing::error!("Serialization error: {}", e),
            AppError::Template(e) => tracing::error!("Template error: {}", e),
            other => tracing::debug!("Request rejected: {}", other),
        }

        let mut error = json!({
            "code": self.code(),
            "message": self.public_message(),
        });
        if let Some(details) = self.details() {
            error["details"] = details;
        }

        (self.status_code(), Json(json!({ "error": error }))).into_response()
    }
}

// 便利函数，用于创建常见错误
impl AppError {
    pub fn not_found(msg: &str) -> Self {
        Self::NotFound(msg.to_string())
    }

    pub fn bad_request(msg: &str) -> Self {
        Self::BadRequest(msg.to_string())
    }

    pub fn internal(msg: &str) -> Self {
        Self::Internal(msg.to_string())
    }

    pub fn validation(msg: &str) -> Self {
        Self::Validation(msg.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

fn validation_details(errors: &validator::ValidationErrors) -> HashMap<String, Vec<String>> {
    let mut details = HashMap::new();
    collect_validation_messages("", errors, &mut details);
    details
}

// 嵌套结构体与列表的错误以 `VideoFile.VideoFileUrl` / `Items[0].Title` 形式展开
fn collect_validation_messages(
    prefix: &str,
    errors: &validator::ValidationErrors,
    details: &mut HashMap<String, Vec<String>>,
) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages = field_errors.iter().map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid ({})", path, e.code))
                });
                details.entry(path.clone()).or_default().extend(messages);
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_validation_messages(&path, nested, details);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_validation_messages(&format!("{}[{}]", path, index), nested, details);
                }
            }
        }
    }
}

fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = validation_details(errors).into_iter().collect();
    fields.sort();
    fields
        .into_iter()
        .flat_map(|(_, messages)| messages)
        .next()
        .unwrap_or_else(|| "Validation failed".to_string())
}
