use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub roles: Vec<Role>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct UserRow {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub roles: Json<Vec<Role>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            user_id: row.user_id,
            username: row.username,
            email: row.email,
            roles: row.roles.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct CreateUserRequest {
    #[validate(length(min = 2, max = 100, message = "\"Username\" length must be between 2 and 100 characters"))]
    pub username: String,

    #[validate(email(message = "\"Email\" must be a valid email"))]
    pub email: String,

    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[validate(email(message = "\"Email\" must be a valid email"))]
    pub email: String,
}
