use crate::{
    error::Result,
    models::user::{CreateUserRequest, UpdateUserRequest, User, UserRow},
    services::Database,
};
use sqlx::types::Json;
use std::sync::Arc;
use tracing::{debug, info};

/// 用户服务，处理用户相关的业务逻辑
#[derive(Clone)]
pub struct UserService {
    db: Arc<Database>,
}

impl UserService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn get(&self, user_id: i64) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT user_id, username, email, roles FROM users WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(row.map(User::from))
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT user_id, username, email, roles FROM users ORDER BY user_id",
        )
        .fetch_all(self.db.pool())
        .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    pub async fn create(&self, request: CreateUserRequest) -> Result<User> {
        let result = sqlx::query("INSERT INTO users (username, email, roles) VALUES (?, ?, ?)")
            .bind(&request.username)
            .bind(&request.email)
            .bind(Json(&request.roles))
            .execute(self.db.pool())
            .await?;

        let user = User {
            user_id: result.last_insert_rowid(),
            username: request.username,
            email: request.email,
            roles: request.roles,
        };
        info!("Created user {} ({})", user.user_id, user.username);
        Ok(user)
    }

    /// 更新邮箱；用户不存在时返回 `None`
    pub async fn update(&self, user_id: i64, request: UpdateUserRequest) -> Result<Option<User>> {
        debug!("Updating email of user {}", user_id);
        let result = sqlx::query("UPDATE users SET email = ? WHERE user_id = ?")
            .bind(&request.email)
            .bind(user_id)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(user_id).await
    }

    /// 删除用户，评论与作者关联级联删除
    pub async fn delete(&self, user_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
            .bind(user_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;

    async fn service() -> UserService {
        UserService::new(Arc::new(Database::in_memory().await.unwrap()))
    }

    fn alice() -> CreateUserRequest {
        CreateUserRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            roles: vec![Role::User, Role::Admin],
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = service().await;
        let created = service.create(alice()).await.unwrap();

        let fetched = service.get(created.user_id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.roles, vec![Role::User, Role::Admin]);
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_email() {
        let service = service().await;
        let created = service.create(alice()).await.unwrap();

        let updated = service
            .update(
                created.user_id,
                UpdateUserRequest {
                    email: "new@example.com".to_string(),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.email, "new@example.com");
        assert_eq!(updated.username, "alice");

        let missing = service
            .update(
                99,
                UpdateUserRequest {
                    email: "x@example.com".to_string(),
                },
            )
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let service = service().await;
        let created = service.create(alice()).await.unwrap();

        assert!(service.delete(created.user_id).await.unwrap());
        assert!(!service.delete(created.user_id).await.unwrap());
    }
}
