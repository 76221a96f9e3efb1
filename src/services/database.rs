use crate::config::Config;
use crate::error::{AppError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, error, info};

/// 建表语句，按外键依赖顺序执行
const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS users (
        user_id INTEGER PRIMARY KEY AUTOINCREMENT,
        username VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL,
        roles TEXT NOT NULL DEFAULT '[]'
    )"#,
    r#"CREATE TABLE IF NOT EXISTS video_files (
        video_file_id INTEGER PRIMARY KEY AUTOINCREMENT,
        video_file_url VARCHAR(2048) NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS articles (
        article_id INTEGER PRIMARY KEY AUTOINCREMENT,
        title VARCHAR(256) NOT NULL,
        excerpt VARCHAR(1024) NOT NULL,
        content TEXT NOT NULL,
        slug VARCHAR(255) NOT NULL,
        tags TEXT NOT NULL DEFAULT '[]',
        published_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        article_type VARCHAR(16) NOT NULL CHECK (article_type IN ('blog', 'vlog')),
        readtime INTEGER,
        video_file_id INTEGER REFERENCES video_files(video_file_id) ON DELETE SET NULL
    )"#,
    "CREATE INDEX IF NOT EXISTS idx_articles_slug ON articles(slug)",
    "CREATE INDEX IF NOT EXISTS idx_articles_type ON articles(article_type)",
    r#"CREATE TABLE IF NOT EXISTS comments (
        comment_id INTEGER PRIMARY KEY AUTOINCREMENT,
        content TEXT NOT NULL,
        published_at TEXT NOT NULL,
        article_id INTEGER NOT NULL REFERENCES articles(article_id) ON DELETE CASCADE,
        user_id INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE
    )"#,
    "CREATE INDEX IF NOT EXISTS idx_comments_article ON comments(article_id)",
    r#"CREATE TABLE IF NOT EXISTS user_articles (
        user_id INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
        article_id INTEGER NOT NULL REFERENCES articles(article_id) ON DELETE CASCADE,
        PRIMARY KEY (user_id, article_id)
    )"#,
];

/// 可被统计行数的表
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Users,
    Articles,
    Comments,
}

impl Table {
    fn name(&self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Articles => "articles",
            Table::Comments => "comments",
        }
    }
}

/// 数据库服务
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// 创建连接池；每个连接都开启外键约束
    pub async fn connect(config: &Config) -> Result<Self> {
        info!("Initializing database connection to {}", config.database_url);

        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // 内存数据库只在单个连接内存在，连接不能被回收
        let in_memory = config.database_url.contains(":memory:");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.database_max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        Ok(Self { pool })
    }

    /// 连接内存数据库并建表，测试使用
    pub async fn in_memory() -> Result<Self> {
        let db = Self::connect(&Config::default()).await?;
        db.migrate().await?;
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// 验证数据库连接
    pub async fn verify_connection(&self) -> Result<()> {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => {
                debug!("Database connection verified");
                Ok(())
            }
            Err(e) => {
                error!("Failed to verify database connection: {}", e);
                Err(AppError::from(e))
            }
        }
    }

    /// 创建缺失的表（可重复执行）
    pub async fn migrate(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Database schema is up to date");
        Ok(())
    }

    pub async fn count(&self, table: Table) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.name());
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}
