use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server configuration
    pub server_host: String,
    pub server_port: u16,
    pub environment: String,
    pub log_level: String,
    pub log_format: String,

    // Database configuration
    pub database_url: String,
    pub database_max_connections: u32,

    // CORS configuration
    pub cors_allowed_origins: String,
    pub cors_max_age: u64,

    // Seeding
    pub seed_database: bool,
    pub seed_user_count: usize,
    pub seed_blog_count: usize,
    pub seed_vlog_count: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "blogvlog=debug,tower_http=debug".to_string()),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),

            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://blogvlog.db".to_string()),
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()?,

            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            cors_max_age: env::var("CORS_MAX_AGE")
                .unwrap_or_else(|_| "600".to_string())
                .parse()?,

            seed_database: env::var("SEED_DATABASE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()?,
            seed_user_count: env::var("SEED_USER_COUNT")
                .unwrap_or_else(|_| "5".to_string())
                .parse()?,
            seed_blog_count: env::var("SEED_BLOG_COUNT")
                .unwrap_or_else(|_| "5".to_string())
                .parse()?,
            seed_vlog_count: env::var("SEED_VLOG_COUNT")
                .unwrap_or_else(|_| "5".to_string())
                .parse()?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Origins accepted by the CORS layer; blanks are skipped.
    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .split(',')
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn uses_json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// In-memory defaults, used by tests and local experiments.
impl Default for Config {
    fn default() -> Self {
        Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            environment: "test".to_string(),
            log_level: "blogvlog=debug".to_string(),
            log_format: "pretty".to_string(),
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            cors_allowed_origins: "http://localhost:3000".to_string(),
            cors_max_age: 600,
            seed_database: false,
            seed_user_count: 5,
            seed_blog_count: 5,
            seed_vlog_count: 5,
        }
    }
}
