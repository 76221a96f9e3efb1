pub mod article;
pub mod blog;
pub mod comment;
pub mod database;
pub mod realtime;
pub mod seed;
pub mod user;
pub mod views;
pub mod vlog;
pub mod websocket;

// 重新导出常用类型
pub use article::ArticleService;
pub use blog::BlogService;
pub use comment::CommentService;
pub use database::Database;
pub use realtime::CommentRouter;
pub use seed::Seeder;
pub use user::UserService;
pub use views::ViewRenderer;
pub use vlog::VlogService;
pub use websocket::WebSocketService;
