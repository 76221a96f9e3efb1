pub mod article;
pub mod batch;
pub mod blog;
pub mod comment;
pub mod params;
pub mod user;
pub mod vlog;
pub mod websocket;

pub use article::{Article, ArticleType, VideoFile};
pub use batch::OneOrMany;
pub use comment::Comment;
pub use user::{Role, User};
