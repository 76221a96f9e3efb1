use crate::{
    config::Config,
    error::Result,
    services::{
        ArticleService, BlogService, CommentRouter, CommentService, Database, UserService,
        ViewRenderer, VlogService, WebSocketService,
    },
};
use std::sync::Arc;

/// 应用程序的共享状态
/// 包含所有服务和配置的引用
pub struct AppState {
    /// 应用配置
    pub config: Config,

    /// 数据库连接
    pub db: Arc<Database>,

    /// 文章服务（两种类型的只读查询）
    pub article_service: ArticleService,

    /// 博客服务
    pub blog_service: BlogService,

    /// 视频博客服务
    pub vlog_service: VlogService,

    /// 评论服务
    pub comment_service: CommentService,

    /// 用户服务
    pub user_service: UserService,

    /// 页面模板
    pub views: ViewRenderer,

    /// 实时评论路由
    pub comment_router: Arc<CommentRouter>,

    /// WebSocket 连接处理
    pub websocket_service: WebSocketService,
}

impl AppState {
    pub fn new(config: Config, db: Arc<Database>) -> Result<Arc<Self>> {
        let comment_router = Arc::new(CommentRouter::new());

        Ok(Arc::new(Self {
            article_service: ArticleService::new(db.clone()),
            blog_service: BlogService::new(db.clone()),
            vlog_service: VlogService::new(db.clone()),
            comment_service: CommentService::new(db.clone()),
            user_service: UserService::new(db.clone()),
            views: ViewRenderer::new()?,
            websocket_service: WebSocketService::new(comment_router.clone()),
            comment_router,
            config,
            db,
        }))
    }
}
