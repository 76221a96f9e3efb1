use crate::error::{AppError, Result};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

/// 编译进二进制的页面模板
const TEMPLATES: &[(&str, &str)] = &[
    ("header", include_str!("../../templates/partials/header.hbs")),
    ("footer", include_str!("../../templates/partials/footer.hbs")),
    ("comments", include_str!("../../templates/partials/comments.hbs")),
    ("index", include_str!("../../templates/index.hbs")),
    ("blogs", include_str!("../../templates/blogs.hbs")),
    ("vlogs", include_str!("../../templates/vlogs.hbs")),
    ("create", include_str!("../../templates/create.hbs")),
    ("article-detail", include_str!("../../templates/article-detail.hbs")),
    ("error", include_str!("../../templates/error.hbs")),
];

/// 页面渲染器
pub struct ViewRenderer {
    registry: Handlebars<'static>,
}

impl ViewRenderer {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);

        for (name, source) in TEMPLATES {
            registry
                .register_template_string(name, *source)
                .map_err(|e| AppError::Internal(format!("Invalid template {}: {}", name, e)))?;
        }

        debug!("Registered {} templates", TEMPLATES.len());
        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String> {
        Ok(self.registry.render(name, context)?)
    }

    /// 错误页
    pub fn render_error(&self, status: u16, message: &str, path: Option<&str>) -> Result<String> {
        self.render(
            "error",
            &json!({
                "title": format!("{} - Error", status),
                "status": status,
                "message": message,
                "path": path,
                "scripts": [],
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_templates_compile() {
        assert!(ViewRenderer::new().is_ok());
    }

    #[test]
    fn test_detail_page_embeds_article_id() {
        let views = ViewRenderer::new().unwrap();
        let html = views
            .render(
                "article-detail",
                &json!({
                    "title": "Blog Detail",
                    "article_id": 42,
                    "kind": "blog",
                    "scripts": ["article-detail", "comments-realtime"],
                }),
            )
            .unwrap();

        assert!(html.contains("const ARTICLE_ID = 42;"));
        assert!(html.contains("/js/comments-realtime.js"));
        assert!(html.contains("<title>Blog Detail</title>"));
    }

    #[test]
    fn test_error_page_escapes_path() {
        let views = ViewRenderer::new().unwrap();
        let html = views
            .render_error(404, "Page not found", Some("/<script>"))
            .unwrap();

        assert!(html.contains("404"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_missing_context_is_an_error() {
        let views = ViewRenderer::new().unwrap();
        assert!(views.render("index", &json!({})).is_err());
    }
}
