use once_cell::sync::Lazy;
use regex::Regex;

static SLUG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\-_]").unwrap());
static HYPHENS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").unwrap());

/// slug 列的长度上限
pub const MAX_SLUG_LENGTH: usize = 255;

/// 从标题生成 URL 友好的 slug
pub fn generate_slug(title: &str) -> String {
    let slug = title.to_lowercase().replace(char::is_whitespace, "-");
    let slug = SLUG_REGEX.replace_all(&slug, "");
    let slug = HYPHENS_REGEX.replace_all(&slug, "-");
    let mut slug = slug.trim_matches('-').to_string();

    if slug.len() > MAX_SLUG_LENGTH {
        slug.truncate(MAX_SLUG_LENGTH);
        slug = slug.trim_end_matches('-').to_string();
    }

    if slug.is_empty() {
        slug = "untitled".to_string();
    }

    slug
}

/// 为 slug 添加数字后缀，直到不与已有 slug 冲突
pub fn make_slug_unique(base_slug: &str, existing_slugs: &[String]) -> String {
    let mut slug = base_slug.to_string();
    let mut counter = 1;

    while existing_slugs.contains(&slug) {
        slug = format!("{}-{}", base_slug, counter);
        counter += 1;
    }

    slug
}
