use crate::{
    config::Config,
    error::Result,
    models::{
        blog::BlogRequest,
        comment::CreateCommentRequest,
        user::{CreateUserRequest, Role},
        vlog::{CreateVlogRequest, VideoFileInput},
    },
    services::{
        database::Table, ArticleService, BlogService, CommentService, Database, UserService,
        VlogService,
    },
    utils::slug::{generate_slug, make_slug_unique},
};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use std::sync::Arc;
use tracing::info;

const TAGS: &[&str] = &[
    "technology",
    "programming",
    "rust",
    "database",
    "tutorial",
    "news",
    "opinion",
    "review",
    "travel",
    "beginner",
    "advanced",
];

const USERNAMES: &[&str] = &["alice", "bob", "carol", "dave", "erin", "frank", "grace", "heidi"];

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi", "aliquip",
    "commodo", "consequat", "duis", "aute", "irure", "reprehenderit", "voluptate", "velit",
];

const COMMENTS_PER_ARTICLE: usize = 2;

/// 每张表新建的行数
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub blogs: usize,
    pub vlogs: usize,
    pub comments: usize,
}

/// 启动时填充演示数据；已有数据的表会被跳过
pub struct Seeder {
    db: Arc<Database>,
    users: UserService,
    articles: ArticleService,
    blogs: BlogService,
    vlogs: VlogService,
    comments: CommentService,
    rng: StdRng,
}

impl Seeder {
    pub fn new(db: Arc<Database>) -> Self {
        Self::with_rng(db, StdRng::from_entropy())
    }

    pub fn with_rng(db: Arc<Database>, rng: StdRng) -> Self {
        Self {
            users: UserService::new(db.clone()),
            articles: ArticleService::new(db.clone()),
            blogs: BlogService::new(db.clone()),
            vlogs: VlogService::new(db.clone()),
            comments: CommentService::new(db.clone()),
            db,
            rng,
        }
    }

    pub async fn run(&mut self, config: &Config) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        if self.db.count(Table::Users).await? == 0 {
            report.users = self.seed_users(config.seed_user_count).await?;
        } else {
            info!("Users already seeded. Skipping...");
        }

        let user_ids: Vec<i64> = self.users.list().await?.iter().map(|u| u.user_id).collect();

        if self.blogs.list().await?.is_empty() {
            report.blogs = self.seed_blogs(config.seed_blog_count, &user_ids).await?;
        } else {
            info!("Blogs already seeded. Skipping...");
        }

        if self.vlogs.list().await?.is_empty() {
            report.vlogs = self.seed_vlogs(config.seed_vlog_count, &user_ids).await?;
        } else {
            info!("Vlogs already seeded. Skipping...");
        }

        if self.db.count(Table::Comments).await? == 0 && !user_ids.is_empty() {
            report.comments = self.seed_comments(&user_ids).await?;
        } else {
            info!("Comments already seeded or no users available. Skipping...");
        }

        info!("Seeding finished: {:?}", report);
        Ok(report)
    }

    async fn seed_users(&mut self, count: usize) -> Result<usize> {
        for i in 0..count {
            let name = USERNAMES[i % USERNAMES.len()];
            let username = if i < USERNAMES.len() {
                name.to_string()
            } else {
                format!("{}{}", name, i)
            };
            let roles = if i == 0 {
                vec![Role::User, Role::Admin]
            } else {
                vec![Role::User]
            };
            self.users
                .create(CreateUserRequest {
                    email: format!("{}@example.com", username),
                    username,
                    roles,
                })
                .await?;
        }
        info!("Seeded {} users", count);
        Ok(count)
    }

    async fn seed_blogs(&mut self, count: usize, user_ids: &[i64]) -> Result<usize> {
        let mut slugs = self.articles.existing_slugs().await?;
        let requests: Vec<BlogRequest> = (0..count)
            .map(|_| {
                let title = self.sentence(4, 8);
                let slug = self.unique_slug(&title, &mut slugs);
                BlogRequest {
                    excerpt: self.sentence(8, 16),
                    content: self.paragraphs(3),
                    tags: self.tags(),
                    title,
                    slug,
                }
            })
            .collect();

        let created = self.blogs.create_many(requests).await?;
        for blog in &created {
            let authors = self.authors(user_ids);
            self.articles.add_authors(blog.article_id, &authors).await?;
        }

        info!("Seeded {} blogs", created.len());
        Ok(created.len())
    }

    async fn seed_vlogs(&mut self, count: usize, user_ids: &[i64]) -> Result<usize> {
        let mut slugs = self.articles.existing_slugs().await?;
        let requests: Vec<CreateVlogRequest> = (0..count)
            .map(|_| {
                let title = self.sentence(3, 6);
                let slug = self.unique_slug(&title, &mut slugs);
                CreateVlogRequest {
                    excerpt: self.sentence(8, 16),
                    content: self.paragraphs(2),
                    tags: self.tags(),
                    user_ids: self.authors(user_ids),
                    video_file: Some(VideoFileInput {
                        video_file_url: format!("https://videos.example.com/{}.mp4", slug),
                    }),
                    title,
                    slug,
                }
            })
            .collect();

        let created = self.vlogs.create_many(requests).await?;
        info!("Seeded {} vlogs", created.len());
        Ok(created.len())
    }

    async fn seed_comments(&mut self, user_ids: &[i64]) -> Result<usize> {
        let articles = self.articles.list().await?;
        let mut created = 0;
        for article in &articles {
            for _ in 0..COMMENTS_PER_ARTICLE {
                let user_id = *user_ids.choose(&mut self.rng).unwrap_or(&user_ids[0]);
                let request = CreateCommentRequest {
                    user_id,
                    content: self.sentence(3, 12),
                };
                self.comments.create(article.article_id, request).await?;
                created += 1;
            }
        }
        info!("Seeded {} comments", created);
        Ok(created)
    }

    fn sentence(&mut self, min_words: usize, max_words: usize) -> String {
        let count = self.rng.gen_range(min_words..=max_words);
        let words: Vec<&str> = (0..count)
            .filter_map(|_| WORDS.choose(&mut self.rng).copied())
            .collect();
        let mut sentence = words.join(" ");
        if let Some(first) = sentence.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        sentence.push('.');
        sentence
    }

    fn paragraphs(&mut self, count: usize) -> String {
        (0..count)
            .map(|_| {
                (0..5)
                    .map(|_| self.sentence(6, 14))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn tags(&mut self) -> Vec<String> {
        let amount = self.rng.gen_range(2..=5);
        TAGS.choose_multiple(&mut self.rng, amount)
            .map(|tag| tag.to_string())
            .collect()
    }

    /// 1 到 3 位随机作者
    fn authors(&mut self, user_ids: &[i64]) -> Vec<i64> {
        if user_ids.is_empty() {
            return Vec::new();
        }
        let amount = self.rng.gen_range(1..=3.min(user_ids.len()));
        user_ids
            .choose_multiple(&mut self.rng, amount)
            .copied()
            .collect()
    }

    fn unique_slug(&self, title: &str, existing: &mut Vec<String>) -> String {
        let slug = make_slug_unique(&generate_slug(title), existing);
        existing.push(slug.clone());
        slug
    }
}
