//! multilang-blog: a static generator for multi-locale Markdown/MDX blogs
//!
//! Posts live in `content/<locale>/posts/*.{md,mdx}`. Each build scans every
//! locale, validates front-matter, derives reading metadata and renders the
//! localized index, post, feed, sitemap and OG card outputs with Tera.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod i18n;
pub mod locale;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use locale::Locale;

/// Content directories probed, in order, when the config names none
const CONTENT_DIR_CANDIDATES: [&str; 2] = ["src/content", "content"];

/// The main blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content root holding one directory per locale
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Site message catalogs overriding the built-in ones
    pub messages_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance with an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let content_dir = match &config.content_dir {
            Some(dir) => base_dir.join(dir),
            None => discover_content_dir(&base_dir),
        };
        let public_dir = base_dir.join(&config.public_dir);
        let messages_dir = base_dir.join(&config.messages_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
            messages_dir,
        }
    }

    /// Directory holding the posts of one locale
    pub fn posts_dir(&self, locale: Locale) -> PathBuf {
        self.content_dir.join(locale.code()).join("posts")
    }

    /// All published posts of a locale, newest first
    pub fn posts(&self, locale: Locale) -> Result<Vec<content::PostMeta>> {
        content::ContentLoader::new(self).load_posts(locale)
    }

    /// Look up one post of a locale by slug
    pub fn post_by_slug(&self, locale: Locale, slug: &str) -> Result<Option<content::PostMeta>> {
        let posts = self.posts(locale)?;
        Ok(content::query::find_by_slug(&posts, slug).cloned())
    }

    /// Initialize a new site
    pub fn init(&self) -> Result<()> {
        commands::init::run(self)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, locale: Locale, title: &str, slug: Option<&str>) -> Result<PathBuf> {
        commands::new::create_post(self, locale, title, slug)
    }
}

fn discover_content_dir(base_dir: &Path) -> PathBuf {
    for candidate in CONTENT_DIR_CANDIDATES {
        let dir = base_dir.join(candidate);
        if dir.is_dir() {
            return dir;
        }
    }

    tracing::warn!(
        "No content folder found in {:?}. Expected `src/content` or `content`.",
        base_dir
    );
    base_dir.join("content")
}
