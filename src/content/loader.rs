//! Content loader - builds the per-locale post collection

use anyhow::{Context, Result};
use chrono_tz::Tz;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::frontmatter::{self, FrontMatter};
use super::PostMeta;
use crate::locale::Locale;
use crate::Blog;

/// Loads posts from `<content_dir>/<locale>/posts`
pub struct ContentLoader<'a> {
    blog: &'a Blog,
    tz: Tz,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(blog: &'a Blog) -> Self {
        Self {
            blog,
            tz: blog.config.tz(),
        }
    }

    /// Load every valid, published post of a locale, newest first.
    ///
    /// Files that fail to read or validate are logged and skipped.
    pub fn load_posts(&self, locale: Locale) -> Result<Vec<PostMeta>> {
        let posts_dir = self.blog.posts_dir(locale);
        if !posts_dir.is_dir() {
            tracing::warn!("Directory not found: {:?}", posts_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&posts_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_post_file(path) {
                continue;
            }

            match self.load_post(path, locale) {
                Ok(post) => posts.push(post),
                Err(e) => {
                    tracing::warn!("Skip invalid post {:?}: {:#}", path, e);
                }
            }
        }

        if !self.blog.config.render_drafts {
            posts.retain(|p| !p.draft);
        }

        // Newest first; stable so equal dates keep file-name order
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        tracing::debug!("Loaded {} posts for {}", posts.len(), locale);
        Ok(posts)
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path, locale: Locale) -> Result<PostMeta> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;
        let fm = fm.validate(locale, self.tz)?;

        Ok(PostMeta::new(
            fm,
            body.trim(),
            self.blog.config.words_per_minute,
            path.to_path_buf(),
        ))
    }

    /// Re-read a post's source and return its body without front-matter
    pub fn read_body(&self, post: &PostMeta) -> Result<String> {
        let content = fs::read_to_string(&post.filepath)
            .with_context(|| format!("Failed to read {:?}", post.filepath))?;
        let (_, body) = frontmatter::split(&content);
        Ok(body.to_string())
    }
}

/// Posts are `.md` or `.mdx` files
fn is_post_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.ends_with(".md") || n.ends_with(".mdx"))
        .unwrap_or(false)
}

/// Whether the source should get MDX pre-processing
pub fn is_mdx(path: &Path) -> bool {
    path.extension().map(|e| e == "mdx").unwrap_or(false)
}
