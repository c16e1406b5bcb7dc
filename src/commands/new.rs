//! Create a new post

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::content::frontmatter::{is_valid_slug, MIN_TITLE_CHARS};
use crate::locale::Locale;
use crate::Blog;

/// Front-matter written into a new post
#[derive(Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    date: String,
    slug: &'a str,
    tags: Vec<String>,
    draft: bool,
}

/// Create `<content>/<locale>/posts/<slug>.md` and return its path
pub fn create_post(blog: &Blog, locale: Locale, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let title = title.trim();
    if title.chars().count() < MIN_TITLE_CHARS {
        anyhow::bail!(
            "Post title {:?} must be at least {} characters",
            title,
            MIN_TITLE_CHARS
        );
    }

    let slug = match slug {
        Some(s) => s.trim().to_string(),
        None => slug::slugify(title),
    };
    if !is_valid_slug(&slug) {
        anyhow::bail!(
            "Cannot use {:?} as a slug for {:?}; pass one with --slug",
            slug,
            title
        );
    }

    let target_dir = blog.posts_dir(locale);
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Utc::now().with_timezone(&blog.config.tz());
    let scaffold = Scaffold {
        title,
        date: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        slug: &slug,
        tags: Vec::new(),
        draft: false,
    };
    let yaml = serde_yaml::to_string(&scaffold)?;
    let content = format!("---\n{}---\n\n", yaml);

    fs::write(&file_path, content)
        .with_context(|| format!("Failed to write {:?}", file_path))?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_post_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let path = create_post(&blog, Locale::En, "Hello: A New World", None).unwrap();
        assert_eq!(path, blog.posts_dir(Locale::En).join("hello-a-new-world.md"));

        let post = blog.post_by_slug(Locale::En, "hello-a-new-world").unwrap().unwrap();
        assert_eq!(post.title, "Hello: A New World");
        assert!(!post.draft);
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_create_post_with_slug() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let path = create_post(&blog, Locale::Ko, "첫 번째 글", Some("first")).unwrap();
        assert_eq!(path, blog.posts_dir(Locale::Ko).join("first.md"));
        assert!(create_post(&blog, Locale::Ko, "첫 번째 글", Some("first")).is_err());
    }

    #[test]
    fn test_create_post_rejects_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        assert!(create_post(&blog, Locale::En, "  ", None).is_err());
        assert!(create_post(&blog, Locale::En, "Hi", None).is_err());
        assert!(create_post(&blog, Locale::En, " Hi ", Some("hi")).is_err());
        assert!(!blog.posts_dir(Locale::En).join("hi.md").exists());
        assert!(create_post(&blog, Locale::En, "Title", Some("a/b")).is_err());
        assert!(create_post(&blog, Locale::En, "!!!", None).is_err());
    }
}
