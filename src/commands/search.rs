//! Search posts of a locale from the command line

use anyhow::Result;

use crate::content::{query, PostMeta};
use crate::helpers::format_date;
use crate::locale::Locale;
use crate::Blog;

/// Posts of `locale` matching `text` and, when given, `tag`
pub fn find(blog: &Blog, locale: Locale, text: &str, tag: Option<&str>) -> Result<Vec<PostMeta>> {
    let posts = blog.posts(locale)?;
    Ok(query::search(&posts, text, tag).into_iter().cloned().collect())
}

/// Run the search command
pub fn run(blog: &Blog, locale: Locale, text: &str, tag: Option<&str>) -> Result<()> {
    let hits = find(blog, locale, text, tag)?;

    if hits.is_empty() {
        println!("No results.");
        return Ok(());
    }

    println!("Results [{}] ({}):", locale, hits.len());
    for post in hits {
        println!(
            "  {} - {} [{}]",
            format_date(&post.date, locale),
            post.title,
            post.slug
        );
        if let Some(summary) = &post.summary {
            println!("      {}", summary);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        let posts_dir = blog.posts_dir(Locale::En);
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            posts_dir.join("a.md"),
            "---\ntitle: Rust ownership\ndate: 2024-01-01\nslug: a\ntags: [rust]\n---\nbody\n",
        )
        .unwrap();
        fs::write(
            posts_dir.join("b.md"),
            "---\ntitle: Travel notes\ndate: 2024-02-01\nslug: b\nsummary: Trains and rust belts\ntags: [life]\n---\nbody\n",
        )
        .unwrap();

        let hits = find(&blog, Locale::En, "rust", None).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].slug, "a");

        let hits = find(&blog, Locale::En, "rust", Some("life")).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "b");
    }
}
