//! List site content

use anyhow::Result;

use crate::content::query;
use crate::locale::Locale;
use crate::Blog;

/// List site content by type, for one locale or all configured locales
pub fn run(blog: &Blog, content_type: &str, locale: Option<Locale>) -> Result<()> {
    let locales = match locale {
        Some(l) => vec![l],
        None => blog.config.locales.clone(),
    };

    match content_type {
        "post" | "posts" => {
            for locale in locales {
                let posts = blog.posts(locale)?;
                println!("Posts [{}] ({}):", locale, posts.len());
                for post in posts {
                    println!(
                        "  {} - {} ({} min){} [{}]",
                        post.date.format("%Y-%m-%d"),
                        post.title,
                        post.reading_time,
                        if post.draft { " (draft)" } else { "" },
                        post.slug
                    );
                }
            }
        }
        "tag" | "tags" => {
            for locale in locales {
                let posts = blog.posts(locale)?;
                let tags = query::tag_counts(&posts);
                println!("Tags [{}] ({}):", locale, tags.len());
                for (tag, count) in tags {
                    println!("  {} ({})", tag, count);
                }
            }
        }
        "locale" | "locales" => {
            println!("Locales ({}):", locales.len());
            for locale in locales {
                let marker = if locale == blog.config.default_locale {
                    " (default)"
                } else {
                    ""
                };
                println!(
                    "  {} - {} {:?}{}",
                    locale,
                    locale.native_name(),
                    blog.posts_dir(locale),
                    marker
                );
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, locale",
                content_type
            );
        }
    }

    Ok(())
}
