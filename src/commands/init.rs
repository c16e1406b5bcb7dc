//! Initialize a new multi-locale blog

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::locale::Locale;
use crate::Blog;

const CONFIG: &str = r#"# Site
title: Multi-Lang Blog
description: A multi-language blog
author: ''
# Canonical base URL; BASE_URL / SITE_URL override it at build time
url: http://localhost:4000
# Timezone for front-matter dates without an offset
timezone: UTC

# Locales
locales: [ko, en, uz]
default_locale: ko
fallback_locale: en

# Directories
content_dir: content
public_dir: public
messages_dir: messages

# Writing
render_drafts: false
words_per_minute: 200

# Listings
related_limit: 3
# feed_limit: 20

# Highlighting
highlight_theme: base16-ocean.dark
line_numbers: false
"#;

/// Sample post per locale: (title, summary, body)
fn sample(locale: Locale) -> (&'static str, &'static str, &'static str) {
    match locale {
        Locale::Ko => (
            "안녕하세요, 세계",
            "첫 번째 글입니다.",
            "블로그에 오신 것을 환영합니다.\n\n## 시작하기\n\n`content/ko/posts` 폴더에 새 글을 추가하세요.\n",
        ),
        Locale::En => (
            "Hello World",
            "The very first post.",
            "Welcome to your new blog.\n\n## Getting started\n\nAdd posts under `content/en/posts`, then run:\n\n```bash\nmultilang-blog generate\n```\n",
        ),
        Locale::Uz => (
            "Salom, dunyo",
            "Birinchi maqola.",
            "Blogingizga xush kelibsiz.\n\n## Boshlash\n\nYangi maqolalarni `content/uz/posts` papkasiga qo'shing.\n",
        ),
    }
}

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("messages"))?;

    write_if_missing(&target_dir.join("_config.yml"), CONFIG)?;

    let date = chrono::Utc::now().format("%Y-%m-%d").to_string();
    for locale in Locale::ALL {
        let posts_dir = target_dir.join("content").join(locale.code()).join("posts");
        fs::create_dir_all(&posts_dir)?;

        let (title, summary, body) = sample(locale);
        let post = format!(
            "---\ntitle: \"{}\"\ndate: {}\nslug: hello-world\nsummary: \"{}\"\ntags: [welcome]\n---\n\n{}",
            title, date, summary, body
        );
        write_if_missing(&posts_dir.join("hello-world.md"), &post)?;
    }

    tracing::info!("Initialized blog in {:?}", target_dir);
    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::info!("Keeping existing {:?}", path);
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::debug!("Created {:?}", path);
    Ok(())
}

/// Run the init command with an existing Blog instance
pub fn run(blog: &Blog) -> Result<()> {
    init_site(&blog.base_dir)
}
