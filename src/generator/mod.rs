//! Generator module - renders every locale's pages, feeds and cards

mod og;

use anyhow::{Context as _, Result};
use chrono::{Datelike, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tera::Context;

use crate::content::loader::is_mdx;
use crate::content::{query, ContentLoader, MarkdownRenderer, PostMeta};
use crate::helpers::{
    date_rfc822, date_xml, escape_xml, extract_toc, format_date, linkedin_share_url, post_path,
    strip_invalid_xml_chars, tag_path, twitter_share_url, SiteUrls,
};
use crate::i18n::I18n;
use crate::locale::Locale;
use crate::templates::{
    LocaleLink, NavPost, PageMeta, PostCard, ShareLinks, SiteData, TagLink, TemplateRenderer,
    STYLESHEET,
};
use crate::Blog;

/// Posts shown on a locale's home page
const HOME_POSTS: usize = 3;

/// Static site generator using Tera templates
pub struct Generator {
    blog: Blog,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
    i18n: I18n,
    urls: SiteUrls,
}

/// Entry of `sitemap.xml`
struct SitemapEntry {
    loc: String,
    lastmod: Option<String>,
    changefreq: &'static str,
    priority: &'static str,
}

/// Entry of a locale's `search.json`
#[derive(Debug, Serialize)]
struct SearchEntry<'a> {
    title: &'a str,
    slug: &'a str,
    url: String,
    summary: Option<&'a str>,
    tags: &'a [String],
    date: String,
}

impl Generator {
    /// Create a new generator, resolving the base URL from the environment
    pub fn new(blog: &Blog) -> Result<Self> {
        Self::with_urls(blog, SiteUrls::from_env(&blog.config))
    }

    /// Create a generator with explicit site URLs
    pub fn with_urls(blog: &Blog, urls: SiteUrls) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let markdown = MarkdownRenderer::with_options(
            &blog.config.highlight_theme,
            blog.config.line_numbers,
        );

        let mut i18n = I18n::builtin(blog.config.fallback_locale)?;
        i18n.load_dir(&blog.messages_dir)?;

        Ok(Self {
            blog: blog.clone(),
            renderer,
            markdown,
            i18n,
            urls,
        })
    }

    /// Generate the entire site, returning the number of posts rendered
    pub fn generate(&self) -> Result<usize> {
        fs::create_dir_all(&self.blog.public_dir)?;
        self.write("css/style.css", STYLESHEET)?;

        let loader = ContentLoader::new(&self.blog);
        let mut sitemap = Vec::new();
        let mut total = 0;

        for &locale in &self.blog.config.locales {
            let posts = dedupe_slugs(loader.load_posts(locale)?);
            total += posts.len();

            self.generate_home(locale, &posts)?;
            self.generate_blog_index(locale, &posts)?;
            self.generate_tag_pages(locale, &posts)?;
            self.generate_post_pages(&loader, locale, &posts)?;
            self.generate_feed(locale, &posts)?;
            self.generate_search_index(locale, &posts)?;
            self.generate_og_cards(locale, &posts)?;

            sitemap.extend(self.sitemap_entries(locale, &posts));
            tracing::info!("Generated {} ({} posts)", locale, posts.len());
        }

        self.generate_root_redirect()?;
        self.generate_sitemap(&sitemap)?;
        self.generate_robots()?;

        Ok(total)
    }

    /// Create a base context with common variables
    fn create_base_context(&self, locale: Locale, path: &str, page: &PageMeta) -> Context {
        let config = &self.blog.config;
        let site = SiteData {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            base_url: self.urls.base().to_string(),
        };

        let locale_links: Vec<LocaleLink> = config
            .locales
            .iter()
            .map(|&l| LocaleLink {
                code: l.code().to_string(),
                name: l.native_name().to_string(),
                url: format!("/{}{}", l, path),
                active: l == locale,
            })
            .collect();

        let mut context = Context::new();
        context.insert("site", &site);
        context.insert("page", page);
        context.insert("locale", locale.code());
        context.insert("lang", locale.bcp47());
        context.insert("t", &self.i18n.messages(locale));
        context.insert("locale_links", &locale_links);
        context.insert("home_url", &format!("/{}/", locale));
        context.insert("blog_url", &format!("/{}/blog/", locale));
        context.insert("feed_url", &format!("/{}/feed.xml", locale));
        context.insert("current_year", &Utc::now().year());
        context
    }

    /// Head metadata for a non-article page at `path` (relative to the locale)
    fn page_meta(&self, locale: Locale, path: &str, title: String, description: String) -> PageMeta {
        let alternates = self.urls.alternates(locale, path);
        PageMeta {
            title,
            description,
            canonical: alternates.canonical,
            languages: alternates.languages,
            og_image: self.urls.og_image_url(locale, None),
            og_type: "website".to_string(),
            published_time: None,
            tags: Vec::new(),
        }
    }

    fn post_card(&self, locale: Locale, post: &PostMeta) -> PostCard {
        let minutes = post.reading_time.to_string();
        PostCard {
            title: post.title.clone(),
            slug: post.slug.clone(),
            url: post_path(locale, &post.slug),
            date: format_date(&post.date, locale),
            datetime: date_xml(&post.date),
            reading: self.i18n.format(locale, "post.min_read", &[("n", &minutes)]),
            reading_short: self.i18n.format(locale, "post.min", &[("n", &minutes)]),
            summary: post.summary.clone(),
            description: post.description.clone(),
            tags: post
                .tags
                .iter()
                .filter_map(|tag| {
                    Some(TagLink {
                        name: tag.clone(),
                        url: tag_path(locale, tag)?,
                        count: 0,
                    })
                })
                .collect(),
            cover: post.cover.clone(),
        }
    }

    /// Generate `<l>/index.html`
    fn generate_home(&self, locale: Locale, posts: &[PostMeta]) -> Result<()> {
        let page = self.page_meta(
            locale,
            "/",
            self.blog.config.title.clone(),
            self.i18n.get(locale, "home.desc"),
        );
        let cards: Vec<PostCard> = posts
            .iter()
            .take(HOME_POSTS)
            .map(|p| self.post_card(locale, p))
            .collect();

        let mut context = self.create_base_context(locale, "/", &page);
        context.insert("posts", &cards);

        let html = self.renderer.render("home.html", &context)?;
        self.write(&format!("{}/index.html", locale), &html)
    }

    /// Generate `<l>/blog/index.html`
    fn generate_blog_index(&self, locale: Locale, posts: &[PostMeta]) -> Result<()> {
        let title = self.i18n.get(locale, "blog.title");
        let page = self.page_meta(
            locale,
            "/blog/",
            title.clone(),
            self.i18n.get(locale, "home.desc"),
        );

        let mut context = self.create_base_context(locale, "/blog/", &page);
        context.insert("heading", &title);
        context.insert("posts", &self.cards(locale, posts.iter()));
        context.insert("tags", &self.tag_links(locale, posts));
        context.insert("active_tag", &Option::<String>::None);

        let html = self.renderer.render("blog_index.html", &context)?;
        self.write(&format!("{}/blog/index.html", locale), &html)
    }

    /// Generate `<l>/blog/tags/<tag>/index.html` for every tag in use
    fn generate_tag_pages(&self, locale: Locale, posts: &[PostMeta]) -> Result<()> {
        let tags = self.tag_links(locale, posts);
        let mut written = HashSet::new();

        for tag in &tags {
            if !written.insert(tag.url.clone()) {
                tracing::warn!("Tag {:?} shares its page with another tag, skipped", tag.name);
                continue;
            }

            let relative = tag.url.trim_start_matches(&format!("/{}", locale));
            let heading = self.i18n.format(locale, "blog.tagged", &[("tag", &tag.name)]);
            let page = self.page_meta(
                locale,
                relative,
                heading.clone(),
                self.i18n.get(locale, "home.desc"),
            );

            let tagged = query::posts_with_tag(posts, &tag.name);
            let mut context = self.create_base_context(locale, relative, &page);
            context.insert("heading", &heading);
            context.insert("posts", &self.cards(locale, tagged.into_iter()));
            context.insert("tags", &tags);
            context.insert("active_tag", &tag.name);

            let html = self.renderer.render("blog_index.html", &context)?;
            let dir = tag_dir(&tag.name);
            self.write(
                &format!("{}/blog/tags/{}/index.html", locale, dir),
                &html,
            )?;
        }

        tracing::debug!("Generated {} tag pages for {}", written.len(), locale);
        Ok(())
    }

    /// Generate `<l>/blog/<slug>/index.html`
    fn generate_post_pages(
        &self,
        loader: &ContentLoader,
        locale: Locale,
        posts: &[PostMeta],
    ) -> Result<()> {
        for post in posts {
            let body = loader.read_body(post)?;
            let content = if is_mdx(&post.filepath) {
                self.markdown.render_mdx(&body)?
            } else {
                self.markdown.render(&body)?
            };
            let toc = extract_toc(&body);

            let neighbors = query::neighbors(posts, &post.slug);
            let nav = |p: &PostMeta| NavPost {
                title: p.title.clone(),
                url: post_path(locale, &p.slug),
            };
            let related: Vec<NavPost> =
                query::related(posts, post, self.blog.config.related_limit)
                    .into_iter()
                    .map(nav)
                    .collect();

            let relative = format!("/blog/{}/", crate::helpers::encode_component(&post.slug));
            let alternates = self.urls.alternates(locale, &relative);
            let url = self.urls.post_url(locale, &post.slug);
            let page = PageMeta {
                title: post.title.clone(),
                description: post
                    .description
                    .clone()
                    .unwrap_or_else(|| self.blog.config.description.clone()),
                canonical: alternates.canonical,
                languages: alternates.languages,
                og_image: self.urls.og_image_url(locale, Some(&post.slug)),
                og_type: "article".to_string(),
                published_time: Some(date_xml(&post.date)),
                tags: post.tags.clone(),
            };
            let share = ShareLinks {
                x: twitter_share_url(&post.title, &url),
                linkedin: linkedin_share_url(&url),
            };

            let mut context = self.create_base_context(locale, &relative, &page);
            context.insert("post", &self.post_card(locale, post));
            context.insert("content", &content);
            context.insert("toc", &toc);
            context.insert("newer", &neighbors.newer.map(nav));
            context.insert("older", &neighbors.older.map(nav));
            context.insert("related", &related);
            context.insert("share", &share);

            let html = self.renderer.render("post.html", &context)?;
            self.write(
                &format!("{}/blog/{}/index.html", locale, post.slug),
                &html,
            )
            .with_context(|| format!("Failed to write post {:?}", post.filepath))?;
            tracing::debug!("Generated post: {}/{}", locale, post.slug);
        }

        Ok(())
    }

    /// Generate `<l>/feed.xml` (RSS 2.0)
    fn generate_feed(&self, locale: Locale, posts: &[PostMeta]) -> Result<()> {
        let config = &self.blog.config;
        let limit = config.feed_limit.unwrap_or(posts.len());
        let blog_url = self.urls.absolute(&format!("/{}/blog/", locale));
        let last_build = posts.first().map(|p| p.date).unwrap_or_else(Utc::now);

        let mut feed = String::new();
        feed.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        feed.push('\n');
        feed.push_str(r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">"#);
        feed.push('\n');
        feed.push_str("  <channel>\n");
        feed.push_str(&format!("    <title>{}</title>\n", xml_text(&config.title)));
        feed.push_str(&format!("    <link>{}</link>\n", escape_xml(&blog_url)));
        feed.push_str(&format!(
            "    <description>{}</description>\n",
            xml_text(&self.i18n.get(locale, "feed.description"))
        ));
        feed.push_str(&format!("    <language>{}</language>\n", locale.bcp47()));
        feed.push_str(&format!(
            "    <lastBuildDate>{}</lastBuildDate>\n",
            date_rfc822(&last_build)
        ));
        feed.push_str(&format!(
            "    <atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\"/>\n",
            escape_xml(&self.urls.absolute(&format!("/{}/feed.xml", locale)))
        ));

        for post in posts.iter().take(limit) {
            let url = escape_xml(&self.urls.post_url(locale, &post.slug));
            feed.push_str("    <item>\n");
            feed.push_str(&format!("      <title>{}</title>\n", xml_text(&post.title)));
            feed.push_str(&format!("      <link>{}</link>\n", url));
            feed.push_str(&format!("      <guid isPermaLink=\"true\">{}</guid>\n", url));
            feed.push_str(&format!(
                "      <pubDate>{}</pubDate>\n",
                date_rfc822(&post.date)
            ));
            if let Some(description) = post.description.as_deref().or(post.summary.as_deref()) {
                feed.push_str(&format!(
                    "      <description>{}</description>\n",
                    xml_text(description)
                ));
            }
            for tag in &post.tags {
                feed.push_str(&format!("      <category>{}</category>\n", xml_text(tag)));
            }
            feed.push_str("    </item>\n");
        }

        feed.push_str("  </channel>\n");
        feed.push_str("</rss>\n");

        self.write(&format!("{}/feed.xml", locale), &feed)
    }

    /// Generate `<l>/search.json`
    fn generate_search_index(&self, locale: Locale, posts: &[PostMeta]) -> Result<()> {
        let entries: Vec<SearchEntry> = posts
            .iter()
            .map(|p| SearchEntry {
                title: &p.title,
                slug: &p.slug,
                url: post_path(locale, &p.slug),
                summary: p.summary.as_deref(),
                tags: &p.tags,
                date: date_xml(&p.date),
            })
            .collect();

        let json = serde_json::to_string_pretty(&entries)?;
        self.write(&format!("{}/search.json", locale), &json)
    }

    /// Generate `<l>/og/index.svg` and one card per post
    fn generate_og_cards(&self, locale: Locale, posts: &[PostMeta]) -> Result<()> {
        let subtitle = self.i18n.get(locale, "og.subtitle");
        let site_title = &self.blog.config.title;

        let index = og::render_card(site_title, &subtitle, locale);
        self.write(&format!("{}/og/index.svg", locale), &index)?;

        for post in posts {
            let card = og::render_card(&post.title, site_title, locale);
            self.write(&format!("{}/og/{}.svg", locale, post.slug), &card)?;
        }

        Ok(())
    }

    fn sitemap_entries(&self, locale: Locale, posts: &[PostMeta]) -> Vec<SitemapEntry> {
        let mut entries = vec![
            SitemapEntry {
                loc: self.urls.absolute(&format!("/{}/", locale)),
                lastmod: None,
                changefreq: "weekly",
                priority: "0.8",
            },
            SitemapEntry {
                loc: self.urls.absolute(&format!("/{}/blog/", locale)),
                lastmod: None,
                changefreq: "daily",
                priority: "0.7",
            },
        ];

        entries.extend(posts.iter().map(|p| SitemapEntry {
            loc: self.urls.post_url(locale, &p.slug),
            lastmod: Some(date_xml(&p.date)),
            changefreq: "monthly",
            priority: "0.6",
        }));

        entries
    }

    /// Generate `sitemap.xml`
    fn generate_sitemap(&self, entries: &[SitemapEntry]) -> Result<()> {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');

        for entry in entries {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            if let Some(lastmod) = &entry.lastmod {
                xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
            }
            xml.push_str(&format!(
                "    <changefreq>{}</changefreq>\n",
                entry.changefreq
            ));
            xml.push_str(&format!("    <priority>{}</priority>\n", entry.priority));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");

        self.write("sitemap.xml", &xml)?;
        tracing::info!("Generated sitemap.xml ({} urls)", entries.len());
        Ok(())
    }

    /// Generate `robots.txt`
    fn generate_robots(&self) -> Result<()> {
        let robots = format!(
            "User-agent: *\nAllow: /\nDisallow: /og\nDisallow: /*/og/\n\nSitemap: {}\nHost: {}\n",
            self.urls.absolute("/sitemap.xml"),
            self.urls.base()
        );
        self.write("robots.txt", &robots)
    }

    /// Generate the root `index.html` that sends visitors to the default locale
    fn generate_root_redirect(&self) -> Result<()> {
        let locale = self.blog.config.default_locale;
        let target = format!("/{}/", locale);

        let mut context = Context::new();
        context.insert(
            "site",
            &SiteData {
                title: self.blog.config.title.clone(),
                description: self.blog.config.description.clone(),
                author: self.blog.config.author.clone(),
                base_url: self.urls.base().to_string(),
            },
        );
        context.insert("lang", locale.bcp47());
        context.insert("target", &target);
        context.insert("canonical", &self.urls.absolute(&target));

        let html = self.renderer.render("redirect.html", &context)?;
        self.write("index.html", &html)
    }

    fn cards<'a>(
        &self,
        locale: Locale,
        posts: impl Iterator<Item = &'a PostMeta>,
    ) -> Vec<PostCard> {
        posts.map(|p| self.post_card(locale, p)).collect()
    }

    fn tag_links(&self, locale: Locale, posts: &[PostMeta]) -> Vec<TagLink> {
        query::tag_counts(posts)
            .into_iter()
            .filter_map(|(name, count)| {
                let url = tag_path(locale, &name)?;
                Some(TagLink { name, url, count })
            })
            .collect()
    }

    /// Write a file relative to the public directory
    fn write(&self, relative: &str, content: &str) -> Result<()> {
        let output_path = self.blog.public_dir.join(relative);
        write_file(&output_path, content)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create dir {:?}", parent))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))
}

/// Text safe to embed in an XML element
fn xml_text(s: &str) -> String {
    escape_xml(&strip_invalid_xml_chars(s))
}

/// Directory name of a tag page
fn tag_dir(tag: &str) -> String {
    crate::helpers::slugify(tag)
}

/// Keep the newest post for each slug; later duplicates are skipped
fn dedupe_slugs(posts: Vec<PostMeta>) -> Vec<PostMeta> {
    let mut seen = HashSet::new();
    posts
        .into_iter()
        .filter(|p| {
            if seen.insert(p.slug.clone()) {
                true
            } else {
                tracing::warn!(
                    "Duplicate slug {:?} in {:?} ({}), keeping the newer post",
                    p.slug,
                    p.filepath,
                    p.lang
                );
                false
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::path::PathBuf;

    fn write_post(blog: &Blog, locale: Locale, name: &str, content: &str) {
        let dir = blog.posts_dir(locale);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    fn site(dir: &Path) -> Blog {
        let config = SiteConfig {
            title: "Test Blog".to_string(),
            ..Default::default()
        };
        fs::create_dir_all(dir.join("content")).unwrap();
        let blog = Blog::with_config(PathBuf::from(dir), config);

        write_post(
            &blog,
            Locale::En,
            "first.md",
            "---\ntitle: First post\ndate: 2024-01-10\nslug: first\nsummary: The very first\ntags: [rust, web]\n---\n\n## Intro\n\nHello & welcome.\n",
        );
        write_post(
            &blog,
            Locale::En,
            "second.mdx",
            "---\ntitle: Second post\ndate: 2024-02-10\nslug: second\ntags: [rust]\n---\nimport X from './x'\n\n## Part one\n\n### Detail\n\nMore words here.\n",
        );
        write_post(
            &blog,
            Locale::En,
            "copy.md",
            "---\ntitle: Older copy\ndate: 2023-01-01\nslug: first\n---\n\nOld.\n",
        );
        write_post(
            &blog,
            Locale::Ko,
            "hello.md",
            "---\ntitle: 안녕하세요 세계\ndate: 2024-03-01\nslug: hello\ntags: [러스트]\n---\n\n본문입니다.\n",
        );
        blog
    }

    fn generate(dir: &Path) -> Blog {
        let blog = site(dir);
        let urls = SiteUrls::new("https://blog.example", &blog.config);
        let generator = Generator::with_urls(&blog, urls).unwrap();
        assert_eq!(generator.generate().unwrap(), 3);
        blog
    }

    fn read(blog: &Blog, path: &str) -> String {
        fs::read_to_string(blog.public_dir.join(path)).unwrap()
    }

    #[test]
    fn test_generates_all_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let blog = generate(dir.path());

        for path in [
            "index.html",
            "css/style.css",
            "sitemap.xml",
            "robots.txt",
            "ko/index.html",
            "ko/blog/index.html",
            "ko/blog/hello/index.html",
            "ko/blog/tags/러스트/index.html",
            "en/blog/first/index.html",
            "en/blog/second/index.html",
            "en/blog/tags/rust/index.html",
            "en/feed.xml",
            "en/search.json",
            "en/og/index.svg",
            "en/og/first.svg",
            "uz/index.html",
            "uz/blog/index.html",
        ] {
            assert!(blog.public_dir.join(path).exists(), "missing {}", path);
        }

        let redirect = read(&blog, "index.html");
        assert!(redirect.contains("url=/ko/"));
    }

    #[test]
    fn test_post_page() {
        let dir = tempfile::tempdir().unwrap();
        let blog = generate(dir.path());

        let html = read(&blog, "en/blog/second/index.html");
        assert!(html.contains(r#"<html lang="en-US">"#));
        assert!(html.contains(r#"<link rel="canonical" href="https://blog.example/en/blog/second/">"#));
        assert!(html.contains(r#"hreflang="x-default" href="https://blog.example/ko/blog/second/""#));
        assert!(html.contains(r#"content="https://blog.example/en/og/second.svg""#));
        assert!(html.contains(r##"<a href="#part-one">Part one</a>"##));
        assert!(html.contains(r#"<h3 id="detail""#));
        assert!(!html.contains("import X"));
        assert!(html.contains("1 min read"));
        // second is the newest: no newer post, older is first
        assert!(html.contains("No newer post"));
        assert!(html.contains(r#"<a class="older" href="/en/blog/first/">"#));
        assert!(html.contains("twitter.com/intent/tweet"));
    }

    #[test]
    fn test_duplicate_slug_keeps_newest() {
        let dir = tempfile::tempdir().unwrap();
        let blog = generate(dir.path());

        let html = read(&blog, "en/blog/first/index.html");
        assert!(html.contains("First post"));
        assert!(!html.contains("Older copy"));

        let search: serde_json::Value =
            serde_json::from_str(&read(&blog, "en/search.json")).unwrap();
        let slugs: Vec<&str> = search
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["slug"].as_str().unwrap())
            .collect();
        assert_eq!(slugs, vec!["second", "first"]);
    }

    #[test]
    fn test_feed_and_sitemap() {
        let dir = tempfile::tempdir().unwrap();
        let blog = generate(dir.path());

        let feed = read(&blog, "en/feed.xml");
        assert!(feed.contains(r#"<rss version="2.0""#));
        assert!(feed.contains("<link>https://blog.example/en/blog/first/</link>"));
        assert!(feed.contains("<pubDate>Wed, 10 Jan 2024 00:00:00 GMT</pubDate>"));
        assert!(feed.contains("<description>The very first</description>"));
        assert!(feed.find("second").unwrap() < feed.find("/first/").unwrap());

        let sitemap = read(&blog, "sitemap.xml");
        assert!(sitemap.contains("<loc>https://blog.example/uz/</loc>"));
        assert!(sitemap.contains("<changefreq>daily</changefreq>"));
        assert!(sitemap.contains("<lastmod>2024-03-01T00:00:00+00:00</lastmod>"));

        let robots = read(&blog, "robots.txt");
        assert!(robots.contains("Disallow: /*/og/"));
        assert!(robots.contains("Sitemap: https://blog.example/sitemap.xml"));
    }

    #[test]
    fn test_tag_and_index_pages() {
        let dir = tempfile::tempdir().unwrap();
        let blog = generate(dir.path());

        let index = read(&blog, "en/blog/index.html");
        assert!(index.contains("First post"));
        assert!(index.contains(r#"href="/en/blog/tags/web/""#));

        let web = read(&blog, "en/blog/tags/web/index.html");
        assert!(web.contains("Posts tagged #web"));
        assert!(web.contains("First post"));
        assert!(!web.contains("Second post"));

        let empty = read(&blog, "uz/blog/index.html");
        assert!(empty.contains(r#"<p class="empty">"#));
    }

    #[test]
    fn test_cover_attribute_is_escaped() {
        let dir = tempfile::tempdir().unwrap();
        let blog = site(dir.path());
        write_post(
            &blog,
            Locale::Uz,
            "rasm.md",
            "---\ntitle: Rasmli post\ndate: 2024-04-01\nslug: rasm\ncover: 'a.png\" onerror=\"x'\n---\n\n## Bo'lim {#qism}\n",
        );
        let urls = SiteUrls::new("https://blog.example", &blog.config);
        Generator::with_urls(&blog, urls).unwrap().generate().unwrap();

        for path in ["uz/blog/rasm/index.html", "uz/blog/index.html"] {
            let html = read(&blog, path);
            assert!(!html.contains(r#"onerror="x""#), "unescaped cover in {}", path);
            assert!(html.contains("a.png&quot; onerror=&quot;x"));
        }

        let post = read(&blog, "uz/blog/rasm/index.html");
        assert!(post.contains(r#"<h2 id="qism""#));
        assert!(post.contains(r##"<a href="#qism">"##));
    }

    #[test]
    fn test_dedupe_slugs() {
        let dir = tempfile::tempdir().unwrap();
        let blog = site(dir.path());
        let posts = ContentLoader::new(&blog).load_posts(Locale::En).unwrap();
        assert_eq!(posts.len(), 3);
        let posts = dedupe_slugs(posts);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].title, "First post");
    }
}
