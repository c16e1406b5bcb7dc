//! Built-in site templates using Tera template engine
//!
//! Templates are embedded directly in the binary; sites customize wording
//! through message catalogs rather than template files.

use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers;

/// Stylesheet written to `public/css/style.css`
pub const STYLESHEET: &str = include_str!("site/style.css");

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Templates escape text explicitly; rendered post HTML must pass through
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("macros.html", include_str!("site/macros.html")),
            ("home.html", include_str!("site/home.html")),
            ("blog_index.html", include_str!("site/blog_index.html")),
            ("post.html", include_str!("site/post.html")),
            ("redirect.html", include_str!("site/redirect.html")),
            (
                "partials/header.html",
                include_str!("site/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(helpers::strip_html(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => Some(tera::try_get_value!("truncate_chars", "omission", String, val)),
        None => None,
    };

    Ok(tera::Value::String(helpers::truncate(
        &s,
        length,
        omission.as_deref(),
    )))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub base_url: String,
}

/// Head metadata of a rendered page
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical: String,
    /// hreflang -> absolute URL
    pub languages: IndexMap<String, String>,
    pub og_image: String,
    /// `website` or `article`
    pub og_type: String,
    pub published_time: Option<String>,
    pub tags: Vec<String>,
}

/// Entry of the header's language switcher
#[derive(Debug, Clone, Serialize)]
pub struct LocaleLink {
    pub code: String,
    pub name: String,
    pub url: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagLink {
    pub name: String,
    pub url: String,
    pub count: usize,
}

/// Post as shown in listings and on its own page
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub title: String,
    pub slug: String,
    pub url: String,
    /// Localized display date
    pub date: String,
    /// Machine-readable date for `<time datetime>`
    pub datetime: String,
    /// e.g. "4 min read"
    pub reading: String,
    /// e.g. "4 min"
    pub reading_short: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<TagLink>,
    pub cover: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavPost {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShareLinks {
    pub x: String,
    pub linkedin: String,
}
