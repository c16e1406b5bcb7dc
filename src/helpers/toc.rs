//! Table of contents extraction from Markdown source

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use serde::Serialize;

use super::heading_id;

/// One entry of a post's table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocItem {
    pub id: String,
    pub title: String,
    pub level: u8,
}

/// Parser options shared by the renderer and the table of contents
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_SMART_PUNCTUATION
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_GFM
}

/// Collect level-2 and level-3 headings from Markdown.
///
/// Titles are the heading's text with link and emphasis markup removed and
/// entities decoded. Ids come from [`heading_id`], the same way the renderer
/// assigns them, so every entry links to its heading.
pub fn extract_toc(markdown: &str) -> Vec<TocItem> {
    let mut items = Vec::new();
    // (level, explicit id, collected text)
    let mut current: Option<(u8, Option<String>, String)> = None;

    for event in Parser::new_ext(markdown, markdown_options()) {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                let level = match level {
                    HeadingLevel::H2 => 2,
                    HeadingLevel::H3 => 3,
                    _ => continue,
                };
                current = Some((level, id.map(|i| i.to_string()), String::new()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, _, title)) = current.as_mut() {
                    title.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, id, title)) = current.take() {
                    let title = title.trim().to_string();
                    if title.is_empty() && id.is_none() {
                        continue;
                    }
                    items.push(TocItem {
                        id: heading_id(id.as_deref(), &title),
                        title,
                        level,
                    });
                }
            }
            _ => {}
        }
    }

    items
}
