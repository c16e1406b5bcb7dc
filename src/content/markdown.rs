//! Markdown rendering with syntax highlighting, heading anchors and link overrides

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, HeadingLevel, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::helpers::{heading_id, html_escape, markdown_options};

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

/// A heading being collected so its id can be computed from its text
struct PendingHeading<'a> {
    level: HeadingLevel,
    id: Option<String>,
    text: String,
    events: Vec<Event<'a>>,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", false)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    /// Render an MDX source: module lines are dropped, the rest is Markdown
    pub fn render_mdx(&self, source: &str) -> Result<String> {
        self.render(&strip_mdx_module_lines(source))
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        // Front-matter is split off before rendering, so no metadata blocks
        let parser = Parser::new_ext(markdown, markdown_options());

        let mut events: Vec<Event> = Vec::new();
        let mut heading: Option<PendingHeading> = None;
        // Some(lang) while inside a code block
        let mut code_block: Option<Option<String>> = None;
        let mut code_block_content = String::new();
        // Whether each open link was replaced by raw HTML
        let mut link_stack: Vec<bool> = Vec::new();

        for event in parser {
            let out = match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    code_block = Some(match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(|lang| lang.to_string()),
                        CodeBlockKind::Indented => None,
                    });
                    code_block_content.clear();
                    continue;
                }
                Event::End(TagEnd::CodeBlock) => {
                    let lang = code_block.take().flatten();
                    Event::Html(CowStr::from(
                        self.code_block(&code_block_content, lang.as_deref()),
                    ))
                }
                Event::Text(text) if code_block.is_some() => {
                    code_block_content.push_str(&text);
                    continue;
                }
                Event::Start(Tag::Heading { level, id, .. })
                    if matches!(level, HeadingLevel::H2 | HeadingLevel::H3) =>
                {
                    heading = Some(PendingHeading {
                        level,
                        id: id.map(|i| i.to_string()),
                        text: String::new(),
                        events: Vec::new(),
                    });
                    continue;
                }
                Event::End(TagEnd::Heading(_)) if heading.is_some() => {
                    if let Some(h) = heading.take() {
                        events.push(Event::Html(CowStr::from(render_heading(h))));
                    }
                    continue;
                }
                Event::Code(code) => {
                    if let Some(h) = heading.as_mut() {
                        h.text.push_str(&code);
                    }
                    Event::Html(CowStr::from(format!(
                        r#"<code class="inline-code">{}</code>"#,
                        html_escape(&code)
                    )))
                }
                Event::Text(text) => {
                    if let Some(h) = heading.as_mut() {
                        h.text.push_str(&text);
                    }
                    Event::Text(text)
                }
                Event::Start(Tag::Link {
                    dest_url, title, ..
                }) if is_external(&dest_url) => {
                    link_stack.push(true);
                    let title_attr = if title.is_empty() {
                        String::new()
                    } else {
                        format!(r#" title="{}""#, html_escape(&title))
                    };
                    Event::Html(CowStr::from(format!(
                        r#"<a href="{}"{} target="_blank" rel="noreferrer">"#,
                        html_escape(&dest_url),
                        title_attr
                    )))
                }
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => {
                    link_stack.push(false);
                    Event::Start(Tag::Link {
                        link_type,
                        dest_url,
                        title,
                        id,
                    })
                }
                Event::End(TagEnd::Link) => {
                    if link_stack.pop().unwrap_or(false) {
                        Event::Html(CowStr::from("</a>"))
                    } else {
                        Event::End(TagEnd::Link)
                    }
                }
                other => other,
            };

            match heading.as_mut() {
                Some(h) => h.events.push(out),
                None => events.push(out),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block and wrap it with a language label
    fn code_block(&self, code: &str, lang: Option<&str>) -> String {
        let label = lang.unwrap_or("code");
        let highlighted = self.highlight_code(code, lang.unwrap_or("text"));

        format!(
            r#"<div class="code-block" data-language="{lang}"><div class="code-header"><span class="code-lang">{lang}</span><button type="button" class="copy-button" aria-label="Copy code">Copy</button></div>{body}</div>"#,
            lang = html_escape(label),
            body = highlighted
        )
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: &str) -> String {
        // Try to find syntax for the language
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(highlighted) if self.line_numbers => self.add_line_numbers(&highlighted, lang),
            Some(highlighted) => highlighted,
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                html_escape(lang),
                html_escape(code)
            ),
        }
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();

        let gutter = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
            html_escape(lang),
            gutter,
            lines.join("\n")
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn render_heading(h: PendingHeading) -> String {
    let tag = match h.level {
        HeadingLevel::H2 => "h2",
        _ => "h3",
    };
    let id = heading_id(h.id.as_deref(), h.text.trim());

    let mut inner = String::new();
    html::push_html(&mut inner, h.events.into_iter());

    format!(
        r##"<{tag} id="{id}" class="heading-anchor"><a href="#{id}" class="anchor" aria-label="Anchor">#</a>{inner}</{tag}>"##,
        tag = tag,
        id = html_escape(&id),
        inner = inner
    )
}

fn is_external(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Drop top-level MDX `import`/`export` lines, leaving fenced code untouched
pub fn strip_mdx_module_lines(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut fence: Option<&str> = None;

    for line in source.split_inclusive('\n') {
        let trimmed = line.trim_start();

        match fence {
            Some(marker) => {
                if trimmed.starts_with(marker) {
                    fence = None;
                }
            }
            None => {
                if trimmed.starts_with("```") {
                    fence = Some("```");
                } else if trimmed.starts_with("~~~") {
                    fence = Some("~~~");
                } else if line.starts_with("import ") || line.starts_with("export ") {
                    continue;
                }
            }
        }

        out.push_str(line);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_heading_anchors() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("## Getting Started\n\n### 설치 `npm` 방법\n")
            .unwrap();
        assert!(html.contains(r#"<h2 id="getting-started" class="heading-anchor">"#));
        assert!(html.contains("href=\"#getting-started\""));
        assert!(html.contains(r#"<h3 id="설치-npm-방법""#));
        assert!(html.contains(r#"<code class="inline-code">npm</code>"#));
    }

    #[test]
    fn test_heading_ids_match_toc() {
        let md = "## Read [the docs](/docs) **now**\n\n## ?!\n\n## Tom &amp; Jerry\n\n### Title {#custom}\n\n## \"Quoted\" *words*\n";
        let renderer = MarkdownRenderer::new();
        let html = renderer.render(md).unwrap();
        let toc = crate::helpers::extract_toc(md);
        assert_eq!(toc.len(), 5);
        for item in &toc {
            assert!(
                html.contains(&format!(r#"id="{}""#, item.id)),
                "no heading with id {:?}",
                item.id
            );
        }
        assert_eq!(toc[1].id, "section");
        assert_eq!(toc[2].id, "tom-jerry");
        assert_eq!(toc[3].id, "custom");
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains(r#"data-language="rust""#));
        assert!(html.contains(r#"<span class="code-lang">rust</span>"#));
        assert!(html.contains("<pre"));
        assert!(!html.contains("```"));
    }

    #[test]
    fn test_code_block_without_language() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\nplain <text>\n```").unwrap();
        assert!(html.contains(r#"<span class="code-lang">code</span>"#));
        assert!(!html.contains("plain <text>"));
    }

    #[test]
    fn test_line_numbers() {
        let renderer = MarkdownRenderer::with_options("base16-ocean.dark", true);
        let html = renderer.render("```rust\nlet a = 1;\nlet b = 2;\n```").unwrap();
        assert!(html.contains(r#"<span class="line-number">1</span>"#));
    }

    #[test]
    fn test_external_links() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("[ext](https://example.com) and [int](/en/blog/)")
            .unwrap();
        assert!(html.contains(
            r#"<a href="https://example.com" target="_blank" rel="noreferrer">ext</a>"#
        ));
        assert!(html.contains(r#"<a href="/en/blog/">int</a>"#));
    }

    #[test]
    fn test_strip_mdx_module_lines() {
        let src = "import Chart from './Chart'\nexport const meta = {}\n\n# Title\n```js\nimport x from 'y'\n```\n";
        let stripped = strip_mdx_module_lines(src);
        assert!(!stripped.contains("Chart"));
        assert!(!stripped.contains("export const"));
        assert!(stripped.contains("import x from 'y'"));
        assert!(stripped.contains("# Title"));
    }
}
