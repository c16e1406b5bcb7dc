//! Open Graph cards rendered as 1200×630 SVG

use crate::helpers::{escape_xml, strip_invalid_xml_chars};
use crate::locale::Locale;

pub const WIDTH: u32 = 1200;
pub const HEIGHT: u32 = 630;

/// Characters per title line before wrapping
const LINE_CHARS: usize = 28;
const MAX_LINES: usize = 3;

/// Render a card with a large title, a subtitle and the locale badge
pub fn render_card(title: &str, subtitle: &str, locale: Locale) -> String {
    let lines = wrap(&strip_invalid_xml_chars(title), LINE_CHARS, MAX_LINES);
    let line_height = 84;
    let first_y = 260 - (lines.len() as u32 - 1) * line_height / 2;

    let mut title_spans = String::new();
    for (i, line) in lines.iter().enumerate() {
        title_spans.push_str(&format!(
            r#"<tspan x="80" y="{}">{}</tspan>"#,
            first_y + i as u32 * line_height,
            escape_xml(line)
        ));
    }

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
  <defs>
    <linearGradient id="bg" x1="0" y1="0" x2="1" y2="1">
      <stop offset="0%" stop-color="#0f172a"/>
      <stop offset="100%" stop-color="#1e3a8a"/>
    </linearGradient>
  </defs>
  <rect width="{w}" height="{h}" fill="url(#bg)"/>
  <text font-family="system-ui, 'Noto Sans KR', sans-serif" font-size="68" font-weight="700" fill="#f8fafc">{title}</text>
  <text x="80" y="540" font-family="system-ui, 'Noto Sans KR', sans-serif" font-size="32" fill="#cbd5e1">{subtitle}</text>
  <rect x="1020" y="500" width="100" height="56" rx="12" fill="#f8fafc" fill-opacity="0.12"/>
  <text x="1070" y="538" text-anchor="middle" font-family="system-ui, sans-serif" font-size="28" font-weight="600" fill="#f8fafc">{locale}</text>
</svg>
"##,
        w = WIDTH,
        h = HEIGHT,
        title = title_spans,
        subtitle = escape_xml(&strip_invalid_xml_chars(subtitle)),
        locale = locale.code().to_uppercase(),
    )
}

/// Greedy word wrap by character count; the last line gets an ellipsis
/// when text remains
fn wrap(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        // Words longer than a line are split hard
        while word.chars().count() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(width).collect();
            word = word.chars().skip(width).collect();
            lines.push(head);
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let kept: String = last.chars().take(width.saturating_sub(1)).collect();
            *last = format!("{}…", kept.trim_end());
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("short title", 28, 3), vec!["short title"]);
        assert_eq!(
            wrap("one two three four", 9, 3),
            vec!["one two", "three", "four"]
        );
        assert_eq!(wrap("abcdefghij", 4, 3), vec!["abcd", "efgh", "ij"]);

        let lines = wrap("a b c d e f g h", 3, 2);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with('…'));
        assert_eq!(wrap("", 10, 3), vec![""]);
    }

    #[test]
    fn test_render_card() {
        let svg = render_card("Tom & Jerry <3", "Blog", Locale::Uz);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="1200" height="630""#));
        assert!(svg.contains("Tom &amp; Jerry &lt;3"));
        assert!(svg.contains(">UZ</text>"));
    }
}
