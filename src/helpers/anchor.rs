//! Anchor ids for headings and tags

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DISALLOWED: Regex = Regex::new(r"[^\p{L}\p{N}\s-]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref DASHES: Regex = Regex::new(r"-+").unwrap();
}

/// Turn free text into an anchor id.
///
/// Unlike `slug::slugify` this keeps non-Latin letters, so a Korean heading
/// gets a Korean id rather than a transliteration.
///
/// # Examples
/// ```ignore
/// slugify("Hello, World!") // -> "hello-world"
/// slugify("설치 방법")      // -> "설치-방법"
/// ```
pub fn slugify(input: &str) -> String {
    let lower = input.to_lowercase();
    let cleaned = DISALLOWED.replace_all(lower.trim(), "");
    let dashed = WHITESPACE.replace_all(&cleaned, "-");
    DASHES.replace_all(&dashed, "-").into_owned()
}

/// Id of a heading: an explicit `{#id}` wins, otherwise the slugified text,
/// or `section` when nothing survives slugifying
pub fn heading_id(explicit: Option<&str>, text: &str) -> String {
    if let Some(id) = explicit {
        return id.to_string();
    }
    let slug = slugify(text);
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Getting   Started  "), "getting-started");
        assert_eq!(slugify("a -- b"), "a-b");
    }

    #[test]
    fn test_unicode_letters_survive() {
        assert_eq!(slugify("설치 방법"), "설치-방법");
        assert_eq!(slugify("O‘zbekcha qo‘llanma"), "ozbekcha-qollanma");
    }

    #[test]
    fn test_punctuation_only() {
        assert_eq!(slugify("?!"), "");
    }

    #[test]
    fn test_heading_id() {
        assert_eq!(heading_id(None, "Getting Started"), "getting-started");
        assert_eq!(heading_id(None, "?!"), "section");
        assert_eq!(heading_id(Some("custom"), "Title"), "custom");
    }
}
