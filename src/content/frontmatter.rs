//! Front-matter parsing and validation

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::helpers::parse_date;
use crate::locale::Locale;

/// Shortest accepted title, counted in characters
pub const MIN_TITLE_CHARS: usize = 3;

/// Why a post's front-matter was rejected
#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("`title` must be at least 3 characters, got {0:?}")]
    TitleTooShort(String),

    #[error("`slug` {0:?} must be a single non-empty path segment")]
    InvalidSlug(String),

    #[error("`date` {0:?} is not a recognized date")]
    InvalidDate(String),
}

/// Only a YAML string is a string: `title: 12345` must not pass as "12345"
fn expect_string<E: serde::de::Error>(value: serde_yaml::Value) -> Result<String, E> {
    use serde::de::Unexpected;

    match value {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Bool(b) => Err(E::invalid_type(Unexpected::Bool(b), &"a string")),
        serde_yaml::Value::Number(n) => Err(E::invalid_type(
            Unexpected::Other(&format!("number {}", n)),
            &"a string",
        )),
        serde_yaml::Value::Null => Err(E::invalid_type(Unexpected::Unit, &"a string")),
        serde_yaml::Value::Sequence(_) => Err(E::invalid_type(Unexpected::Seq, &"a string")),
        serde_yaml::Value::Mapping(_) => Err(E::invalid_type(Unexpected::Map, &"a string")),
        serde_yaml::Value::Tagged(_) => Err(E::invalid_type(
            Unexpected::Other("tagged value"),
            &"a string",
        )),
    }
}

/// Optional string field that rejects numbers, booleans and collections
fn strict_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_yaml::Value>::deserialize(deserializer)? {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(value) => expect_string(value).map(Some),
    }
}

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<serde_yaml::Value>()? {
                vec.push(expect_string::<S::Error>(item)?);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter exactly as written in the file.
///
/// `lang` is deliberately absent: the locale always comes from the directory
/// being scanned.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "strict_string")]
    pub title: Option<String>,
    /// Checked by `parse_date`, so any scalar is read as text here
    pub date: Option<String>,
    #[serde(deserialize_with = "strict_string")]
    pub slug: Option<String>,
    #[serde(deserialize_with = "strict_string")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "strict_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "strict_string")]
    pub cover: Option<String>,
    pub draft: Option<bool>,
}

/// Front-matter that passed the schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostFrontmatter {
    pub title: String,
    pub date: DateTime<Utc>,
    pub slug: String,
    pub summary: Option<String>,
    /// Falls back to `summary` when not given
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub cover: Option<String>,
    pub draft: bool,
    pub lang: Locale,
}

/// Split a document into its YAML block (if any) and body
pub fn split(content: &str) -> (Option<&str>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let first_end = content.find('\n').unwrap_or(content.len());
    if content[..first_end].trim_end() != "---" {
        return (None, content);
    }

    let yaml_start = (first_end + 1).min(content.len());
    let mut offset = yaml_start;
    for line in content[yaml_start..].split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &content[yaml_start..offset];
            let body = &content[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    // No closing delimiter
    (None, content)
}

impl FrontMatter {
    /// Parse front-matter from content string.
    /// Returns (front_matter, body)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontmatterError> {
        let (yaml, body) = split(content);
        let fm = match yaml {
            Some(yaml) if !yaml.trim().is_empty() => serde_yaml::from_str(yaml)?,
            _ => FrontMatter::default(),
        };
        Ok((fm, body))
    }

    /// Check the schema and coerce `lang` to `locale`
    pub fn validate(self, locale: Locale, tz: Tz) -> Result<PostFrontmatter, FrontmatterError> {
        let title = self.title.ok_or(FrontmatterError::MissingField("title"))?;
        if title.chars().count() < MIN_TITLE_CHARS {
            return Err(FrontmatterError::TitleTooShort(title));
        }

        let raw_date = self.date.ok_or(FrontmatterError::MissingField("date"))?;
        let date = parse_date(&raw_date, tz).ok_or(FrontmatterError::InvalidDate(raw_date))?;

        let slug = self.slug.ok_or(FrontmatterError::MissingField("slug"))?;
        if !is_valid_slug(&slug) {
            return Err(FrontmatterError::InvalidSlug(slug));
        }

        let description = self.description.or_else(|| self.summary.clone());

        Ok(PostFrontmatter {
            title,
            date,
            slug,
            summary: self.summary,
            description,
            tags: self.tags,
            cover: self.cover,
            draft: self.draft.unwrap_or(false),
            lang: locale,
        })
    }
}

/// A slug becomes a directory name, so it must be one harmless segment
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slug != "." && slug != ".." && !slug.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(content: &str) -> Result<PostFrontmatter, FrontmatterError> {
        let (fm, _) = FrontMatter::parse(content)?;
        fm.validate(Locale::En, Tz::UTC)
    }

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15 10:30:00
slug: hello-world
summary: First post
tags:
  - rust
  - i18n
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.tags, vec!["rust", "i18n"]);
        assert_eq!(body.trim(), "This is the content.");

        let post = fm.validate(Locale::Ko, Tz::UTC).unwrap();
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.description.as_deref(), Some("First post"));
        assert!(!post.draft);
        assert_eq!(post.lang, Locale::Ko);
    }

    #[test]
    fn test_lang_is_coerced() {
        let content = "---\ntitle: Salom dunyo\ndate: 2024-02-01\nslug: salom\nlang: ko\n---\nMatn\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.validate(Locale::Uz, Tz::UTC).unwrap().lang, Locale::Uz);
    }

    #[test]
    fn test_description_wins_over_summary() {
        let post = validate(
            "---\ntitle: Title\ndate: 2024-01-01\nslug: t\nsummary: S\ndescription: D\n---\n",
        )
        .unwrap();
        assert_eq!(post.summary.as_deref(), Some("S"));
        assert_eq!(post.description.as_deref(), Some("D"));
    }

    #[test]
    fn test_single_string_tag() {
        let post = validate("---\ntitle: Title\ndate: 2024-01-01\nslug: t\ntags: notes\n---\n").unwrap();
        assert_eq!(post.tags, vec!["notes"]);
    }

    #[test]
    fn test_missing_fields() {
        assert!(matches!(
            validate("---\ndate: 2024-01-01\nslug: t\n---\n"),
            Err(FrontmatterError::MissingField("title"))
        ));
        assert!(matches!(
            validate("---\ntitle: Title\nslug: t\n---\n"),
            Err(FrontmatterError::MissingField("date"))
        ));
        assert!(matches!(
            validate("---\ntitle: Title\ndate: 2024-01-01\n---\n"),
            Err(FrontmatterError::MissingField("slug"))
        ));
        assert!(matches!(
            validate("No front-matter at all"),
            Err(FrontmatterError::MissingField("title"))
        ));
    }

    #[test]
    fn test_rejections() {
        assert!(matches!(
            validate("---\ntitle: Hi\ndate: 2024-01-01\nslug: t\n---\n"),
            Err(FrontmatterError::TitleTooShort(_))
        ));
        assert!(matches!(
            validate("---\ntitle: Title\ndate: someday\nslug: t\n---\n"),
            Err(FrontmatterError::InvalidDate(_))
        ));
        assert!(matches!(
            validate("---\ntitle: Title\ndate: 2024-01-01\nslug: ''\n---\n"),
            Err(FrontmatterError::InvalidSlug(_))
        ));
        assert!(matches!(
            validate("---\ntitle: Title\ndate: 2024-01-01\nslug: ../etc\n---\n"),
            Err(FrontmatterError::InvalidSlug(_))
        ));
        assert!(matches!(
            validate("---\ntitle: Title\ndate: 2024-01-01\nslug: t\ndraft: maybe\n---\n"),
            Err(FrontmatterError::Yaml(_))
        ));
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        for content in [
            "---\ntitle: 12345\ndate: 2024-01-01\nslug: t\n---\n",
            "---\ntitle: Title\ndate: 2024-01-01\nslug: 42\n---\n",
            "---\ntitle: true\ndate: 2024-01-01\nslug: t\n---\n",
            "---\ntitle: Title\ndate: 2024-01-01\nslug: t\nsummary: [a, b]\n---\n",
            "---\ntitle: Title\ndate: 2024-01-01\nslug: t\ncover: 7\n---\n",
            "---\ntitle: Title\ndate: 2024-01-01\nslug: t\ntags: [rust, 2024]\n---\n",
            "---\ntitle: Title\ndate: 2024-01-01\nslug: t\ntags: 5\n---\n",
        ] {
            assert!(
                matches!(validate(content), Err(FrontmatterError::Yaml(_))),
                "accepted {:?}",
                content
            );
        }

        let post = validate("---\ntitle: '12345'\ndate: 2024-01-01\nslug: '42'\nsummary: ~\n---\n")
            .unwrap();
        assert_eq!(post.title, "12345");
        assert_eq!(post.slug, "42");
        assert!(post.summary.is_none());
    }

    #[test]
    fn test_title_length_counts_characters() {
        assert!(validate("---\ntitle: 첫글임\ndate: 2024-01-01\nslug: t\n---\n").is_ok());
    }

    #[test]
    fn test_split_without_closing_delimiter() {
        let (yaml, body) = split("---\ntitle: x\nno end");
        assert!(yaml.is_none());
        assert!(body.starts_with("---"));
    }

    #[test]
    fn test_split_crlf() {
        let (yaml, body) = split("---\r\ntitle: x\r\n---\r\nbody\r\n");
        assert_eq!(yaml, Some("title: x\r\n"));
        assert_eq!(body, "body\r\n");
    }
}
