//! Post model and derived metadata

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

use super::frontmatter::PostFrontmatter;
use crate::locale::Locale;

/// A validated post with derived reading metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostMeta {
    /// Post title
    pub title: String,

    /// Publication date
    pub date: DateTime<Utc>,

    /// URL segment under `/<locale>/blog/`
    pub slug: String,

    pub summary: Option<String>,

    /// Meta description; `summary` when the post gives none
    pub description: Option<String>,

    pub tags: Vec<String>,

    /// Cover image path or URL
    pub cover: Option<String>,

    pub draft: bool,

    /// Locale of the directory the post was loaded from
    pub lang: Locale,

    /// Whitespace-separated words in the body
    pub words: usize,

    /// Estimated minutes to read, at least 1
    pub reading_time: usize,

    /// Source file
    pub filepath: PathBuf,
}

impl PostMeta {
    /// Combine validated front-matter with metadata derived from the body
    pub fn new(fm: PostFrontmatter, body: &str, words_per_minute: usize, filepath: PathBuf) -> Self {
        let words = count_words(body);
        Self {
            title: fm.title,
            date: fm.date,
            slug: fm.slug,
            summary: fm.summary,
            description: fm.description,
            tags: fm.tags,
            cover: fm.cover,
            draft: fm.draft,
            lang: fm.lang,
            words,
            reading_time: reading_time(words, words_per_minute),
            filepath,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Count whitespace-separated words
pub fn count_words(body: &str) -> usize {
    body.split_whitespace().count()
}

/// Minutes to read `words`, rounded, never below one
pub fn reading_time(words: usize, words_per_minute: usize) -> usize {
    let minutes = (words as f64 / words_per_minute.max(1) as f64).round() as usize;
    minutes.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("  one two\n\nthree\tfour  "), 4);
        assert_eq!(count_words("   \n "), 0);
        assert_eq!(count_words("안녕하세요 여러분"), 2);
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time(0, 200), 1);
        assert_eq!(reading_time(99, 200), 1);
        assert_eq!(reading_time(300, 200), 2);
        assert_eq!(reading_time(500, 200), 3);
        assert_eq!(reading_time(1000, 200), 5);
        assert_eq!(reading_time(1000, 0), 1000);
    }
}
