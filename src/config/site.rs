//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::locale::Locale;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    /// Canonical base URL; environment variables take precedence
    pub url: Option<String>,
    /// IANA timezone used for frontmatter dates without an offset
    pub timezone: String,

    // Locales
    pub locales: Vec<Locale>,
    pub default_locale: Locale,
    pub fallback_locale: Locale,

    // Directories
    /// Content root; discovered when unset
    pub content_dir: Option<String>,
    pub public_dir: String,
    pub messages_dir: String,

    // Writing
    pub render_drafts: bool,
    pub words_per_minute: usize,

    // Listings
    pub related_limit: usize,
    /// Maximum feed items; all posts when unset
    pub feed_limit: Option<usize>,

    // Highlighting
    pub highlight_theme: String,
    pub line_numbers: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Multi-Lang Blog".to_string(),
            description: "A multi-language blog".to_string(),
            author: String::new(),
            url: None,
            timezone: "UTC".to_string(),

            locales: Locale::ALL.to_vec(),
            default_locale: Locale::Ko,
            fallback_locale: Locale::En,

            content_dir: None,
            public_dir: "public".to_string(),
            messages_dir: "messages".to_string(),

            render_drafts: false,
            words_per_minute: 200,

            related_limit: 3,
            feed_limit: None,

            highlight_theme: "base16-ocean.dark".to_string(),
            line_numbers: false,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let mut config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config.normalize();
        Ok(config)
    }

    /// Parsed timezone, UTC when the configured name is unknown
    pub fn tz(&self) -> Tz {
        match self.timezone.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                tracing::warn!("Unknown timezone {:?}, using UTC", self.timezone);
                Tz::UTC
            }
        }
    }

    fn normalize(&mut self) {
        if self.locales.is_empty() {
            self.locales = Locale::ALL.to_vec();
        }
        let mut seen = HashSet::new();
        self.locales.retain(|locale| seen.insert(*locale));
        if !self.locales.contains(&self.default_locale) {
            tracing::warn!(
                "default_locale {} is not in locales, using {}",
                self.default_locale,
                self.locales[0]
            );
            self.default_locale = self.locales[0];
        }
        if self.words_per_minute == 0 {
            self.words_per_minute = 200;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Multi-Lang Blog");
        assert_eq!(config.default_locale, Locale::Ko);
        assert_eq!(config.fallback_locale, Locale::En);
        assert_eq!(config.words_per_minute, 200);
        assert_eq!(config.related_limit, 3);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
locales: [en, uz]
default_locale: ko
words_per_minute: 0
timezone: Asia/Seoul
"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, yaml).unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.locales, vec![Locale::En, Locale::Uz]);
        assert_eq!(config.default_locale, Locale::En);
        assert_eq!(config.words_per_minute, 200);
        assert_eq!(config.tz(), chrono_tz::Asia::Seoul);
    }

    #[test]
    fn test_duplicate_locales_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "locales: [en, ko, en, uz, ko]\ndefault_locale: en\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.locales, vec![Locale::En, Locale::Ko, Locale::Uz]);
        assert_eq!(config.default_locale, Locale::En);
    }

    #[test]
    fn test_unknown_timezone_falls_back() {
        let config = SiteConfig {
            timezone: "Mars/Olympus".to_string(),
            ..Default::default()
        };
        assert_eq!(config.tz(), Tz::UTC);
    }
}
