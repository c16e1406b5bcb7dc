//! Helper functions shared by the loader, renderer and generator

mod anchor;
mod date;
mod html;
mod toc;
mod url;

pub use anchor::*;
pub use date::*;
pub use html::*;
pub use toc::*;
pub use url::*;

use crate::config::SiteConfig;
use crate::locale::Locale;

/// URL helpers bound to a resolved base URL and the configured locales
#[derive(Debug, Clone)]
pub struct SiteUrls {
    base: String,
    locales: Vec<Locale>,
    default_locale: Locale,
}

impl SiteUrls {
    /// Resolve the base URL from the process environment and config
    pub fn from_env(config: &SiteConfig) -> Self {
        let base = resolve_base_url(config.url.as_deref(), |key| std::env::var(key).ok());
        Self::new(base, config)
    }

    /// Use an explicit base URL
    pub fn new(base: impl Into<String>, config: &SiteConfig) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            locales: config.locales.clone(),
            default_locale: config.default_locale,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Absolute URL for a site path
    pub fn absolute(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    /// Canonical URL plus hreflang alternates for a localized path
    pub fn alternates(&self, locale: Locale, path: &str) -> Alternates {
        alt_locales(&self.base, locale, &self.locales, self.default_locale, path)
    }

    pub fn post_url(&self, locale: Locale, slug: &str) -> String {
        post_url(&self.base, locale, slug)
    }

    pub fn og_image_url(&self, locale: Locale, slug: Option<&str>) -> String {
        og_image_url(&self.base, locale, slug)
    }
}
