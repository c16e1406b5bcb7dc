//! URL helper functions

use indexmap::IndexMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use super::slugify;
use crate::locale::Locale;

/// Characters escaped by JavaScript's `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Fallback used when neither the environment nor the config names a host
pub const LOCAL_BASE_URL: &str = "http://localhost:4000";

/// Percent-encode a single path or query component
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// Resolve the public base URL.
///
/// Explicit variables (`BASE_URL`, `SITE_URL`) win over the configured
/// `url`; Netlify's `URL` / `DEPLOY_PRIME_URL` are used only when they look
/// like absolute URLs. Trailing slashes are stripped.
pub fn resolve_base_url<F>(configured: Option<&str>, env: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

    if let Some(explicit) = non_empty(env("BASE_URL")).or_else(|| non_empty(env("SITE_URL"))) {
        return strip_trailing_slash(&explicit);
    }

    if let Some(url) = configured.filter(|u| !u.trim().is_empty()) {
        return strip_trailing_slash(url);
    }

    let netlify = non_empty(env("URL")).or_else(|| non_empty(env("DEPLOY_PRIME_URL")));
    if let Some(url) = netlify.filter(|u| u.starts_with("http")) {
        return strip_trailing_slash(&url);
    }

    LOCAL_BASE_URL.to_string()
}

fn strip_trailing_slash(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Canonical and alternate-language URLs for one localized path
#[derive(Debug, Clone, Serialize)]
pub struct Alternates {
    pub canonical: String,
    /// hreflang -> URL, in locale order followed by `x-default`
    pub languages: IndexMap<String, String>,
}

/// Build `hreflang` alternates for `path` under every locale
pub fn alt_locales(
    base: &str,
    locale: Locale,
    locales: &[Locale],
    default_locale: Locale,
    path: &str,
) -> Alternates {
    let clean = if path.starts_with('/') || path.is_empty() {
        path.to_string()
    } else {
        format!("/{}", path)
    };

    let mut languages = IndexMap::new();
    for l in locales {
        languages.insert(l.code().to_string(), format!("{}/{}{}", base, l, clean));
    }
    languages.insert(
        "x-default".to_string(),
        format!("{}/{}{}", base, default_locale, clean),
    );

    Alternates {
        canonical: format!("{}/{}{}", base, locale, clean),
        languages,
    }
}

/// Site-relative path of a post
pub fn post_path(locale: Locale, slug: &str) -> String {
    format!("/{}/blog/{}/", locale, encode_component(slug))
}

/// Site-relative path of a tag listing; `None` when the tag has no usable slug
pub fn tag_path(locale: Locale, tag: &str) -> Option<String> {
    let slug = slugify(tag);
    if slug.is_empty() {
        return None;
    }
    Some(format!("/{}/blog/tags/{}/", locale, encode_component(&slug)))
}

/// Absolute URL of a post
pub fn post_url(base: &str, locale: Locale, slug: &str) -> String {
    format!("{}{}", base, post_path(locale, slug))
}

/// Absolute URL of the OG card for a post, or the locale's default card
pub fn og_image_url(base: &str, locale: Locale, slug: Option<&str>) -> String {
    let name = slug.map(encode_component).unwrap_or_else(|| "index".to_string());
    format!("{}/{}/og/{}.svg", base, locale, name)
}

/// Share link for X / Twitter
pub fn twitter_share_url(title: &str, url: &str) -> String {
    format!(
        "https://twitter.com/intent/tweet?text={}&url={}",
        encode_component(title),
        encode_component(url)
    )
}

/// Share link for LinkedIn
pub fn linkedin_share_url(url: &str) -> String {
    format!(
        "https://www.linkedin.com/sharing/share-offsite/?url={}",
        encode_component(url)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("hello world/é"), "hello%20world%2F%C3%A9");
        assert_eq!(encode_component("a-b_c.d~(x)"), "a-b_c.d~(x)");
    }

    #[test]
    fn test_resolve_base_url_precedence() {
        let env = env_from(&[("SITE_URL", "https://site.example/"), ("URL", "https://n.app")]);
        assert_eq!(
            resolve_base_url(Some("https://config.example"), env),
            "https://site.example"
        );

        let env = env_from(&[("URL", "https://n.app//")]);
        assert_eq!(
            resolve_base_url(Some("https://config.example/"), env),
            "https://config.example"
        );

        let env = env_from(&[("URL", "https://n.app//")]);
        assert_eq!(resolve_base_url(None, env), "https://n.app");

        let env = env_from(&[("DEPLOY_PRIME_URL", "deploy-preview")]);
        assert_eq!(resolve_base_url(None, env), LOCAL_BASE_URL);
    }

    #[test]
    fn test_alt_locales() {
        let alts = alt_locales(
            "https://b.example",
            Locale::En,
            &Locale::ALL,
            Locale::Ko,
            "blog/hello",
        );
        assert_eq!(alts.canonical, "https://b.example/en/blog/hello");
        let keys: Vec<_> = alts.languages.keys().cloned().collect();
        assert_eq!(keys, vec!["ko", "en", "uz", "x-default"]);
        assert_eq!(alts.languages["x-default"], "https://b.example/ko/blog/hello");
    }

    #[test]
    fn test_tag_path() {
        assert_eq!(tag_path(Locale::En, "Web Dev").as_deref(), Some("/en/blog/tags/web-dev/"));
        assert_eq!(
            tag_path(Locale::Ko, "러스트").as_deref(),
            Some("/ko/blog/tags/%EB%9F%AC%EC%8A%A4%ED%8A%B8/")
        );
        assert!(tag_path(Locale::En, "!!!").is_none());
    }

    #[test]
    fn test_post_and_og_urls() {
        assert_eq!(
            post_url("https://b.example", Locale::Ko, "첫 글"),
            "https://b.example/ko/blog/%EC%B2%AB%20%EA%B8%80/"
        );
        assert_eq!(
            og_image_url("https://b.example", Locale::Uz, None),
            "https://b.example/uz/og/index.svg"
        );
        assert_eq!(
            og_image_url("https://b.example", Locale::En, Some("hello")),
            "https://b.example/en/og/hello.svg"
        );
    }

    #[test]
    fn test_share_links() {
        let url = twitter_share_url("Hi & bye", "https://b.example/en/blog/x/");
        assert!(url.contains("text=Hi%20%26%20bye"));
        assert!(url.contains("url=https%3A%2F%2Fb.example%2Fen%2Fblog%2Fx%2F"));
    }
}
