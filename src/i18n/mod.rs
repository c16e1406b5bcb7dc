//! Internationalization (i18n) support

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::locale::Locale;

/// Built-in message catalogs, overridable per site
const BUILTIN: [(Locale, &str); 3] = [
    (Locale::Ko, include_str!("messages/ko.yml")),
    (Locale::En, include_str!("messages/en.yml")),
    (Locale::Uz, include_str!("messages/uz.yml")),
];

/// Message catalogs keyed by locale, flattened to dotted keys
#[derive(Debug, Clone)]
pub struct I18n {
    fallback: Locale,
    translations: HashMap<Locale, HashMap<String, String>>,
}

impl I18n {
    /// Create an empty handler
    pub fn new(fallback: Locale) -> Self {
        Self {
            fallback,
            translations: HashMap::new(),
        }
    }

    /// Handler preloaded with the built-in catalogs
    pub fn builtin(fallback: Locale) -> Result<Self> {
        let mut i18n = Self::new(fallback);
        for (locale, source) in BUILTIN {
            let value: serde_json::Value = serde_yaml::from_str(source)
                .with_context(|| format!("Built-in messages for {} are invalid", locale))?;
            i18n.merge(locale, &value);
        }
        Ok(i18n)
    }

    /// Load `<locale>.{yml,yaml,json}` files from a directory, overriding
    /// built-in messages key by key
    pub fn load_dir<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str());
            if !matches!(ext, Some("yml") | Some("yaml") | Some("json")) {
                continue;
            }

            let locale = match path.file_stem().and_then(|s| s.to_str()).map(str::parse) {
                Some(Ok(locale)) => locale,
                _ => {
                    tracing::debug!("Ignoring messages file for unknown locale {:?}", path);
                    continue;
                }
            };

            let content = fs::read_to_string(&path)?;
            let parsed = if ext == Some("json") {
                serde_json::from_str::<serde_json::Value>(&content).map_err(anyhow::Error::from)
            } else {
                serde_yaml::from_str::<serde_json::Value>(&content).map_err(anyhow::Error::from)
            };

            match parsed {
                Ok(value) => {
                    self.merge(locale, &value);
                    tracing::debug!("Loaded messages file: {:?}", path);
                }
                Err(e) => {
                    tracing::warn!("Failed to parse messages file {:?}: {}", path, e);
                }
            }
        }

        Ok(())
    }

    fn merge(&mut self, locale: Locale, value: &serde_json::Value) {
        let entry = self.translations.entry(locale).or_default();
        flatten_translations(value, "", entry);
    }

    /// Get a translation by dotted key, falling back to the fallback locale
    /// and finally to the key itself
    pub fn get(&self, locale: Locale, key: &str) -> String {
        self.lookup(locale, key)
            .or_else(|| self.lookup(self.fallback, key))
            .unwrap_or_else(|| key.to_string())
    }

    /// Get a translation and substitute `{name}` placeholders
    pub fn format(&self, locale: Locale, key: &str, args: &[(&str, &str)]) -> String {
        let mut message = self.get(locale, key);
        for (name, value) in args {
            message = message.replace(&format!("{{{}}}", name), value);
        }
        message
    }

    fn lookup(&self, locale: Locale, key: &str) -> Option<String> {
        self.translations.get(&locale)?.get(key).cloned()
    }

    /// All translations for a locale with fallback entries filled in
    pub fn catalog(&self, locale: Locale) -> HashMap<String, String> {
        let mut result = self.translations.get(&locale).cloned().unwrap_or_default();

        if locale != self.fallback {
            if let Some(fallback) = self.translations.get(&self.fallback) {
                for (k, v) in fallback {
                    result.entry(k.clone()).or_insert_with(|| v.clone());
                }
            }
        }

        result
    }

    /// Catalog nested back into objects, for template lookups like `t.home.title`
    pub fn messages(&self, locale: Locale) -> serde_json::Value {
        let mut root = serde_json::Map::new();
        for (key, value) in self.catalog(locale) {
            insert_nested(&mut root, &key, value);
        }
        serde_json::Value::Object(root)
    }
}

fn insert_nested(map: &mut serde_json::Map<String, serde_json::Value>, key: &str, value: String) {
    match key.split_once('.') {
        None => {
            map.insert(key.to_string(), serde_json::Value::String(value));
        }
        Some((head, rest)) => {
            let child = map
                .entry(head.to_string())
                .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
            if !child.is_object() {
                *child = serde_json::Value::Object(serde_json::Map::new());
            }
            if let serde_json::Value::Object(child) = child {
                insert_nested(child, rest, value);
            }
        }
    }
}

/// Flatten nested messages into dotted keys (e.g. "home.title")
fn flatten_translations(
    value: &serde_json::Value,
    prefix: &str,
    result: &mut HashMap<String, String>,
) {
    let serde_json::Value::Object(map) = value else {
        return;
    };

    for (key, value) in map {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            serde_json::Value::String(s) => {
                result.insert(full_key, s.clone());
            }
            serde_json::Value::Number(n) => {
                result.insert(full_key, n.to_string());
            }
            serde_json::Value::Bool(b) => {
                result.insert(full_key, b.to_string());
            }
            serde_json::Value::Object(_) => flatten_translations(value, &full_key, result),
            _ => {}
        }
    }
}
