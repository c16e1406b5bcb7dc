//! Supported locales

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A locale the blog publishes in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ko,
    En,
    Uz,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported locale `{0}` (expected one of: ko, en, uz)")]
pub struct LocaleError(pub String);

impl Locale {
    /// Every supported locale, in routing order
    pub const ALL: [Locale; 3] = [Locale::Ko, Locale::En, Locale::Uz];

    /// Short code used in paths and content directories
    pub fn code(self) -> &'static str {
        match self {
            Locale::Ko => "ko",
            Locale::En => "en",
            Locale::Uz => "uz",
        }
    }

    /// BCP 47 tag used for `<html lang>` and date formatting
    pub fn bcp47(self) -> &'static str {
        match self {
            Locale::Ko => "ko-KR",
            Locale::En => "en-US",
            Locale::Uz => "uz-UZ",
        }
    }

    /// Name of the language in the language itself
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::Ko => "한국어",
            Locale::En => "English",
            Locale::Uz => "O'zbekcha",
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::Ko
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" => Ok(Locale::Ko),
            "en" => Ok(Locale::En),
            "uz" => Ok(Locale::Uz),
            other => Err(LocaleError(other.to_string())),
        }
    }
}
