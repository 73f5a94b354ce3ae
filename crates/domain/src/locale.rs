//! Supported site locales.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use vitrin_core::{AppError, AppResult};

/// A validated BCP 47 style language code such as `tr` or `pt-br`.
///
/// Codes are normalized to lowercase so they can be used verbatim as URL
/// path segments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// Creates a validated locale code.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into().trim().to_ascii_lowercase();

        let mut segments = value.split('-');
        let language = segments.next().unwrap_or_default();
        if !(2..=3).contains(&language.len())
            || !language.chars().all(|character| character.is_ascii_lowercase())
        {
            return Err(AppError::Validation(format!(
                "locale '{value}' must start with a 2-3 letter language code"
            )));
        }

        for region in segments {
            if !(2..=8).contains(&region.len())
                || !region
                    .chars()
                    .all(|character| character.is_ascii_alphanumeric())
            {
                return Err(AppError::Validation(format!(
                    "locale '{value}' has an invalid subtag '{region}'"
                )));
            }
        }

        Ok(Self(value))
    }

    /// Returns the normalized code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for Locale {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value)
    }
}

impl TryFrom<String> for Locale {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Locale> for String {
    fn from(value: Locale) -> Self {
        value.0
    }
}

impl Display for Locale {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Ordered set of locales the site is published in, with its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSet {
    locales: Vec<Locale>,
    default_locale: Locale,
}

impl LocaleSet {
    /// Creates a locale set.
    ///
    /// The set must be non-empty, free of duplicates and contain the default.
    pub fn new(locales: Vec<Locale>, default_locale: Locale) -> AppResult<Self> {
        if locales.is_empty() {
            return Err(AppError::Validation(
                "at least one supported locale is required".to_owned(),
            ));
        }

        for (index, locale) in locales.iter().enumerate() {
            if locales[..index].contains(locale) {
                return Err(AppError::Validation(format!(
                    "locale '{locale}' is listed more than once"
                )));
            }
        }

        if !locales.contains(&default_locale) {
            return Err(AppError::Validation(format!(
                "default locale '{default_locale}' is not a supported locale"
            )));
        }

        Ok(Self {
            locales,
            default_locale,
        })
    }

    /// Parses a comma-separated list such as `tr,en`.
    pub fn parse(locales: &str, default_locale: &str) -> AppResult<Self> {
        let locales = locales
            .split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(Locale::new)
            .collect::<AppResult<Vec<_>>>()?;

        Self::new(locales, Locale::new(default_locale)?)
    }

    /// Returns the supported locales in configuration order.
    #[must_use]
    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    /// Returns the locale served when no other language matches.
    #[must_use]
    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Returns whether the locale is supported.
    #[must_use]
    pub fn contains(&self, locale: &Locale) -> bool {
        self.locales.contains(locale)
    }

    /// Looks up a supported locale by its raw code.
    #[must_use]
    pub fn find(&self, code: &str) -> Option<&Locale> {
        let normalized = code.trim().to_ascii_lowercase();
        self.locales
            .iter()
            .find(|locale| locale.as_str() == normalized)
    }
}
