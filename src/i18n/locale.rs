//! Supported locales and locale resolution.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A display language. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Es,
}

impl Locale {
    pub const SUPPORTED: [Locale; 2] = [Locale::Es, Locale::En];
    /// Active when nothing else applies.
    pub const DEFAULT: Locale = Locale::En;
    /// Consulted for catalog entries missing from the active locale.
    pub const FALLBACK: Locale = Locale::Es;

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }

    /// Exact match against the supported codes.
    pub fn from_code(code: &str) -> Option<Self> {
        Locale::SUPPORTED
            .into_iter()
            .find(|locale| locale.code() == code)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::DEFAULT
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::from_code(s).ok_or_else(|| {
            let supported: Vec<&str> = Locale::SUPPORTED.iter().map(|l| l.code()).collect();
            format!("unsupported locale {:?} (expected one of {})", s, supported.join(", "))
        })
    }
}

/// Picks the locale to use when a path carries none.
///
/// Resolution order:
/// 1. The stored preference, if it is a supported code.
/// 2. The first two characters of the browser/system language tag, if supported.
/// 3. [`Locale::DEFAULT`].
pub fn resolve_locale(stored: Option<&str>, language_tag: Option<&str>) -> Locale {
    if let Some(locale) = stored.and_then(Locale::from_code) {
        return locale;
    }

    if let Some(tag) = language_tag {
        let prefix: String = tag.chars().take(2).collect();
        if let Some(locale) = Locale::from_code(&prefix) {
            return locale;
        }
    }

    Locale::DEFAULT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_preference_takes_priority() {
        for locale in Locale::SUPPORTED {
            assert_eq!(resolve_locale(Some(locale.code()), Some("en-US")), locale);
            assert_eq!(resolve_locale(Some(locale.code()), None), locale);
        }
    }

    #[test]
    fn test_browser_language_prefix() {
        assert_eq!(resolve_locale(None, Some("es-AR")), Locale::Es);
        assert_eq!(resolve_locale(Some("fr"), Some("es_ES.UTF-8")), Locale::Es);
        assert_eq!(resolve_locale(Some(""), Some("en")), Locale::En);
    }

    #[test]
    fn test_default_when_nothing_matches() {
        assert_eq!(resolve_locale(None, None), Locale::DEFAULT);
        assert_eq!(resolve_locale(Some("de"), Some("fr-FR")), Locale::DEFAULT);
        assert_eq!(resolve_locale(None, Some("e")), Locale::DEFAULT);
        assert_eq!(resolve_locale(None, Some("ES-es")), Locale::DEFAULT);
    }

    #[test]
    fn test_code_round_trip() {
        assert_eq!("es".parse::<Locale>(), Ok(Locale::Es));
        assert!("EN".parse::<Locale>().is_err());
        assert_eq!(Locale::En.to_string(), "en");
    }
}
