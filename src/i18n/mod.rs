//! Message catalogs.
//!
//! One nested JSON catalog per locale, embedded at build time. Keys are dotted paths
//! (`auth.login.form.email.validations.required`). A key missing from the active locale
//! is looked up in [`Locale::FALLBACK`], and failing that the key itself is returned.

pub mod locale;

use lazy_static::lazy_static;
use log::error;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use validator::ValidationErrors;

pub use locale::{resolve_locale, Locale};

lazy_static! {
    static ref CATALOG: Catalog = Catalog::embedded();
}

pub struct Catalog {
    messages: HashMap<Locale, Value>,
}

impl Catalog {
    pub fn from_json(sources: &[(Locale, &str)]) -> Result<Self, serde_json::Error> {
        let mut messages = HashMap::new();
        for (locale, raw) in sources {
            messages.insert(*locale, serde_json::from_str(raw)?);
        }
        Ok(Self { messages })
    }

    fn embedded() -> Self {
        let sources = [
            (Locale::En, include_str!("../../locales/en.json")),
            (Locale::Es, include_str!("../../locales/es.json")),
        ];
        Catalog::from_json(&sources).unwrap_or_else(|e| {
            error!("Embedded message catalog is malformed: {}", e);
            Self {
                messages: HashMap::new(),
            }
        })
    }

    pub fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        let mut node = self.messages.get(&locale)?;
        for part in key.split('.') {
            node = node.get(part)?;
        }
        node.as_str()
    }

    pub fn translate(&self, locale: Locale, key: &str) -> String {
        self.lookup(locale, key)
            .or_else(|| self.lookup(Locale::FALLBACK, key))
            .unwrap_or(key)
            .to_string()
    }
}

/// Translates `key` with the built-in catalogs.
pub fn t(locale: Locale, key: &str) -> String {
    CATALOG.translate(locale, key)
}

/// Translates `key` and fills `{name}` placeholders from `params`.
pub fn t_with(locale: Locale, key: &str, params: &[(&str, &str)]) -> String {
    let mut message = t(locale, key);
    for (name, value) in params {
        message = message.replace(&format!("{{{}}}", name), value);
    }
    message
}

/// Renders validation errors for display: one message per field, keyed by field name.
///
/// Each field's first error code `c` becomes the catalog key
/// `<prefix>.<field>.validations.<c>`; the error's params fill the placeholders.
pub fn translate_errors(
    locale: Locale,
    prefix: &str,
    errors: &ValidationErrors,
) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, list)| {
            let error = list.first()?;
            let key = format!("{}.{}.validations.{}", prefix, field, error.code);
            let mut message = t(locale, &key);
            for (name, value) in &error.params {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                message = message.replace(&format!("{{{}}}", name), &rendered);
            }
            Some((field.to_string(), message))
        })
        .collect()
}
