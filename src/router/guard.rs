//! The navigation guard.
//!
//! A pure decision over an explicit context: the caller supplies the session flag and
//! the preferred locale, and owns the active locale the guard may update.

use lazy_static::lazy_static;
use regex::Regex;

use super::table::Visibility;
use crate::i18n::Locale;

lazy_static! {
    // Matches a supported locale segment at the start of a path and captures the rest.
    static ref LOCALE_PREFIX: Regex = {
        let codes: Vec<&str> = Locale::SUPPORTED.iter().map(|l| l.code()).collect();
        Regex::new(&format!("^/(?:{})(/.*)?$", codes.join("|"))).unwrap()
    };
}

/// Where a navigation is heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    pub path: String,
    /// The raw locale segment, if the path has one.
    pub locale: Option<String>,
    pub visibility: Visibility,
}

/// State the guard decides on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardContext {
    pub authenticated: bool,
    /// Result of locale resolution, used when the path's locale is unsupported.
    pub preferred: Locale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

/// Removes a supported locale prefix. `/es/login` → `/login`, `/en` → `/`.
pub fn canonical_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let rest = match LOCALE_PREFIX.captures(path) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
        None => path,
    };
    let rest = rest.trim_end_matches('/');
    if rest.is_empty() {
        "/".to_string()
    } else {
        rest.to_string()
    }
}

fn localized(locale: Option<&str>, path: &str) -> String {
    match locale {
        Some(locale) => format!("/{}{}", locale, path),
        None => path.to_string(),
    }
}

/// Decides whether `target` may be shown.
///
/// Rules, first match wins:
/// 1. unsupported locale segment → `/<preferred>/login`
/// 2. supported segment → becomes the active locale; no segment → default locale
/// 3. root while signed out → login
/// 4. protected route while signed out → login
/// 5. public route while signed in → root
///
/// Redirects keep the target's locale segment when it had one.
pub fn guard(target: &NavigationTarget, active: &mut Locale, ctx: &GuardContext) -> GuardDecision {
    let locale = target.locale.as_deref();

    match locale {
        Some(code) => match Locale::from_code(code) {
            Some(requested) => {
                if *active != requested {
                    *active = requested;
                }
            }
            None => return GuardDecision::Redirect(format!("/{}/login", ctx.preferred)),
        },
        None => {
            if *active != Locale::DEFAULT {
                *active = Locale::DEFAULT;
            }
        }
    }

    let canonical = canonical_path(&target.path);
    let public = target.visibility == Visibility::Public;

    if canonical == "/" && !ctx.authenticated {
        return GuardDecision::Redirect(localized(locale, "/login"));
    }

    if !ctx.authenticated && !public {
        return GuardDecision::Redirect(localized(locale, "/login"));
    }

    if ctx.authenticated && public {
        return GuardDecision::Redirect(localized(locale, "/"));
    }

    GuardDecision::Allow
}
