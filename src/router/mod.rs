//! Locale-aware client-side routing.
//!
//! `Router::resolve` runs one navigation to completion: match the path, follow redirect
//! records, run the guard, and repeat on each redirect until a view is allowed.

pub mod guard;
pub mod table;

use log::debug;

use crate::auth::Session;
use crate::error::AppError;
use crate::i18n::{resolve_locale, Locale};

pub use guard::{canonical_path, guard, GuardContext, GuardDecision, NavigationTarget};
pub use table::{match_path, route_for, Matched, Route, View, Visibility, ROUTES};

/// Upper bound on redirect hops for a single navigation.
const MAX_REDIRECTS: usize = 10;

/// A completed navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub path: String,
    pub name: &'static str,
    pub view: View,
    pub locale: Locale,
    /// The path originally requested, when a redirect happened.
    pub redirected_from: Option<String>,
}

pub struct Router {
    session: Session,
    language_tag: Option<String>,
    active_locale: Locale,
    current: Option<Navigation>,
}

impl Router {
    /// `language_tag` plays the role of the browser language (e.g. `es-AR`).
    pub fn new(session: Session, language_tag: Option<String>) -> Self {
        Self {
            session,
            language_tag,
            active_locale: Locale::DEFAULT,
            current: None,
        }
    }

    pub fn active_locale(&self) -> Locale {
        self.active_locale
    }

    pub fn preferred_locale(&self) -> Locale {
        resolve_locale(
            self.session.preferred_language().as_deref(),
            self.language_tag.as_deref(),
        )
    }

    pub fn current(&self) -> Option<&Navigation> {
        self.current.as_ref()
    }

    /// Resolves `path` to the view that will actually be shown, without recording it.
    pub fn resolve(&mut self, path: &str) -> Result<Navigation, AppError> {
        let mut path = path.to_string();

        for _ in 0..=MAX_REDIRECTS {
            // Session and preference are re-read on every hop.
            let authenticated = self.session.is_authenticated();
            let preferred = self.preferred_locale();

            let matched = match_path(&path);
            let next = match &matched {
                Matched::Root if authenticated => format!("/{}/", preferred),
                Matched::Root | Matched::CatchAll => format!("/{}/login", preferred),
                Matched::Route { route, locale } => {
                    let target = NavigationTarget {
                        path: path.clone(),
                        locale: locale.clone(),
                        visibility: route.visibility,
                    };
                    let ctx = GuardContext {
                        authenticated,
                        preferred,
                    };
                    match guard(&target, &mut self.active_locale, &ctx) {
                        GuardDecision::Allow => {
                            return Ok(Navigation {
                                path,
                                name: matched.name(),
                                view: route.view,
                                locale: self.active_locale,
                                redirected_from: None,
                            });
                        }
                        GuardDecision::Redirect(to) => to,
                    }
                }
            };

            debug!("Redirecting {} ({}) -> {}", path, matched.name(), next);
            path = next;
        }

        Err(AppError::Navigation(format!(
            "too many redirects while resolving {}",
            path
        )))
    }

    /// Navigates to `path` and makes the result the current route.
    pub fn push(&mut self, path: &str) -> Result<&Navigation, AppError> {
        let mut navigation = self.resolve(path)?;
        if navigation.path != path {
            navigation.redirected_from = Some(path.to_string());
        }
        debug!("Navigated to {} ({:?})", navigation.path, navigation.view);
        Ok(&*self.current.insert(navigation))
    }

    /// Sends the user to the login screen unless it is already showing.
    /// Returns whether a navigation happened.
    pub fn redirect_to_login(&mut self) -> Result<bool, AppError> {
        if self.current.as_ref().map(|nav| nav.view) == Some(View::Login) {
            return Ok(false);
        }
        self.push("/login")?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthPayload, User};
    use crate::storage::MemoryStorage;
    use pretty_assertions::assert_eq;
    use serde_json::Map;
    use std::sync::Arc;

    fn setup(language_tag: Option<&str>) -> (Router, Session) {
        let session = Session::new(Arc::new(MemoryStorage::new()));
        (
            Router::new(session.clone(), language_tag.map(str::to_string)),
            session,
        )
    }

    fn sign_in(session: &Session) {
        session
            .store(&AuthPayload {
                user: User {
                    id: 1,
                    name: "Ada".into(),
                    email: "ada@example.com".into(),
                    extra: Map::new(),
                },
                token: "tok-1".into(),
            })
            .unwrap();
    }

    #[test]
    fn test_root_signed_out_goes_to_preferred_login() {
        let (mut router, _) = setup(Some("es-ES"));
        let nav = router.push("/").unwrap();
        assert_eq!(nav.path, "/es/login");
        assert_eq!(nav.view, View::Login);
        assert_eq!(nav.locale, Locale::Es);
        assert_eq!(nav.redirected_from.as_deref(), Some("/"));
    }

    #[test]
    fn test_root_signed_in_goes_to_dashboard() {
        let (mut router, session) = setup(None);
        sign_in(&session);
        let nav = router.push("/").unwrap();
        assert_eq!(nav.path, "/en/");
        assert_eq!(nav.view, View::Dashboard);
        assert_eq!(nav.name, "DashboardWithLocale");
    }

    #[test]
    fn test_stored_language_beats_browser_language() {
        let (mut router, session) = setup(Some("en-US"));
        session.set_preferred_language("es").unwrap();
        assert_eq!(router.push("/unknown/page/here").unwrap().path, "/es/login");
    }

    #[test]
    fn test_unsupported_locale_segment() {
        let (mut router, _) = setup(None);
        let nav = router.push("/fr/register").unwrap();
        assert_eq!(nav.path, "/en/login");
    }

    #[test]
    fn test_signed_in_public_route_bounces_to_root() {
        let (mut router, session) = setup(Some("es"));
        sign_in(&session);

        let nav = router.push("/es/login").unwrap();
        assert_eq!(nav.path, "/es/");

        // Bare `/login` is sent to `/`, which then resolves through the preferred locale.
        let nav = router.push("/login").unwrap();
        assert_eq!(nav.path, "/es/");
        assert_eq!(nav.view, View::Dashboard);
    }

    #[test]
    fn test_bare_public_route_uses_default_locale() {
        let (mut router, _) = setup(Some("es"));
        router.push("/es/login").unwrap();
        assert_eq!(router.active_locale(), Locale::Es);

        let nav = router.push("/register").unwrap();
        assert_eq!(nav.view, View::Register);
        assert_eq!(nav.redirected_from, None);
        assert_eq!(router.active_locale(), Locale::DEFAULT);
    }

    #[test]
    fn test_redirect_to_login_is_idempotent() {
        let (mut router, _) = setup(None);
        router.push("/es/login").unwrap();
        assert!(!router.redirect_to_login().unwrap());
        assert_eq!(router.current().map(|n| n.path.as_str()), Some("/es/login"));

        let (mut router, session) = router_signed_in();
        router.push("/en/").unwrap();
        session.clear().unwrap();
        assert!(router.redirect_to_login().unwrap());
        assert_eq!(router.current().map(|n| n.path.as_str()), Some("/login"));
    }

    fn router_signed_in() -> (Router, Session) {
        let (router, session) = setup(None);
        sign_in(&session);
        (router, session)
    }
}
