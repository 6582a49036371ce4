//! Static route definitions and path matching.
//!
//! Every view is reachable both bare (`/login`) and under a locale segment
//! (`/es/login`). Two redirect records sit around them: `/` itself, and a catch-all
//! for anything that matches no view.

/// The screens the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Register,
    Dashboard,
}

/// Who may reach a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Reachable only without a session (sign-in screens).
    Public,
    /// Requires a session.
    Protected,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Route {
    /// Path below the optional locale segment, without a leading slash.
    pub segment: &'static str,
    pub name: &'static str,
    pub localized_name: &'static str,
    pub view: View,
    pub visibility: Visibility,
}

pub static ROUTES: [Route; 3] = [
    Route {
        segment: "login",
        name: "Login",
        localized_name: "LoginWithLocale",
        view: View::Login,
        visibility: Visibility::Public,
    },
    Route {
        segment: "register",
        name: "Register",
        localized_name: "RegisterWithLocale",
        view: View::Register,
        visibility: Visibility::Public,
    },
    Route {
        segment: "",
        name: "Dashboard",
        localized_name: "DashboardWithLocale",
        view: View::Dashboard,
        visibility: Visibility::Protected,
    },
];

pub fn route_for(view: View) -> &'static Route {
    match view {
        View::Login => &ROUTES[0],
        View::Register => &ROUTES[1],
        View::Dashboard => &ROUTES[2],
    }
}

/// Outcome of matching a concrete path against the table.
#[derive(Debug, PartialEq, Eq)]
pub enum Matched {
    /// Exactly `/`: redirected according to session and preferred locale.
    Root,
    /// A view route. `locale` is the raw first segment when the path carried one;
    /// it is not checked against the supported set here.
    Route {
        route: &'static Route,
        locale: Option<String>,
    },
    /// Nothing matched.
    CatchAll,
}

impl Matched {
    pub fn name(&self) -> &'static str {
        match self {
            Matched::Root => "Root",
            Matched::Route {
                route,
                locale: Some(_),
            } => route.localized_name,
            Matched::Route { route, locale: None } => route.name,
            Matched::CatchAll => "NotFound",
        }
    }
}

/// Strips query string and fragment and splits into non-empty segments.
fn segments(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn find(segment: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|route| route.segment == segment)
}

/// Matches `path` in declaration order: `/`, bare routes, locale-prefixed routes,
/// catch-all. A trailing slash is ignored.
pub fn match_path(path: &str) -> Matched {
    match segments(path).as_slice() {
        [] => Matched::Root,
        [first] => match find(first) {
            Some(route) if !route.segment.is_empty() => Matched::Route {
                route,
                locale: None,
            },
            _ => Matched::Route {
                route: route_for(View::Dashboard),
                locale: Some(first.to_string()),
            },
        },
        [locale, child] => match find(child) {
            Some(route) if !route.segment.is_empty() => Matched::Route {
                route,
                locale: Some(locale.to_string()),
            },
            _ => Matched::CatchAll,
        },
        _ => Matched::CatchAll,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_and_locale(path: &str) -> Option<(View, Option<String>)> {
        match match_path(path) {
            Matched::Route { route, locale } => Some((route.view, locale)),
            _ => None,
        }
    }

    #[test]
    fn test_root() {
        assert_eq!(match_path("/"), Matched::Root);
        assert_eq!(match_path(""), Matched::Root);
        assert_eq!(match_path("/?next=tasks"), Matched::Root);
    }

    #[test]
    fn test_bare_routes() {
        assert_eq!(view_and_locale("/login"), Some((View::Login, None)));
        assert_eq!(view_and_locale("/register/"), Some((View::Register, None)));
    }

    #[test]
    fn test_locale_routes() {
        assert_eq!(
            view_and_locale("/es/login"),
            Some((View::Login, Some("es".to_string())))
        );
        assert_eq!(
            view_and_locale("/en/"),
            Some((View::Dashboard, Some("en".to_string())))
        );
        // Any single segment is taken as a locale; the guard rejects unsupported ones.
        assert_eq!(
            view_and_locale("/tasks"),
            Some((View::Dashboard, Some("tasks".to_string())))
        );
    }

    #[test]
    fn test_catch_all() {
        assert_eq!(match_path("/en/settings"), Matched::CatchAll);
        assert_eq!(match_path("/en/login/extra"), Matched::CatchAll);
    }

    #[test]
    fn test_route_names() {
        assert_eq!(match_path("/login").name(), "Login");
        assert_eq!(match_path("/es/register").name(), "RegisterWithLocale");
        assert_eq!(match_path("/en").name(), "DashboardWithLocale");
        assert_eq!(match_path("/a/b/c").name(), "NotFound");
    }
}
