// ── Routes and navigation guard ──
//
// Two routes: `/login` for guests and `/` for signed-in users. Any other
// path is a catch-all that redirects to `/`, after which the guard applies.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::model::UserProfile;
use crate::stream::Subscription;

/// A navigable screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Route {
    Login,
    Dashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Dashboard => "Dashboard",
        }
    }

    pub fn requires_auth(self) -> bool {
        self == Self::Dashboard
    }

    pub fn requires_guest(self) -> bool {
        self == Self::Login
    }

    /// Map a path to its route. Query strings, fragments, and trailing
    /// slashes are ignored; unknown paths resolve to the dashboard.
    pub fn resolve(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');

        match path {
            "/login" | "login" => Self::Login,
            _ => Self::Dashboard,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Where a navigation to `target` actually lands.
pub fn guard(target: Route, logged_in: bool) -> Route {
    if target.requires_auth() && !logged_in {
        Route::Login
    } else if target.requires_guest() && logged_in {
        Route::Dashboard
    } else {
        target
    }
}

/// Current route, published on a `watch` channel.
///
/// Reads the session to apply [`guard`] on every navigation. Starts at
/// [`Route::Login`].
pub struct Navigator {
    route: watch::Sender<Route>,
    session: watch::Receiver<Option<Arc<UserProfile>>>,
}

impl Navigator {
    pub fn new(session: watch::Receiver<Option<Arc<UserProfile>>>) -> Self {
        let (route, _) = watch::channel(Route::Login);
        Self { route, session }
    }

    /// Navigate to `target`, returning the route after the guard ran.
    pub fn navigate(&self, target: Route) -> Route {
        let logged_in = self.session.borrow().is_some();
        let landed = guard(target, logged_in);
        if landed != target {
            debug!(%target, %landed, "navigation redirected");
        }
        self.route.send_if_modified(|current| {
            let changed = *current != landed;
            *current = landed;
            changed
        });
        landed
    }

    pub fn navigate_path(&self, path: &str) -> Route {
        self.navigate(Route::resolve(path))
    }

    pub fn current(&self) -> Route {
        *self.route.borrow()
    }

    pub fn subscribe(&self) -> Subscription<Route> {
        Subscription::new(self.route.subscribe())
    }
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("route", &self.current())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    #[test]
    fn resolve_handles_catch_all() {
        assert_eq!(Route::resolve("/login"), Route::Login);
        assert_eq!(Route::resolve("/login/?next=/"), Route::Login);
        assert_eq!(Route::resolve("/"), Route::Dashboard);
        assert_eq!(Route::resolve(""), Route::Dashboard);
        assert_eq!(Route::resolve("/reports/2025"), Route::Dashboard);
    }

    #[test]
    fn guard_rules() {
        assert_eq!(guard(Route::Dashboard, false), Route::Login);
        assert_eq!(guard(Route::Dashboard, true), Route::Dashboard);
        assert_eq!(guard(Route::Login, true), Route::Dashboard);
        assert_eq!(guard(Route::Login, false), Route::Login);
    }

    #[test]
    fn unknown_path_without_session_lands_on_login() {
        let (session, rx) = watch::channel(None);
        let nav = Navigator::new(rx);
        assert_eq!(nav.navigate_path("/does-not-exist"), Route::Login);

        session.send_replace(Some(Arc::new(UserProfile::for_role(Role::Client))));
        assert_eq!(nav.navigate_path("/does-not-exist"), Route::Dashboard);
        assert_eq!(nav.navigate(Route::Login), Route::Dashboard);
        assert_eq!(nav.current(), Route::Dashboard);
    }
}
