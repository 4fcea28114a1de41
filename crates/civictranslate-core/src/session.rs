// ── Session store ──
//
// Mock role-based login. The user is held in a `watch` channel that the
// navigator reads for its guard, so a login or logout both mutates the
// session and moves the route.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::CoreError;
use crate::model::{Role, UserProfile};
use crate::router::{Navigator, Route};
use crate::stream::Subscription;

/// Subscription to the signed-in user.
pub type SessionStream = Subscription<Option<Arc<UserProfile>>>;

/// Current identity plus the navigator it drives.
///
/// Cheaply cloneable; all clones share state.
#[derive(Clone, Debug)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    user: watch::Sender<Option<Arc<UserProfile>>>,
    navigator: Navigator,
}

impl SessionStore {
    pub fn new() -> Self {
        let (user, rx) = watch::channel(None);
        Self {
            inner: Arc::new(SessionInner {
                user,
                navigator: Navigator::new(rx),
            }),
        }
    }

    /// Sign in by role key (`"admin"` or `"client"`).
    ///
    /// An unknown key leaves the session and route untouched.
    pub fn login(&self, role: &str) -> Result<Arc<UserProfile>, CoreError> {
        let role = role
            .trim()
            .parse::<Role>()
            .map_err(|_| CoreError::UnknownRole {
                role: role.to_owned(),
            })?;
        Ok(self.login_as(role))
    }

    pub fn login_as(&self, role: Role) -> Arc<UserProfile> {
        let profile = Arc::new(UserProfile::for_role(role));
        info!(name = %profile.name, %role, "logged in");
        self.inner.user.send_replace(Some(Arc::clone(&profile)));
        self.inner.navigator.navigate(Route::Dashboard);
        profile
    }

    pub fn logout(&self) {
        info!("logged out");
        self.clear();
    }

    /// Drop the session because the server rejected the credentials.
    pub fn expire(&self) {
        warn!("session expired; returning to login");
        self.clear();
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.user.borrow().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.inner
            .user
            .borrow()
            .as_ref()
            .is_some_and(|u| u.is_admin())
    }

    pub fn current_user(&self) -> Option<Arc<UserProfile>> {
        self.inner.user.borrow().clone()
    }

    pub fn subscribe(&self) -> SessionStream {
        Subscription::new(self.inner.user.subscribe())
    }

    pub fn navigator(&self) -> &Navigator {
        &self.inner.navigator
    }

    fn clear(&self) {
        self.inner.user.send_replace(None);
        self.inner.navigator.navigate(Route::Login);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn admin_login() {
        let session = SessionStore::new();
        let user = session.login("admin").unwrap();

        assert_eq!(user.name, "Sarah Mitchell");
        assert_eq!(user.email, "admin@civictranslate.gov");
        assert_eq!(user.initials, "SM");
        assert!(session.is_logged_in());
        assert!(session.is_admin());
        assert_eq!(session.navigator().current(), Route::Dashboard);
    }

    #[test]
    fn client_login_is_not_admin() {
        let session = SessionStore::new();
        let user = session.login("client").unwrap();

        assert_eq!(user.name, "James Whitford");
        assert_eq!(user.initials, "JW");
        assert!(session.is_logged_in());
        assert!(!session.is_admin());
    }

    #[test]
    fn unknown_role_leaves_session_untouched() {
        let session = SessionStore::new();
        session.login("client").unwrap();

        let err = session.login("superuser").unwrap_err();
        assert_eq!(
            err,
            CoreError::UnknownRole {
                role: "superuser".into()
            }
        );
        assert_eq!(session.current_user().unwrap().role, Role::Client);
        assert_eq!(session.navigator().current(), Route::Dashboard);
    }

    #[test]
    fn logout_clears_and_navigates_to_login() {
        let session = SessionStore::new();
        session.login("admin").unwrap();
        session.logout();

        assert!(!session.is_logged_in());
        assert!(!session.is_admin());
        assert_eq!(session.navigator().current(), Route::Login);
        assert_eq!(session.navigator().navigate_path("/"), Route::Login);
    }

    #[tokio::test]
    async fn subscribers_see_login_and_expiry() {
        let session = SessionStore::new();
        let mut sub = session.subscribe();
        assert!(sub.current().is_none());

        session.login_as(Role::Admin);
        assert!(sub.changed().await.unwrap().is_some());

        session.expire();
        assert!(sub.changed().await.unwrap().is_none());
    }
}
