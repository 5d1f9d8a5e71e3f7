//! Route guarding driven by credential presence.
//!
//! The guard is a pure function of the token store's current value,
//! re-evaluated on every change notification, not only at mount. Repeated
//! notifications of the same value never produce a second redirect.

use crate::token::Credential;

/// Client routes. Login and register form the auth area; everything else
/// is protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Lists,
    ListDetail(i64),
}

impl Route {
    pub fn is_protected(self) -> bool {
        match self {
            Route::Login | Route::Register => false,
            Route::Lists | Route::ListDetail(_) => true,
        }
    }
}

/// Redirect decision produced by the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    /// Leave the protected area; history referencing it is cleared.
    ToLogin,
    /// Leave the auth area for the main screen.
    ToMain,
}

/// Decides whether `route` is permitted for the given auth state.
pub fn evaluate(route: Route, authenticated: bool) -> Option<Redirect> {
    if authenticated {
        if route.is_protected() {
            None
        } else {
            Some(Redirect::ToMain)
        }
    } else if route.is_protected() {
        Some(Redirect::ToLogin)
    } else {
        None
    }
}

/// Stateful wrapper over [`evaluate`] fed by token change notifications.
///
/// Tracks the last observed token value so that delivering the same value
/// twice (watch channels may re-notify) cannot cause a second redirect.
#[derive(Debug, Default)]
pub struct NavigationGuard {
    last_seen: Option<Option<Credential>>,
}

impl NavigationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the guard a token observation for the current route.
    /// Returns a redirect at most once per distinct token value.
    pub fn on_token_change(
        &mut self,
        token: Option<Credential>,
        current: Route,
    ) -> Option<Redirect> {
        if self.last_seen.as_ref() == Some(&token) {
            return None;
        }
        let authenticated = token.is_some();
        self.last_seen = Some(token);
        evaluate(current, authenticated)
    }
}

/// Navigation history with guard-aware redirects.
#[derive(Debug)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Navigator {
    pub fn new(start: Route) -> Self {
        Self { stack: vec![start] }
    }

    pub fn current(&self) -> Route {
        *self.stack.last().expect("navigator stack is never empty")
    }

    pub fn push(&mut self, route: Route) {
        self.stack.push(route);
    }

    /// Pops back to the previous route, staying put at the bottom.
    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    /// Applies a redirect, clearing history so back navigation cannot
    /// re-enter the area that was left.
    pub fn apply(&mut self, redirect: Redirect) {
        self.stack.clear();
        match redirect {
            Redirect::ToLogin => self.stack.push(Route::Login),
            Redirect::ToMain => self.stack.push(Route::Lists),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthenticated_protected_route_redirects_to_login() {
        assert_eq!(evaluate(Route::Lists, false), Some(Redirect::ToLogin));
        assert_eq!(
            evaluate(Route::ListDetail(3), false),
            Some(Redirect::ToLogin)
        );
        assert_eq!(evaluate(Route::Login, false), None);
        assert_eq!(evaluate(Route::Register, false), None);
    }

    #[test]
    fn test_authenticated_auth_route_redirects_to_main() {
        assert_eq!(evaluate(Route::Login, true), Some(Redirect::ToMain));
        assert_eq!(evaluate(Route::Register, true), Some(Redirect::ToMain));
        assert_eq!(evaluate(Route::Lists, true), None);
        assert_eq!(evaluate(Route::ListDetail(3), true), None);
    }

    #[test]
    fn test_guard_redirects_once_per_token_value() {
        let mut guard = NavigationGuard::new();
        let token = Some(Credential::new("T1"));

        assert_eq!(
            guard.on_token_change(token.clone(), Route::Login),
            Some(Redirect::ToMain)
        );
        // Same value re-delivered: no thrash.
        assert_eq!(guard.on_token_change(token, Route::Login), None);

        // Token cleared while on a protected route: exactly one redirect.
        assert_eq!(
            guard.on_token_change(None, Route::Lists),
            Some(Redirect::ToLogin)
        );
        assert_eq!(guard.on_token_change(None, Route::Lists), None);
    }

    #[test]
    fn test_redirect_to_login_clears_protected_history() {
        let mut nav = Navigator::new(Route::Lists);
        nav.push(Route::ListDetail(3));

        nav.apply(Redirect::ToLogin);
        assert_eq!(nav.current(), Route::Login);

        // Back navigation cannot re-enter the protected area.
        nav.pop();
        assert_eq!(nav.current(), Route::Login);
    }

    #[test]
    fn test_redirect_to_main_leaves_auth_area() {
        let mut nav = Navigator::new(Route::Login);
        nav.push(Route::Register);

        nav.apply(Redirect::ToMain);
        assert_eq!(nav.current(), Route::Lists);
        nav.pop();
        assert_eq!(nav.current(), Route::Lists);
    }
}
