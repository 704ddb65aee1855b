//! Authentication context and the navigation gate.
//!
//! The gate is a pure function of token presence: it never talks to the
//! store. A stale token is only discovered when a store call is denied, at
//! which point the kernel clears the context and re-runs the gate.

use std::sync::{Arc, PoisonError, RwLock};

use codepad_core::ProjectId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

/// Shared handle to the current bearer token.
///
/// The kernel is the only writer; the gate and store workers read it.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    token: Arc<RwLock<Option<String>>>,
}

impl AuthContext {
    pub fn new(token: Option<String>) -> Self {
        let ctx = Self::default();
        if let Some(t) = token {
            ctx.set(t);
        }
        ctx
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn state(&self) -> AuthState {
        if self.token().is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == AuthState::Authenticated
    }

    /// Store a token. An empty token signs out.
    pub fn set(&self, token: String) {
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *guard = if token.is_empty() { None } else { Some(token) };
    }

    /// Drop the token. Returns whether one was present.
    pub fn clear(&self) -> bool {
        self.token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Home,
    Editor(ProjectId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    MemberOnly,
    GuestOnly,
}

impl Route {
    pub fn access(&self) -> Access {
        match self {
            Route::Login | Route::Register => Access::GuestOnly,
            Route::Home | Route::Editor(_) => Access::MemberOnly,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".into(),
            Route::Register => "/register".into(),
            Route::Home => "/".into(),
            Route::Editor(id) => format!("/editor/{id}"),
        }
    }
}

/// Outcome of running the gate on a requested route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Allow(Route),
    Redirect { from: Route, to: Route },
}

impl Navigation {
    pub fn route(&self) -> &Route {
        match self {
            Navigation::Allow(r) => r,
            Navigation::Redirect { to, .. } => to,
        }
    }

    pub fn into_route(self) -> Route {
        match self {
            Navigation::Allow(r) => r,
            Navigation::Redirect { to, .. } => to,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Navigation::Redirect { .. })
    }
}

/// Members go through, guests are sent to the login page. The attempted
/// route is not remembered.
pub fn member_only(state: AuthState, requested: Route) -> Navigation {
    match state {
        AuthState::Authenticated => Navigation::Allow(requested),
        AuthState::Unauthenticated => Navigation::Redirect {
            from: requested,
            to: Route::Login,
        },
    }
}

/// Guests go through, members are sent to the landing page.
pub fn guest_only(state: AuthState, requested: Route) -> Navigation {
    match state {
        AuthState::Unauthenticated => Navigation::Allow(requested),
        AuthState::Authenticated => Navigation::Redirect {
            from: requested,
            to: Route::Home,
        },
    }
}

pub fn guard(state: AuthState, requested: Route) -> Navigation {
    match requested.access() {
        Access::MemberOnly => member_only(state, requested),
        Access::GuestOnly => guest_only(state, requested),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_means_unauthenticated() {
        let ctx = AuthContext::new(Some(String::new()));
        assert_eq!(ctx.state(), AuthState::Unauthenticated);
        assert_eq!(
            guard(ctx.state(), Route::Home),
            Navigation::Redirect {
                from: Route::Home,
                to: Route::Login
            }
        );
    }

    #[test]
    fn members_are_bounced_off_guest_pages() {
        let ctx = AuthContext::new(Some("t".into()));
        assert_eq!(guard(ctx.state(), Route::Login).into_route(), Route::Home);
        assert_eq!(guard(ctx.state(), Route::Register).into_route(), Route::Home);
        assert_eq!(
            guard(ctx.state(), Route::Editor("p1".into())),
            Navigation::Allow(Route::Editor("p1".into()))
        );
    }

    #[test]
    fn guests_reach_guest_pages_only() {
        let state = AuthState::Unauthenticated;
        assert!(!guard(state, Route::Register).is_redirect());
        assert_eq!(
            guard(state, Route::Editor("p1".into())).into_route(),
            Route::Login
        );
    }

    #[test]
    fn clones_observe_the_same_token() {
        let ctx = AuthContext::default();
        let reader = ctx.clone();
        ctx.set("abc".into());
        assert!(reader.is_authenticated());
        assert!(ctx.clear());
        assert!(!reader.is_authenticated());
        assert!(!ctx.clear());
    }
}
