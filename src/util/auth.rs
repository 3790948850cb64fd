//! Route guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every navigation is checked against the current session. The pure
//! `resolve` decides; `install_route_guard` re-runs it reactively and performs
//! the redirect.
//!
//! State machine:
//!
//! ```text
//! Anonymous ──login──▶ AuthenticatedActive       (user, or paid doctor)
//!     ▲       └──────▶ AuthenticatedIncomplete   (unpaid doctor)
//!     └──── logout / expiry ────────┘
//! ```

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use log::debug;

use crate::app::SessionContext;
use crate::routes::{AppRoute, RouteAccess};
use crate::state::session::Session;
use crate::token::Identity;

/// Where the guard's state machine currently sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardState {
    Anonymous,
    /// Doctor who has not completed payment onboarding.
    AuthenticatedIncomplete,
    AuthenticatedActive,
}

impl GuardState {
    pub fn of(session: &Session) -> Self {
        match session.identity() {
            None => GuardState::Anonymous,
            Some(Identity::Doctor { is_paid: false, .. }) => GuardState::AuthenticatedIncomplete,
            Some(_) => GuardState::AuthenticatedActive,
        }
    }
}

/// Outcome of a guard check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Allow,
    Redirect(AppRoute),
}

/// Decide whether `session` may visit `target`.
pub fn resolve(session: &Session, target: AppRoute) -> Navigation {
    match GuardState::of(session) {
        GuardState::AuthenticatedIncomplete => {
            if target == AppRoute::PaymentOnboarding {
                Navigation::Allow
            } else {
                Navigation::Redirect(AppRoute::PaymentOnboarding)
            }
        }
        GuardState::Anonymous => match target.access() {
            RouteAccess::Public { .. } => Navigation::Allow,
            RouteAccess::Private { .. } | RouteAccess::Onboarding => Navigation::Redirect(AppRoute::RoleSelect),
        },
        GuardState::AuthenticatedActive => match target.access() {
            RouteAccess::Public { redirect_authenticated: true } | RouteAccess::Onboarding => {
                Navigation::Redirect(AppRoute::Dashboard)
            }
            RouteAccess::Public { redirect_authenticated: false } | RouteAccess::Private { role: None } => {
                Navigation::Allow
            }
            RouteAccess::Private { role: Some(role) } => {
                if session.role() == Some(role) {
                    Navigation::Allow
                } else {
                    Navigation::Redirect(AppRoute::Dashboard)
                }
            }
        },
    }
}

/// Like [`resolve`], for a raw location pathname. Paths outside the route
/// table fall through to the router's not-found view, except for unpaid
/// doctors, who are always sent to onboarding.
pub fn resolve_path(session: &Session, path: &str) -> Navigation {
    match AppRoute::from_path(path) {
        Some(route) => resolve(session, route),
        None if GuardState::of(session) == GuardState::AuthenticatedIncomplete => {
            Navigation::Redirect(AppRoute::PaymentOnboarding)
        }
        None => Navigation::Allow,
    }
}

/// Re-check the current path whenever it or the session changes, and redirect
/// when the guard says so. Expired sessions are dropped first.
pub fn install_route_guard<P, F>(session: SessionContext, path: P, navigate: F)
where
    P: Fn() -> String + 'static,
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let path = path();
        session.check_expiry();
        let decision = session.with(|s| resolve_path(s, &path));
        if let Navigation::Redirect(route) = decision {
            debug!("guard: {path} -> {}", route.path());
            navigate(route.path(), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// [`install_route_guard`] bound to the enclosing `<Router>`'s location.
///
/// Must be called from a component rendered inside the router.
pub fn install_router_guard(session: SessionContext) {
    let location = leptos_router::hooks::use_location();
    let navigate = leptos_router::hooks::use_navigate();
    install_route_guard(session, move || location.pathname.get(), navigate);
}
