//! Session context and browser entry point.
//!
//! DESIGN
//! ======
//! The session store is built once at startup, restored from `localStorage`,
//! and provided to the component tree as a `SessionContext`. Components never
//! construct their own store; they read it with `use_session`.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use leptos::prelude::*;
use log::warn;

use crate::config::PortalConfig;
use crate::net::api::{self, ApiError};
use crate::net::types::OtpLogin;
use crate::state::session::{Session, SessionStore};
use crate::token::Role;
use crate::util::auth::GuardState;
use crate::util::clock::{Clock, SystemClock};
use crate::util::storage::{LocalStorage, TokenStorage};

pub type BrowserSessionStore = SessionStore<LocalStorage, SystemClock>;

/// Reactive handle to the app's session store.
#[derive(Clone, Copy)]
pub struct SessionContext {
    store: RwSignal<BrowserSessionStore>,
}

impl SessionContext {
    /// Build the browser store and restore any persisted session.
    pub fn restore(config: &PortalConfig) -> Self {
        let mut store = SessionStore::new(LocalStorage, SystemClock, config.session_key.clone());
        store.restore();
        Self { store: RwSignal::new(store) }
    }

    /// Read the current session, tracking it reactively.
    pub fn with<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        self.store.with(|s| f(s.session()))
    }

    pub fn session(&self) -> Session {
        self.with(Clone::clone)
    }

    pub fn guard_state(&self) -> GuardState {
        self.with(GuardState::of)
    }

    /// Adopt `token`; see [`SessionStore::login`].
    pub fn login(&self, token: &str) -> GuardState {
        self.store.update(|s| {
            s.login(token);
        });
        self.store.with_untracked(|s| GuardState::of(s.session()))
    }

    pub fn logout(&self) {
        self.store.update(SessionStore::logout);
    }

    /// Drop an expired session. Only notifies subscribers when something changed.
    pub fn check_expiry(&self) -> bool {
        let expired = self
            .store
            .with_untracked(|s| s.session().claims().is_some_and(|c| c.is_expired_at(s.now())));
        if expired {
            self.store.update(|s| {
                s.check_expiry();
            });
        }
        expired
    }
}

/// Restore the session and provide it to the component tree.
pub fn provide_session(config: &PortalConfig) -> SessionContext {
    let session = SessionContext::restore(config);
    provide_context(session);
    session
}

pub fn use_session() -> Option<SessionContext> {
    use_context::<SessionContext>()
}

/// Feed a verified OTP login into `store`.
///
/// The issued token must decode, be unexpired, and carry the role the user
/// logged in as; otherwise the store is left anonymous.
///
/// # Errors
///
/// Returns [`ApiError::InvalidToken`] when the token is rejected.
pub fn adopt_otp_login<S: TokenStorage, C: Clock>(
    store: &mut SessionStore<S, C>,
    role: Role,
    login: &OtpLogin,
) -> Result<GuardState, ApiError> {
    let session = store.login(&login.token);
    if !session.is_authenticated() {
        return Err(ApiError::InvalidToken);
    }
    if session.role() != Some(role) {
        warn!("token role {:?} does not match {role:?} login", session.role());
        store.logout();
        return Err(ApiError::InvalidToken);
    }
    if session.subject_id() != Some(login.account_id.as_str()) {
        warn!("token subject differs from verified account {}", login.account_id);
    }
    Ok(GuardState::of(store.session()))
}

/// Complete the OTP flow: verify the code, then log in with the issued token.
///
/// # Errors
///
/// Returns any [`ApiError`] from verification, or [`ApiError::InvalidToken`].
pub async fn login_with_otp(
    config: &PortalConfig,
    session: SessionContext,
    role: Role,
    phone_number: &str,
    otp: &str,
) -> Result<GuardState, ApiError> {
    let login = api::verify_otp(config, role, phone_number, otp).await?;
    let mut result = Err(ApiError::InvalidToken);
    session.store.update(|s| result = adopt_otp_login(s, role, &login));
    result
}

/// Load build-time config and install logging.
///
/// Invalid config is logged and replaced by defaults so the portal still boots.
pub fn init() -> PortalConfig {
    match PortalConfig::from_build_env() {
        Ok(config) => {
            crate::logging::init(config.log_level);
            config
        }
        Err(e) => {
            let config = PortalConfig::default();
            crate::logging::init(config.log_level);
            warn!("invalid build config, using defaults: {e}");
            config
        }
    }
}
