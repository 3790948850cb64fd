//! Session store: who is logged in, and with what role.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owned by the app root and shared through Leptos context (see `app`). The
//! route guard reads its projections; the OTP login flow and the logout
//! button are its only writers.
//!
//! ERROR HANDLING
//! ==============
//! Every failure (undecodable token, expired token, unreachable storage) is
//! logged and folded into `Session::Anonymous`. Public operations never return
//! an error; the worst outcome is a forced re-login.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use log::{debug, info, warn};

use crate::token::{self, Claims, Identity, Role, TokenError};
use crate::util::clock::Clock;
use crate::util::storage::{self, TokenStorage};

/// Failures inside the session lifecycle. Never surfaced past `SessionStore`.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The token could not be decoded.
    #[error("token decode failed: {0}")]
    Decode(#[from] TokenError),

    /// The token decoded but its `exp` has passed.
    #[error("token expired at {expires_at} (now {now})")]
    Expired { expires_at: i64, now: i64 },

    /// Durable storage could not be reached.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The stored entry is not a `{ "token": ... }` object.
    #[error("stored session entry is corrupt: {0}")]
    StorageCorrupt(serde_json::Error),
}

/// A decoded, unexpired session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedSession {
    pub token: String,
    pub claims: Claims,
}

/// Current authentication state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(AuthenticatedSession),
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn is_doctor(&self) -> bool {
        self.role() == Some(Role::Doctor)
    }

    pub fn is_user(&self) -> bool {
        self.role() == Some(Role::User)
    }

    /// Doctor payment flag; `false` when anonymous or a patient.
    pub fn is_paid(&self) -> bool {
        self.claims().is_some_and(Claims::is_paid)
    }

    pub fn role(&self) -> Option<Role> {
        self.claims().map(Claims::role)
    }

    pub fn display_name(&self) -> Option<&str> {
        self.claims().map(|c| c.name.as_str())
    }

    pub fn subject_id(&self) -> Option<&str> {
        self.claims().map(|c| c.identity.id())
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.claims().map(|c| c.phone_number.as_str())
    }

    pub fn expires_at(&self) -> Option<i64> {
        self.claims().map(|c| c.expires_at)
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.claims().map(|c| &c.identity)
    }

    pub fn claims(&self) -> Option<&Claims> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(auth) => Some(&auth.claims),
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(auth) => Some(&auth.token),
        }
    }

    /// `Authorization` header value for bearer calls.
    pub fn bearer(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {t}"))
    }
}

/// Decode `token` and reject it if already expired at `now`.
///
/// # Errors
///
/// Returns [`SessionError::Decode`] or [`SessionError::Expired`].
pub fn authenticate(token: &str, now: i64) -> Result<AuthenticatedSession, SessionError> {
    let claims = token::decode(token)?;
    if claims.is_expired_at(now) {
        return Err(SessionError::Expired { expires_at: claims.expires_at, now });
    }
    Ok(AuthenticatedSession { token: token.trim().to_owned(), claims })
}

/// Single source of truth for the logged-in session.
///
/// Lifecycle: construct, `restore()` once at startup, then `login`/`logout`.
#[derive(Clone, Debug)]
pub struct SessionStore<S, C> {
    storage: S,
    clock: C,
    key: String,
    session: Session,
}

impl<S: TokenStorage, C: Clock> SessionStore<S, C> {
    /// Build an anonymous store persisting under `key`.
    pub fn new(storage: S, clock: C, key: impl Into<String>) -> Self {
        Self { storage, clock, key: key.into(), session: Session::Anonymous }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn now(&self) -> i64 {
        self.clock.now_secs()
    }

    /// Load the persisted token, if any, and adopt it when still valid.
    ///
    /// Anything unusable in storage is discarded.
    pub fn restore(&mut self) -> &Session {
        self.session = Session::Anonymous;
        match self.load_persisted() {
            Ok(Some(auth)) => {
                debug!("session restored for {:?} {}", auth.claims.role(), auth.claims.identity.id());
                self.session = Session::Authenticated(auth);
            }
            Ok(None) => debug!("no persisted session"),
            Err(e) => {
                warn!("discarding persisted session: {e}");
                self.clear_storage();
            }
        }
        &self.session
    }

    /// Adopt a freshly issued token.
    ///
    /// Fails closed: an undecodable or expired token leaves the store
    /// anonymous and is never written to storage. A token that cannot be
    /// persisted is not adopted either, and any stored entry is cleared.
    pub fn login(&mut self, token: &str) -> &Session {
        match authenticate(token, self.clock.now_secs()) {
            Ok(auth) => match storage::save_token(&mut self.storage, &self.key, &auth.token) {
                Ok(()) => {
                    info!("logged in as {:?} {}", auth.claims.role(), auth.claims.identity.id());
                    self.session = Session::Authenticated(auth);
                }
                Err(e) => {
                    warn!("rejecting login, session could not be persisted: {e}");
                    self.clear_storage();
                    self.session = Session::Anonymous;
                }
            },
            Err(e) => {
                warn!("rejecting login token {}: {e}", token::fingerprint(token));
                if self.session.is_authenticated() {
                    self.clear_storage();
                }
                self.session = Session::Anonymous;
            }
        }
        &self.session
    }

    /// Drop the session from memory and storage. Idempotent.
    pub fn logout(&mut self) {
        if self.session.is_authenticated() {
            info!("logged out");
        }
        self.session = Session::Anonymous;
        self.clear_storage();
    }

    /// Drop the session if its token has expired.
    ///
    /// Returns `true` when an expiry was detected on this call.
    pub fn check_expiry(&mut self) -> bool {
        let now = self.clock.now_secs();
        let expired = self.session.claims().is_some_and(|c| c.is_expired_at(now));
        if expired {
            info!("session expired, logging out");
            self.session = Session::Anonymous;
            self.clear_storage();
        }
        expired
    }

    fn load_persisted(&self) -> Result<Option<AuthenticatedSession>, SessionError> {
        let Some(entry) = storage::load_token(&self.storage, &self.key)? else {
            return Ok(None);
        };
        authenticate(&entry.token, self.clock.now_secs()).map(Some)
    }

    fn clear_storage(&mut self) {
        if let Err(e) = self.storage.remove(&self.key) {
            warn!("could not clear persisted session: {e}");
        }
    }
}
