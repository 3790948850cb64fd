//! Session token decoding.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend issues a JWT-shaped `header.payload.signature` string after OTP
//! verification. The client only reads the payload segment to learn who is
//! logged in; the signature is never checked here. The backend authorizes
//! every bearer call on its own.
//!
//! DESIGN
//! ======
//! The wire claims are deserialized into a loose `RawClaims` shape and then
//! narrowed into `Claims`, where the role split is a tagged union so doctor-only
//! fields cannot be read off a patient session.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{Deserialize, Serialize};

/// Errors produced while decoding a session token.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The token does not have exactly three `.`-separated segments.
    #[error("token has {0} segments, expected 3")]
    Segments(usize),

    /// The payload segment is not valid base64url.
    #[error("token payload is not valid base64url")]
    Base64,

    /// The payload is not the expected JSON claims object.
    #[error("token payload parse failed: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Portal role carried by a session token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Doctor,
    User,
}

impl Role {
    /// Lowercase path segment used by the backend for this role.
    pub fn as_path(self) -> &'static str {
        match self {
            Role::Doctor => "doctor",
            Role::User => "user",
        }
    }
}

/// Who the token was issued to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Identity {
    /// A doctor account; `is_paid` gates access to private views.
    Doctor { id: String, is_paid: bool },
    /// A patient account.
    User { id: String },
}

impl Identity {
    pub fn role(&self) -> Role {
        match self {
            Identity::Doctor { .. } => Role::Doctor,
            Identity::User { .. } => Role::User,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Identity::Doctor { id, .. } | Identity::User { id } => id,
        }
    }
}

/// Decoded, role-narrowed token claims.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub identity: Identity,
    pub phone_number: String,
    pub name: String,
    /// Issue time in seconds since the Unix epoch.
    pub issued_at: i64,
    /// Expiry time in seconds since the Unix epoch.
    pub expires_at: i64,
}

impl Claims {
    pub fn role(&self) -> Role {
        self.identity.role()
    }

    /// Payment flag; always `false` for patients.
    pub fn is_paid(&self) -> bool {
        matches!(self.identity, Identity::Doctor { is_paid: true, .. })
    }

    /// A session is valid only while `now < expires_at`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

/// Claims exactly as the backend writes them.
///
/// Only `role` and `exp` are required. The subject may be absent, in which
/// case the identity carries an empty id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawClaims {
    doctor_id: Option<String>,
    user_id: Option<String>,
    #[serde(alias = "subjectId")]
    sub: Option<String>,
    #[serde(default)]
    phone_number: String,
    #[serde(default)]
    name: String,
    role: Role,
    #[serde(default, alias = "issuedAt")]
    iat: i64,
    #[serde(alias = "expiresAt")]
    exp: i64,
    #[serde(default)]
    is_paid: bool,
}

impl From<RawClaims> for Claims {
    fn from(raw: RawClaims) -> Self {
        let id = raw
            .doctor_id
            .into_iter()
            .chain(raw.user_id)
            .chain(raw.sub)
            .find(|id| !id.is_empty())
            .unwrap_or_default();
        let identity = match raw.role {
            Role::Doctor => Identity::Doctor { id, is_paid: raw.is_paid },
            Role::User => Identity::User { id },
        };
        Self {
            identity,
            phone_number: raw.phone_number,
            name: raw.name,
            issued_at: raw.iat,
            expires_at: raw.exp,
        }
    }
}

/// Decode the payload of `token` without verifying its signature.
///
/// Padding on the payload segment is tolerated. Expiry is not checked here;
/// see [`Claims::is_expired_at`].
///
/// # Errors
///
/// Returns a [`TokenError`] when the token is structurally invalid.
pub fn decode(token: &str) -> Result<Claims, TokenError> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::Segments(segments.len()));
    }
    let payload = segments[1].trim_end_matches('=');
    let bytes = Base64UrlUnpadded::decode_vec(payload).map_err(|_| TokenError::Base64)?;
    let raw: RawClaims = serde_json::from_slice(&bytes)?;
    Ok(Claims::from(raw))
}

/// Short, log-safe fingerprint of a token (never the full credential).
pub fn fingerprint(token: &str) -> String {
    let tail: String = token.chars().rev().take(6).collect::<Vec<_>>().into_iter().rev().collect();
    format!("…{tail} ({} chars)", token.len())
}
