//! Wire DTOs for the OTP and registration endpoints.
//!
//! Resource payloads (appointments, profile, wellness results) are not typed
//! here; the client passes them to views as opaque JSON.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use crate::token::Role;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpRequest<'a> {
    pub phone_number: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerifyRequest<'a> {
    pub phone_number: &'a str,
    pub otp: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub phone_number: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AccountRef {
    pub id: String,
}

/// Body of a successful OTP verification: `{ data: { token, <role>: { id } } }`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct VerifyOtpResponse {
    pub data: VerifyOtpData,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct VerifyOtpData {
    pub token: String,
    pub doctor: Option<AccountRef>,
    pub user: Option<AccountRef>,
}

impl VerifyOtpData {
    /// Account object for `role`, if the server sent one.
    pub fn account(&self, role: Role) -> Option<&AccountRef> {
        match role {
            Role::Doctor => self.doctor.as_ref(),
            Role::User => self.user.as_ref(),
        }
    }
}

/// Token and account id returned by a completed OTP login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OtpLogin {
    pub token: String,
    pub account_id: String,
}

/// Opaque resources fetched with the session's bearer token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Profile,
    Appointments,
    WellnessResults,
}

impl Resource {
    pub fn path_segment(self) -> &'static str {
        match self {
            Resource::Profile => "profile",
            Resource::Appointments => "appointments",
            Resource::WellnessResults => "wellness-results",
        }
    }
}
