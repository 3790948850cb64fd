//! REST helpers for the OTP login flow and bearer-authorized resources.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Native builds: every call returns `ApiError::Unavailable`.
//!
//! ERROR HANDLING
//! ==============
//! Failures are returned to the calling view to display. Nothing here
//! retries; the user resubmits.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(feature = "hydrate")]
use log::debug;

use super::types::{OtpLogin, Resource, VerifyOtpResponse};
#[cfg(feature = "hydrate")]
use super::types::{OtpRequest, OtpVerifyRequest, RegisterRequest};
use crate::config::PortalConfig;
use crate::state::session::Session;
use crate::token::Role;

/// Errors surfaced to views from backend calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never got a response.
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("request failed with status {status}")]
    Status { status: u16 },

    /// The response body was not the expected JSON.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// OTP verification succeeded but the account for the role is missing.
    #[error("response has no {0:?} account")]
    MissingAccount(Role),

    /// The issued token was rejected by the session store.
    #[error("server issued an unusable session token")]
    InvalidToken,

    /// A bearer call was attempted without a session.
    #[error("not signed in")]
    NotAuthenticated,

    /// HTTP is only available in the browser build.
    #[error("not available outside the browser")]
    Unavailable,
}

#[cfg(any(test, feature = "hydrate"))]
fn otp_request_endpoint(base: &str, role: Role) -> String {
    format!("{base}/{}/otp/request", role.as_path())
}

#[cfg(any(test, feature = "hydrate"))]
fn otp_verify_endpoint(base: &str, role: Role) -> String {
    format!("{base}/{}/otp/verify", role.as_path())
}

#[cfg(any(test, feature = "hydrate"))]
fn register_endpoint(base: &str, role: Role) -> String {
    format!("{base}/{}/register", role.as_path())
}

fn resource_endpoint(base: &str, role: Role, resource: Resource) -> String {
    format!("{base}/{}/{}", role.as_path(), resource.path_segment())
}

/// Pull the token and account id for `role` out of a verification response.
///
/// # Errors
///
/// Returns [`ApiError::MissingAccount`] when the role's account object is absent.
pub fn login_from_response(role: Role, resp: VerifyOtpResponse) -> Result<OtpLogin, ApiError> {
    let account_id = resp
        .data
        .account(role)
        .map(|a| a.id.clone())
        .ok_or(ApiError::MissingAccount(role))?;
    Ok(OtpLogin { token: resp.data.token, account_id })
}

/// Endpoint and `Authorization` header value for an authorized call.
fn authorized_target(config: &PortalConfig, session: &Session, resource: Resource) -> Result<(String, String), ApiError> {
    let (Some(bearer), Some(role)) = (session.bearer(), session.role()) else {
        return Err(ApiError::NotAuthenticated);
    };
    Ok((resource_endpoint(&config.api_base_url, role, resource), bearer))
}

#[cfg(feature = "hydrate")]
async fn post_json<B: serde::Serialize>(url: &str, body: &B) -> Result<gloo_net::http::Response, ApiError> {
    debug!("POST {url}");
    let resp = gloo_net::http::Request::post(url)
        .json(body)
        .map_err(|e| ApiError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    if !resp.ok() {
        return Err(ApiError::Status { status: resp.status() });
    }
    Ok(resp)
}

/// Ask the backend to text an OTP to `phone_number`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or is refused.
pub async fn request_otp(config: &PortalConfig, role: Role, phone_number: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = otp_request_endpoint(&config.api_base_url, role);
        post_json(&url, &OtpRequest { phone_number }).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, role, phone_number);
        Err(ApiError::Unavailable)
    }
}

/// Exchange an OTP for a session token.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails, the code is rejected, or the
/// response lacks the account for `role`.
pub async fn verify_otp(config: &PortalConfig, role: Role, phone_number: &str, otp: &str) -> Result<OtpLogin, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = otp_verify_endpoint(&config.api_base_url, role);
        let resp = post_json(&url, &OtpVerifyRequest { phone_number, otp }).await?;
        let body: VerifyOtpResponse = resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))?;
        login_from_response(role, body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, role, phone_number, otp);
        Err(ApiError::Unavailable)
    }
}

/// Create a new account; the user then logs in through the OTP flow.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or is refused.
pub async fn register(config: &PortalConfig, role: Role, name: &str, phone_number: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = register_endpoint(&config.api_base_url, role);
        post_json(&url, &RegisterRequest { name, phone_number }).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, role, name, phone_number);
        Err(ApiError::Unavailable)
    }
}

/// `GET` an opaque resource for the signed-in account.
///
/// # Errors
///
/// Returns [`ApiError::NotAuthenticated`] for anonymous sessions, otherwise
/// any request, status or parse failure.
pub async fn fetch_resource(
    config: &PortalConfig,
    session: &Session,
    resource: Resource,
) -> Result<serde_json::Value, ApiError> {
    let (url, bearer) = authorized_target(config, session, resource)?;
    #[cfg(feature = "hydrate")]
    {
        debug!("GET {url}");
        let resp = gloo_net::http::Request::get(&url)
            .header("Authorization", &bearer)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        if !resp.ok() {
            return Err(ApiError::Status { status: resp.status() });
        }
        resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, bearer);
        Err(ApiError::Unavailable)
    }
}
