use super::*;
use crate::state::session::authenticate;
use crate::test_support::{NOW, doctor_token, user_token};
use futures::executor::block_on;
use serde_json::json;

// =============================================================
// endpoints
// =============================================================

#[test]
fn otp_endpoints_are_role_scoped() {
    assert_eq!(otp_request_endpoint("/api", Role::User), "/api/user/otp/request");
    assert_eq!(otp_verify_endpoint("/api", Role::Doctor), "/api/doctor/otp/verify");
}

#[test]
fn register_endpoint_formats_expected_path() {
    assert_eq!(register_endpoint("https://h.example/v1", Role::Doctor), "https://h.example/v1/doctor/register");
}

#[test]
fn resource_endpoint_formats_expected_path() {
    assert_eq!(resource_endpoint("/api", Role::User, Resource::WellnessResults), "/api/user/wellness-results");
}

// =============================================================
// login_from_response
// =============================================================

#[test]
fn login_from_response_extracts_role_account() {
    let resp: VerifyOtpResponse =
        serde_json::from_value(json!({ "data": { "token": "a.b.c", "user": { "id": "u-17" } } })).unwrap();
    assert_eq!(
        login_from_response(Role::User, resp),
        Ok(OtpLogin { token: "a.b.c".to_owned(), account_id: "u-17".to_owned() })
    );
}

#[test]
fn login_from_response_rejects_other_role_account() {
    let resp: VerifyOtpResponse =
        serde_json::from_value(json!({ "data": { "token": "a.b.c", "user": { "id": "u-17" } } })).unwrap();
    assert_eq!(login_from_response(Role::Doctor, resp), Err(ApiError::MissingAccount(Role::Doctor)));
}

// =============================================================
// authorized_target
// =============================================================

#[test]
fn authorized_target_requires_session() {
    let cfg = PortalConfig::default();
    assert_eq!(
        authorized_target(&cfg, &Session::Anonymous, Resource::Profile),
        Err(ApiError::NotAuthenticated)
    );
}

#[test]
fn authorized_target_uses_session_role_and_bearer() {
    let cfg = PortalConfig::default();
    let token = doctor_token(NOW + 3600, true);
    let session = Session::Authenticated(authenticate(&token, NOW).unwrap());
    let (url, bearer) = authorized_target(&cfg, &session, Resource::Appointments).unwrap();
    assert_eq!(url, "/api/doctor/appointments");
    assert_eq!(bearer, format!("Bearer {token}"));
}

// =============================================================
// native stubs
// =============================================================

#[cfg(not(feature = "hydrate"))]
#[test]
fn fetch_resource_anonymous_fails_before_network() {
    let cfg = PortalConfig::default();
    let result = block_on(fetch_resource(&cfg, &Session::Anonymous, Resource::Profile));
    assert_eq!(result, Err(ApiError::NotAuthenticated));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn network_calls_unavailable_natively() {
    let cfg = PortalConfig::default();
    let session = Session::Authenticated(authenticate(&user_token(NOW + 3600), NOW).unwrap());
    assert_eq!(block_on(request_otp(&cfg, Role::User, "+1")), Err(ApiError::Unavailable));
    assert_eq!(block_on(fetch_resource(&cfg, &session, Resource::Profile)), Err(ApiError::Unavailable));
}
