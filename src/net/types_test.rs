use super::*;
use serde_json::json;

// =============================================================
// request bodies
// =============================================================

#[test]
fn otp_request_uses_camel_case() {
    let body = serde_json::to_value(OtpRequest { phone_number: "+15550100" }).unwrap();
    assert_eq!(body, json!({ "phoneNumber": "+15550100" }));
}

#[test]
fn otp_verify_request_carries_code() {
    let body = serde_json::to_value(OtpVerifyRequest { phone_number: "+1", otp: "482913" }).unwrap();
    assert_eq!(body, json!({ "phoneNumber": "+1", "otp": "482913" }));
}

#[test]
fn register_request_shape() {
    let body = serde_json::to_value(RegisterRequest { name: "Maya", phone_number: "+1" }).unwrap();
    assert_eq!(body, json!({ "name": "Maya", "phoneNumber": "+1" }));
}

// =============================================================
// VerifyOtpResponse
// =============================================================

#[test]
fn verify_response_doctor_account() {
    let resp: VerifyOtpResponse =
        serde_json::from_value(json!({ "data": { "token": "t", "doctor": { "id": "d-4", "name": "x" } } })).unwrap();
    assert_eq!(resp.data.account(Role::Doctor), Some(&AccountRef { id: "d-4".to_owned() }));
    assert_eq!(resp.data.account(Role::User), None);
}

#[test]
fn verify_response_without_token_fails() {
    let parsed = serde_json::from_value::<VerifyOtpResponse>(json!({ "data": { "user": { "id": "u" } } }));
    assert!(parsed.is_err());
}

#[test]
fn resource_path_segments() {
    assert_eq!(Resource::Profile.path_segment(), "profile");
    assert_eq!(Resource::Appointments.path_segment(), "appointments");
    assert_eq!(Resource::WellnessResults.path_segment(), "wellness-results");
}
