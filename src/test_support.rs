//! Token builders shared by unit tests.

use base64ct::{Base64UrlUnpadded, Encoding};
use serde_json::{Value, json};

pub const NOW: i64 = 1_760_000_000;

/// Encode `claims` as an unsigned compact token.
pub fn make_token(claims: &Value) -> String {
    let header = Base64UrlUnpadded::encode_string(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = Base64UrlUnpadded::encode_string(claims.to_string().as_bytes());
    format!("{header}.{payload}.c2lnbmF0dXJl")
}

pub fn user_claims(exp: i64) -> Value {
    json!({
        "userId": "u-17",
        "phoneNumber": "+15550100",
        "name": "Maya Patel",
        "role": "USER",
        "iat": NOW - 60,
        "exp": exp,
    })
}

pub fn doctor_claims(exp: i64, is_paid: bool) -> Value {
    json!({
        "doctorId": "d-4",
        "phoneNumber": "+15550199",
        "name": "Dr. Ortiz",
        "role": "DOCTOR",
        "iat": NOW - 60,
        "exp": exp,
        "isPaid": is_paid,
    })
}

pub fn user_token(exp: i64) -> String {
    make_token(&user_claims(exp))
}

pub fn doctor_token(exp: i64, is_paid: bool) -> String {
    make_token(&doctor_claims(exp, is_paid))
}
