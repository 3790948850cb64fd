use super::*;
use crate::state::session::authenticate;
use crate::test_support::{NOW, doctor_token, user_token};
use crate::token::Role;

fn user() -> Session {
    Session::Authenticated(authenticate(&user_token(NOW + 3600), NOW).unwrap())
}

fn doctor(is_paid: bool) -> Session {
    Session::Authenticated(authenticate(&doctor_token(NOW + 3600, is_paid), NOW).unwrap())
}

fn private_routes() -> Vec<AppRoute> {
    AppRoute::ALL
        .into_iter()
        .filter(|r| matches!(r.access(), RouteAccess::Private { .. }))
        .collect()
}

// =============================================================
// GuardState
// =============================================================

#[test]
fn guard_state_branches_on_role_and_payment() {
    assert_eq!(GuardState::of(&Session::Anonymous), GuardState::Anonymous);
    assert_eq!(GuardState::of(&user()), GuardState::AuthenticatedActive);
    assert_eq!(GuardState::of(&doctor(false)), GuardState::AuthenticatedIncomplete);
    assert_eq!(GuardState::of(&doctor(true)), GuardState::AuthenticatedActive);
}

// =============================================================
// Anonymous
// =============================================================

#[test]
fn anonymous_private_routes_redirect_to_entry_point() {
    for route in private_routes() {
        assert_eq!(resolve(&Session::Anonymous, route), Navigation::Redirect(AppRoute::RoleSelect));
    }
    assert_eq!(
        resolve(&Session::Anonymous, AppRoute::PaymentOnboarding),
        Navigation::Redirect(AppRoute::RoleSelect)
    );
}

#[test]
fn anonymous_public_routes_allowed() {
    assert_eq!(resolve(&Session::Anonymous, AppRoute::RoleSelect), Navigation::Allow);
    assert_eq!(resolve(&Session::Anonymous, AppRoute::DoctorLogin), Navigation::Allow);
    assert_eq!(resolve(&Session::Anonymous, AppRoute::PatientRegister), Navigation::Allow);
}

// =============================================================
// AuthenticatedIncomplete
// =============================================================

#[test]
fn unpaid_doctor_is_sent_to_onboarding_from_everywhere() {
    let session = doctor(false);
    for route in AppRoute::ALL {
        let expected = if route == AppRoute::PaymentOnboarding {
            Navigation::Allow
        } else {
            Navigation::Redirect(AppRoute::PaymentOnboarding)
        };
        assert_eq!(resolve(&session, route), expected, "{route:?}");
    }
}

#[test]
fn unpaid_doctor_unknown_path_goes_to_onboarding() {
    assert_eq!(
        resolve_path(&doctor(false), "/nowhere"),
        Navigation::Redirect(AppRoute::PaymentOnboarding)
    );
}

// =============================================================
// AuthenticatedActive
// =============================================================

#[test]
fn active_login_pages_redirect_to_dashboard() {
    for session in [user(), doctor(true)] {
        assert_eq!(resolve(&session, AppRoute::PatientLogin), Navigation::Redirect(AppRoute::Dashboard));
        assert_eq!(resolve(&session, AppRoute::RoleSelect), Navigation::Redirect(AppRoute::Dashboard));
    }
}

#[test]
fn active_sessions_skip_onboarding() {
    assert_eq!(resolve(&doctor(true), AppRoute::PaymentOnboarding), Navigation::Redirect(AppRoute::Dashboard));
    assert_eq!(resolve(&user(), AppRoute::PaymentOnboarding), Navigation::Redirect(AppRoute::Dashboard));
}

#[test]
fn active_shared_private_routes_allowed() {
    for session in [user(), doctor(true)] {
        assert_eq!(resolve(&session, AppRoute::Dashboard), Navigation::Allow);
        assert_eq!(resolve(&session, AppRoute::Profile), Navigation::Allow);
        assert_eq!(resolve(&session, AppRoute::Appointments), Navigation::Allow);
    }
}

#[test]
fn role_restricted_routes_bounce_other_role() {
    assert_eq!(user().role(), Some(Role::User));
    assert_eq!(resolve(&user(), AppRoute::WellnessResults), Navigation::Allow);
    assert_eq!(resolve(&user(), AppRoute::DoctorSchedule), Navigation::Redirect(AppRoute::Dashboard));
    assert_eq!(resolve(&doctor(true), AppRoute::DoctorSchedule), Navigation::Allow);
    assert_eq!(resolve(&doctor(true), AppRoute::BookAppointment), Navigation::Redirect(AppRoute::Dashboard));
}

// =============================================================
// resolve_path
// =============================================================

#[test]
fn resolve_path_unknown_path_falls_through() {
    assert_eq!(resolve_path(&Session::Anonymous, "/missing"), Navigation::Allow);
    assert_eq!(resolve_path(&user(), "/missing"), Navigation::Allow);
}

#[test]
fn resolve_path_normalizes_before_matching() {
    assert_eq!(
        resolve_path(&Session::Anonymous, "/dashboard/?from=sms"),
        Navigation::Redirect(AppRoute::RoleSelect)
    );
}
