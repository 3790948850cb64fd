//! Route table for the portal.
//!
//! DESIGN
//! ======
//! Each route declares its access rule next to its path so the guard in
//! `util::auth` never has to pattern-match on URL strings.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::token::Role;

/// Who may visit a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    /// Reachable anonymously. Login and registration pages bounce
    /// authenticated visitors to the dashboard.
    Public { redirect_authenticated: bool },
    /// Requires a session; `role` narrows it to one role.
    Private { role: Option<Role> },
    /// Payment onboarding for unpaid doctors.
    Onboarding,
}

/// Every view the portal routes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppRoute {
    RoleSelect,
    PatientLogin,
    PatientRegister,
    DoctorLogin,
    DoctorRegister,
    Dashboard,
    Profile,
    Appointments,
    BookAppointment,
    DoctorSchedule,
    WellnessResults,
    PaymentOnboarding,
}

impl AppRoute {
    pub const ALL: [AppRoute; 12] = [
        AppRoute::RoleSelect,
        AppRoute::PatientLogin,
        AppRoute::PatientRegister,
        AppRoute::DoctorLogin,
        AppRoute::DoctorRegister,
        AppRoute::Dashboard,
        AppRoute::Profile,
        AppRoute::Appointments,
        AppRoute::BookAppointment,
        AppRoute::DoctorSchedule,
        AppRoute::WellnessResults,
        AppRoute::PaymentOnboarding,
    ];

    pub fn path(self) -> &'static str {
        match self {
            AppRoute::RoleSelect => "/",
            AppRoute::PatientLogin => "/patient/login",
            AppRoute::PatientRegister => "/patient/register",
            AppRoute::DoctorLogin => "/doctor/login",
            AppRoute::DoctorRegister => "/doctor/register",
            AppRoute::Dashboard => "/dashboard",
            AppRoute::Profile => "/profile",
            AppRoute::Appointments => "/appointments",
            AppRoute::BookAppointment => "/appointments/new",
            AppRoute::DoctorSchedule => "/doctor/schedule",
            AppRoute::WellnessResults => "/wellness",
            AppRoute::PaymentOnboarding => "/doctor/onboarding",
        }
    }

    pub fn access(self) -> RouteAccess {
        match self {
            AppRoute::RoleSelect
            | AppRoute::PatientLogin
            | AppRoute::PatientRegister
            | AppRoute::DoctorLogin
            | AppRoute::DoctorRegister => RouteAccess::Public { redirect_authenticated: true },
            AppRoute::Dashboard | AppRoute::Profile | AppRoute::Appointments => RouteAccess::Private { role: None },
            AppRoute::BookAppointment | AppRoute::WellnessResults => RouteAccess::Private { role: Some(Role::User) },
            AppRoute::DoctorSchedule => RouteAccess::Private { role: Some(Role::Doctor) },
            AppRoute::PaymentOnboarding => RouteAccess::Onboarding,
        }
    }

    /// Match a location pathname; query, fragment and a trailing `/` are ignored.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|route| route.path() == normalized)
    }

    /// Login page for `role`.
    pub fn login_for(role: Role) -> Self {
        match role {
            Role::Doctor => AppRoute::DoctorLogin,
            Role::User => AppRoute::PatientLogin,
        }
    }
}
