//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! Only the session lives here; view-local state stays in the views.

pub mod session;
