//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, time,
//! navigation) from session logic to improve reuse and testability.

pub mod auth;
pub mod clock;
pub mod storage;
