//! # portal
//!
//! Session core for the patient/doctor healthcare portal (Leptos + WASM).
//!
//! This crate owns the client-side authentication lifecycle: decoding the
//! server-issued session token, deriving role and payment state from its
//! claims, persisting it across reloads, and guarding route access. Views
//! consume it through the `SessionContext` provided by `app`.

pub mod app;
pub mod config;
pub mod logging;
pub mod net;
pub mod routes;
pub mod state;
pub mod token;
pub mod util;

#[cfg(test)]
mod test_support;

/// WASM entry point: load config and install console logging.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    let config = app::init();
    log::info!("portal starting, api at {}", config.api_base_url);
}
