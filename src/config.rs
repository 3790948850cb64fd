//! Portal configuration baked in at build time.
//!
//! A WASM bundle has no process environment, so values are read with
//! `option_env!` when the crate is compiled and parsed once at startup.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "/api";
pub const DEFAULT_SESSION_KEY: &str = "portal_session";
pub const DEFAULT_LOG_LEVEL: log::Level = log::Level::Info;

/// Errors produced while parsing configuration values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORTAL_SESSION_KEY must not be empty")]
    EmptySessionKey,

    #[error("unknown PORTAL_LOG_LEVEL: {0}")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// Backend base URL, without a trailing `/`.
    pub api_base_url: String,
    /// `localStorage` key holding the session entry.
    pub session_key: String,
    pub log_level: log::Level,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            session_key: DEFAULT_SESSION_KEY.to_owned(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl PortalConfig {
    /// Build config from variables captured at compile time.
    ///
    /// Optional:
    /// - `PORTAL_API_BASE_URL`: default `/api`
    /// - `PORTAL_SESSION_KEY`: default `portal_session`
    /// - `PORTAL_LOG_LEVEL`: `error`, `warn`, `info` (default), `debug`, `trace`
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a captured value is invalid.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            option_env!("PORTAL_API_BASE_URL"),
            option_env!("PORTAL_SESSION_KEY"),
            option_env!("PORTAL_LOG_LEVEL"),
        )
    }

    /// Parse raw values; `None` or blank falls back to the default.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a present value is invalid.
    pub fn from_vars(
        api_base_url: Option<&str>,
        session_key: Option<&str>,
        log_level: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let api_base_url = match api_base_url.map(str::trim) {
            Some(raw) if !raw.is_empty() => raw.trim_end_matches('/').to_owned(),
            _ => DEFAULT_API_BASE_URL.to_owned(),
        };
        let session_key = match session_key {
            Some(raw) if raw.trim().is_empty() => return Err(ConfigError::EmptySessionKey),
            Some(raw) => raw.trim().to_owned(),
            None => DEFAULT_SESSION_KEY.to_owned(),
        };
        let log_level = parse_log_level(log_level)?;
        Ok(Self { api_base_url, session_key, log_level })
    }
}

fn parse_log_level(raw: Option<&str>) -> Result<log::Level, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_LOG_LEVEL),
        Some(raw) => raw.parse().map_err(|_| ConfigError::LogLevel(raw.to_owned())),
    }
}
