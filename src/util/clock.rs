//! Wall-clock source for token expiry checks.
//!
//! Browser builds read `Date.now()`; `std::time::SystemTime` is not available
//! on `wasm32-unknown-unknown`.

/// Seconds since the Unix epoch.
pub trait Clock {
    fn now_secs(&self) -> i64;
}

/// The real clock for the current target.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[allow(clippy::cast_possible_truncation)]
    fn now_secs(&self) -> i64 {
        #[cfg(feature = "hydrate")]
        {
            (js_sys::Date::now() / 1000.0).floor() as i64
        }
        #[cfg(not(feature = "hydrate"))]
        {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        }
    }
}

/// A clock pinned to a fixed instant, for tests and server-side rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_secs(&self) -> i64 {
        self.0
    }
}
