//! Logger setup.
//!
//! Browser builds route the `log` facade to the devtools console; panics are
//! forwarded there too. Native builds only apply the level filter and leave
//! logger installation to the host.

/// Install the console logger at `level`. Safe to call more than once.
pub fn init(level: log::Level) {
    #[cfg(feature = "hydrate")]
    {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(level).is_err() {
            log::debug!("console logger already installed");
        }
    }
    log::set_max_level(level.to_level_filter());
}
