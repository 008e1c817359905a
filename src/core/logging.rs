//! Console logger for the browser host
//!
//! Native hosts install whatever `log` backend they like. In the browser there
//! is no stderr, so `init()` routes records to `console.*` through
//! `console_log`.

/// Install the browser console logger. Returns `false` if a logger was
/// already set.
#[cfg(target_arch = "wasm32")]
pub fn install_console_logger(max_level: log::Level) -> bool {
    console_log::init_with_level(max_level).is_ok()
}

/// Outside the browser the host owns logging; nothing is installed.
#[cfg(not(target_arch = "wasm32"))]
pub fn install_console_logger(_max_level: log::Level) -> bool {
    false
}
