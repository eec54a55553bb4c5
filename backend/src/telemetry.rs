//! Process-wide logging hooks.

use std::panic;

use tracing::error;

/// Log panics through `tracing` before the default hook runs.
///
/// Call once during startup, after the subscriber is installed.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()));
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| info.payload().downcast_ref::<String>().cloned());
        error!(
            location = location.as_deref(),
            payload = payload.as_deref(),
            "Uncaught panic"
        );
        default_hook(info);
    }));
}
