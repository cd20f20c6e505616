//! Tracing subscriber setup
//!
//! Embedders that already install their own subscriber can skip this; the
//! library only emits `tracing` events.

use crate::config::{Settings, set_global_debug};
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber for the current process.
///
/// `RUST_LOG` takes precedence. Without it, `settings.debug` selects
/// `docstub=debug`, otherwise only warnings are shown. Calling this more
/// than once is harmless.
pub fn init(settings: &Settings) {
    set_global_debug(settings.debug);

    let fallback = if settings.debug {
        "docstub=debug"
    } else {
        "docstub=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
