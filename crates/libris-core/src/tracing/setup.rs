//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::defaults::DEFAULT_LOG_FILTER;

static INIT: Once = Once::new();

/// Initialize the Libris tracing/logging system.
///
/// Reads the `LIBRIS_LOG` environment variable for per-target log levels.
/// Format: `LIBRIS_LOG=libris_storage=debug,tower_http=warn`
///
/// Falls back to `libris=info,tower_http=info` if `LIBRIS_LOG` is unset or
/// invalid. Calling it more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("LIBRIS_LOG")
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .init();
    });
}
