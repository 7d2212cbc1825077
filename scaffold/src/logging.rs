//! Process-wide log output.
//!
//! Scaffold events are the tool's product output, so the default level is
//! `info`. `RUST_LOG` overrides it, e.g. `RUST_LOG=scaffold=debug` also shows
//! every raw filesystem call.

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Output: stderr, compact format, one timestamped line per event. Colors
/// only when stderr is a terminal.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .compact(),
        )
        .init();
}
