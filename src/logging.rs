//! Diagnostics go to stderr so they never mix with the report on stdout.
use tracing_subscriber::{fmt, EnvFilter};

/// The filter used when `RUST_LOG` isn't set: `warn`, raised one level per
/// `-v` on the command line.
#[must_use]
pub fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `verbosity`.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));

    fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).init();
}
