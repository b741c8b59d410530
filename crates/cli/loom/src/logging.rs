//! Log output for the CLI
//!
//! Built on `tracing-subscriber`. `LOOM_LOG` takes an `EnvFilter` directive
//! (default `warn`); `-v` and `-vv` override it with `debug` and `trace`.

use std::io;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "LOOM_LOG";

/// Filter directive for the given number of `-v` flags
fn filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Install the global subscriber, writing compact lines to stderr
pub fn init(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(io::stderr)
        .compact()
        .with_target(false)
        .without_time()
        .init();
}
