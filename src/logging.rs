//! Logging setup.
//!
//! Diagnostics always go to stderr so that `--json` output on stdout stays
//! machine-readable. `RUST_LOG` wins over the verbosity flags when set.

use std::sync::Once;

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

static TEST_INIT: Once = Once::new();

/// Map `-v`/`-q` flags to a default filter directive.
#[must_use]
pub const fn level_for(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the filter is malformed or a subscriber is already set.
pub fn init_logging(verbose: u8, quiet: bool, json: bool) -> Result<()> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)?,
        _ => EnvFilter::try_new(level_for(verbose, quiet))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.without_time().try_init()
    };
    installed.map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}

/// Route `tracing` output through the test harness. Safe to call from every test.
pub fn init_test_logging() {
    TEST_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    });
}
