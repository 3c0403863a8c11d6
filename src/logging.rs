//! Log output for the CLI.
//!
//! Diagnostics go to stderr so they never mix with command output. The
//! level comes from `RUST_LOG`, defaulting to warnings only; `--verbose`
//! raises the default to debug.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init(verbose: bool) {
    let default_level = if verbose { "notecmd=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Ignore the error from a second init (tests, embedding)
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
