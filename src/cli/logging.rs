//! Diagnostic logging setup
//!
//! Logs go to stderr so they never mix with list output. `PARTS_LOG` (or
//! `RUST_LOG`) selects the filter; `--verbose` forces debug for this crate.

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("parts=debug")
    } else {
        EnvFilter::try_from_env("PARTS_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A second init (e.g. in tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
