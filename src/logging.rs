//! Tracing subscriber setup shared by the binaries

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over `verbose`.
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "finsearch_xlsx=debug"
    } else {
        "finsearch_xlsx=warn"
    };

    // try_init: tests and repeated calls must not panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
