//! Tracing setup for the command-line front end.
//!
//! ```bash
//! # Per-node trace of a run
//! RUBYMM_LOG=rubymm=trace rubymm tree.json
//!
//! # Run-level events only
//! rubymm --verbose tree.json
//! ```
//!
//! The subscriber is only installed when `RUBYMM_LOG` (or `RUST_LOG`) is set
//! or `--verbose` is passed.

use config::constants::LOG_FILTER_ENV;
use tracing_subscriber::EnvFilter;

/// Build an `EnvFilter` from `RUBYMM_LOG`, falling back to `RUST_LOG`.
///
/// Returns `None` when neither is set.
fn filter_from_env() -> Option<EnvFilter> {
    if let Ok(val) = std::env::var(LOG_FILTER_ENV) {
        Some(EnvFilter::builder().parse_lossy(val))
    } else if std::env::var(EnvFilter::DEFAULT_ENV).is_ok() {
        Some(EnvFilter::from_default_env())
    } else {
        None
    }
}

/// Initialise the global tracing subscriber.
///
/// All output goes to stderr so it never mixes with the model on stdout.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        match filter_from_env() {
            Some(filter) => filter,
            None => return,
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
