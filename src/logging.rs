//! Diagnostic logging via `tracing`.
//!
//! User-facing messages go through `cli::output`; this is for the
//! developer-facing trace of what the orchestrator and storage did.
//!
//! ```bash
//! SHERLOCK_LOG=debug sherlock list team
//! ```

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable consulted before `RUST_LOG`.
const LOG_ENV: &str = "SHERLOCK_LOG";

/// Install the global subscriber. Defaults to `warn` when neither
/// `SHERLOCK_LOG` nor `RUST_LOG` is set.
pub fn init() {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // try_init: a second call (e.g. from tests) is a no-op.
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
