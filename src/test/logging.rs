use std::env;
use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TEST_SETUP: Once = Once::new();

/// Installs a global subscriber printing through the test harness, once per test binary.
/// Verbosity comes from `RUST_LOG` and defaults to `warn`.
pub(crate) fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_filter(env_filter),
        );

        if tracing::dispatcher::has_been_set() {
            debug!("Tracing subscriber already set");
        } else {
            subscriber.try_init().unwrap_or_else(|e| {
                eprintln!("Error: Failed to set up logging: {}", e);
            });
        }
        info!(rust_log = ?env::var("RUST_LOG").ok(), "Test setup complete");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_test_setup();
        init_test_setup();
    }
}
