//! Shared helpers for the stylepipe integration tests.

pub mod builders;
pub mod fake_executor;
pub mod project;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use stylepipe::logging::LOG_ENV_VAR;
use tracing_subscriber::{EnvFilter, fmt};

/// Upper bound for any single awaited step in a test.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// How often [`eventually`] re-checks its condition.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

static INIT: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
///
/// Honours the same `STYLEPIPE_LOG` directives as the binary, so
/// `STYLEPIPE_LOG=stylepipe::engine=debug cargo test -- --nocapture`
/// shows the watch session's decisions. Defaults to `info`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Await `f`, panicking if it takes longer than [`TEST_TIMEOUT`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    tokio::time::timeout(TEST_TIMEOUT, f)
        .await
        .unwrap_or_else(|_| panic!("test step timed out after {TEST_TIMEOUT:?}"))
}

/// Poll `check` until it returns true or [`TEST_TIMEOUT`] elapses.
///
/// For effects produced by the file watcher, whose delivery latency depends
/// on the platform backend. Returns whether the condition was met.
pub async fn eventually<F>(mut check: F) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + TEST_TIMEOUT;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
    check()
}
