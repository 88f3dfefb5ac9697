//! Log capture for unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static SUBSCRIBER: OnceCell<()> = OnceCell::new();

/// First of `TEST_LOG`, `RUST_LOG` that parses; otherwise `warn`.
fn filter() -> EnvFilter {
    ["TEST_LOG", "RUST_LOG"]
        .into_iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

/// Install a compact subscriber once per test binary. Output goes through the
/// test writer, so `cargo test` only shows it for failing tests.
pub fn init() {
    SUBSCRIBER.get_or_init(|| {
        // another harness may already own the global subscriber
        let _ = fmt()
            .compact()
            .without_time()
            .with_env_filter(filter())
            .with_test_writer()
            .try_init();
    });
}
