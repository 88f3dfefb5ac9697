//! Process-wide log subscriber for the server binary.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Applies when `RUST_LOG` is unset or unparsable. Driver chatter stays at warn.
const DEFAULT_FILTER: &str = "info,sqlx=warn,sea_orm=warn";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// One JSON object per line. Event fields sit at the top level next to the
/// enclosing `request` span, so `trace_id` is on every line.
pub fn init_tracing() {
    let json = fmt::layer()
        .json()
        .flatten_event(true)
        .with_current_span(true)
        .with_span_list(false)
        .with_target(false);

    tracing_subscriber::registry().with(filter()).with(json).init();
}
