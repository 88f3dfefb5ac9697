//! Task-local trace id for the request being served.
//!
//! `RequestTrace` opens the scope; anything polled inside the request future
//! (extractors, handlers, error rendering) can read the id without it being
//! threaded through every call.

use std::future::Future;

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

const UNKNOWN: &str = "unknown";

/// Trace id of the current request, or `"unknown"` outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(String::clone)
        .unwrap_or_else(|_| UNKNOWN.to_string())
}

/// Run `future` with `trace_id` visible to [`trace_id()`].
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn outside_scope_is_unknown() {
        assert_eq!(trace_id(), "unknown");
    }

    #[actix_web::test]
    async fn scope_is_visible_then_restored() {
        let seen = with_trace_id("req-1".to_string(), async {
            let outer = trace_id();
            let inner = with_trace_id("req-2".to_string(), async { trace_id() }).await;
            (outer, inner, trace_id())
        })
        .await;

        assert_eq!(seen, ("req-1".into(), "req-2".into(), "req-1".into()));
        assert_eq!(trace_id(), "unknown");
    }
}
