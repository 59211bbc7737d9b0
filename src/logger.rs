pub use tracing::{debug, error, info, instrument, trace, warn};
use tracing_subscriber::fmt::{self, format::FmtSpan};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// The filter defaults to `info` and is overridable through `RUST_LOG`.
/// Span close events are only emitted when a debug filter is active.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let span_events = if env_filter.to_string().contains("debug") {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_timer(fmt::time::uptime())
                .with_span_events(span_events),
        )
        .init();
}
