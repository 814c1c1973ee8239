//! Rollcall Observability
//!
//! Console and file logging, OpenTelemetry trace export, and Prometheus
//! metrics for the attendance API.
//!
//! Everything beyond console logging sits behind the `observability` feature
//! (on by default). At runtime, `OBSERVABILITY_ENABLED=false` turns it off
//! again and falls back to [`basic_logging`].
//!
//! ```no_run
//! use rollcall_observability::{init_tracing, shutdown_tracer};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_tracing();
//!     // ... serve ...
//!     shutdown_tracer().await;
//! }
//! ```

pub mod basic_logging;

#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub use self::logging::{init_tracing, logging_middleware, shutdown_tracer};
#[cfg(feature = "observability")]
pub use self::metrics::{
    init_metrics, metrics_app, metrics_middleware, track_attendance_submitted,
    track_duplicate_submission, track_login_failure, track_login_success, track_token_issued,
};

use std::sync::OnceLock;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Reads `OBSERVABILITY_ENABLED` once; anything but `false` or `0` means on.
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        cfg!(feature = "observability")
            && std::env::var("OBSERVABILITY_ENABLED")
                .map(|v| parse_enabled(&v))
                .unwrap_or(true)
    })
}

fn parse_enabled(value: &str) -> bool {
    let value = value.trim();
    !(value.eq_ignore_ascii_case("false") || value == "0")
}

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{Router, extract::Request, middleware::Next, response::Response};

    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    /// Console logging only.
    pub fn init_tracing() {
        super::basic_logging::init_basic_console_logging();
    }

    pub async fn shutdown_tracer() {}

    /// Never installs a recorder; there is nothing to scrape.
    pub fn init_metrics() -> Option<()> {
        None
    }

    pub fn metrics_app(_handle: ()) -> Router {
        Router::new()
    }

    pub fn track_login_success() {}
    pub fn track_login_failure(_reason: &str) {}
    pub fn track_token_issued() {}
    pub fn track_attendance_submitted(_session: &str, _records: usize) {}
    pub fn track_duplicate_submission() {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
