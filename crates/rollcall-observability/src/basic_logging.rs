use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directives for a log level: our crates at `level`, noisy
/// dependencies at `warn`.
pub fn default_directives(level: &str) -> String {
    format!(
        "rollcall={level},rollcall_db={level},rollcall_cli={level},rollcall_observability={level},\
         tower_http=warn,hyper=warn,tonic=warn,h2=warn,sqlx=warn"
    )
}

/// `RUST_LOG` wins; otherwise `LOG_LEVEL` (default `info`) feeds [`default_directives`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        EnvFilter::new(default_directives(&level))
    })
}

/// Console-only logging, used when observability is compiled out or
/// switched off with `OBSERVABILITY_ENABLED=false`.
pub fn init_basic_console_logging() {
    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter());

    // A second init (tests, CLI reuse) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
