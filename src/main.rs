use anyhow::Context;
use dotenvy::dotenv;
use rollcall::router::init_router;
use rollcall::state::{AppState, init_store};
use rollcall_cli::{SeedOptions, SeedOutcome, seed_sample_data};
use rollcall_config::{CorsConfig, JwtConfig, ServerConfig, StoreConfig};
use rollcall_observability::{init_metrics, init_tracing, metrics_app, shutdown_tracer};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let result = run().await;
    if let Err(e) = &result {
        error!(error = ?e, "Server exited with error");
    }

    shutdown_tracer().await;

    if result.is_err() {
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let server_config = ServerConfig::from_env();
    let store = init_store(&StoreConfig::from_env())
        .await
        .context("Failed to initialize store")?;

    if server_config.seed_sample_data {
        match seed_sample_data(store.as_ref(), SeedOptions::default()).await? {
            SeedOutcome::Seeded { .. } => {
                info!("Sample data loaded; log in as teacher1 / password123")
            }
            SeedOutcome::Skipped => {}
        }
    }

    let state = AppState::new(store, JwtConfig::from_env(), CorsConfig::from_env());

    if let Some(handle) = init_metrics() {
        let metrics_address = server_config.metrics_address();
        match TcpListener::bind(&metrics_address).await {
            Ok(listener) => {
                info!("📈 Metrics available at http://{}/metrics", metrics_address);
                tokio::spawn(async move {
                    if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                        error!(error = %e, "Metrics server failed");
                    }
                });
            }
            Err(e) => warn!(error = %e, address = %metrics_address, "Metrics listener not started"),
        }
    }

    let app = init_router(state);
    let address = server_config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("🚀 Server running on http://{}", address);
    info!("📚 Swagger UI available at http://{}/swagger-ui", address);
    info!("📖 Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
