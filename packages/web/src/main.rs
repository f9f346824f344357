use std::net::SocketAddr;

use anyhow::Context;
use api::{HttpNotifier, Settings};
use store::PgStore;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing_subscriber::{fmt, EnvFilter};

mod callable;
mod routes;
mod state;

fn main() -> anyhow::Result<()> {
    tokio::runtime::Runtime::new()?.block_on(launch_server())
}

async fn launch_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::new().context("Failed to load configuration")?;

    if settings.email.identity.is_empty() {
        tracing::warn!("EMAIL_IDENTITY is not set, notifications will be rejected by the relay");
    }

    let store = PgStore::connect(&settings.database.url, settings.database.connections)
        .await
        .context("Failed to connect to database")?;
    store.migrate().await.context("Failed to run migrations")?;

    let notifier = HttpNotifier::new(&settings.email);
    let state = state::State::new(store, notifier, &settings.email);

    let mut router = routes::router(state);

    // Serve the prerendered site alongside the callable operations
    if let Some(public) = &settings.server.public {
        tracing::info!("Serving static files from {}", public);
        router = router.fallback_service(ServeDir::new(public));
    }

    let addr = settings.server.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
