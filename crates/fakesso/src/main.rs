mod app;
mod config;
mod error;
mod handlers;
mod state;
mod storage;
mod templates;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use fakesso_core::storage::IdentityRepository;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{app::create_app, state::AppState, storage::SqliteRepository};

/// fakesso - Mock identity provider for testing OAuth2 clients
#[derive(Parser, Debug)]
#[command(name = "fakesso")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "80", env = "PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fakesso=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = config::settings_from_env();

    let store_location = settings.store_location().into_owned();
    let identities: Arc<dyn IdentityRepository> = if store_location.is_empty() {
        tracing::warn!("DB_FILE is empty, identities will not survive a restart");
        Arc::new(SqliteRepository::new_in_memory().await?)
    } else {
        tracing::info!(path = %store_location, "Opening identity store");
        Arc::new(SqliteRepository::new(&store_location).await?)
    };

    tracing::info!(
        show_known_users = settings.show_known_users(),
        additional_fields = settings.additional_fields(),
        client_secret_required = !settings.client_secret().is_empty(),
        "Settings loaded"
    );

    let state = AppState::new(settings, identities);
    let app = create_app(state);

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
